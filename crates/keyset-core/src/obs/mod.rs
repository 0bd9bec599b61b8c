//! Observability: page-level telemetry events and the sinks that record them.
//!
//! Pagination code never touches counters directly; it emits
//! `MetricsEvent`s through `sink::record`.

pub(crate) mod metrics;
pub(crate) mod sink;


// re-exports
pub use metrics::{EntityCounters, EntitySummary, EventOps, EventReport, EventState};
pub use sink::{
    MetricsEvent, MetricsSink, RejectReason, metrics_report, metrics_reset_all, with_metrics_sink,
};
