//! Metrics sink boundary.
//!
//! Pagination logic MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.
use crate::{db::store::StorageErrorKind, obs::metrics};
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn MetricsSink>>> = const { RefCell::new(None) };
}

///
/// RejectReason
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RejectReason {
    UnknownColumn,
    UnsupportedValueType,
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent<'a> {
    PageStart {
        entity_path: &'a str,
        resumed: bool,
    },
    PageFinish {
        entity_path: &'a str,
        served: bool,
        rows_returned: u64,
        token_issued: bool,
    },
    TokenRejected {
        entity_path: &'a str,
    },
    RequestRejected {
        entity_path: &'a str,
        reason: RejectReason,
    },
    StorageFailure {
        entity_path: &'a str,
        kind: StorageErrorKind,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent<'_>);
}

///
/// GlobalMetricsSink
/// Default sink writing into the thread-local counters.
/// Used whenever no scoped override is installed.
///

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent<'_>) {
        match event {
            MetricsEvent::PageStart {
                entity_path,
                resumed,
            } => {
                metrics::with_state_mut(|m| {
                    m.ops.pages_requested = m.ops.pages_requested.saturating_add(1);
                    if resumed {
                        m.ops.pages_resumed = m.ops.pages_resumed.saturating_add(1);
                    }
                    metrics::bump_entity(m, entity_path, |e| {
                        e.pages_requested = e.pages_requested.saturating_add(1);
                    });
                });
            }

            MetricsEvent::PageFinish {
                entity_path,
                served,
                rows_returned,
                token_issued,
            } => {
                if !served {
                    return;
                }

                let issued = u64::from(token_issued);
                metrics::with_state_mut(|m| {
                    m.ops.pages_served = m.ops.pages_served.saturating_add(1);
                    m.ops.rows_returned = m.ops.rows_returned.saturating_add(rows_returned);
                    m.ops.tokens_issued = m.ops.tokens_issued.saturating_add(issued);
                    metrics::bump_entity(m, entity_path, |e| {
                        e.pages_served = e.pages_served.saturating_add(1);
                        e.rows_returned = e.rows_returned.saturating_add(rows_returned);
                        e.tokens_issued = e.tokens_issued.saturating_add(issued);
                    });
                });
            }

            MetricsEvent::TokenRejected { entity_path } => {
                metrics::with_state_mut(|m| {
                    m.ops.tokens_rejected = m.ops.tokens_rejected.saturating_add(1);
                    metrics::bump_entity(m, entity_path, |e| {
                        e.tokens_rejected = e.tokens_rejected.saturating_add(1);
                    });
                });
            }

            MetricsEvent::RequestRejected {
                entity_path,
                reason,
            } => {
                metrics::with_state_mut(|m| {
                    match reason {
                        RejectReason::UnknownColumn => {
                            m.ops.unknown_columns = m.ops.unknown_columns.saturating_add(1);
                        }
                        RejectReason::UnsupportedValueType => {
                            m.ops.unsupported_values = m.ops.unsupported_values.saturating_add(1);
                        }
                    }
                    metrics::bump_entity(m, entity_path, |e| {
                        e.requests_rejected = e.requests_rejected.saturating_add(1);
                    });
                });
            }

            MetricsEvent::StorageFailure { entity_path, kind } => {
                metrics::with_state_mut(|m| {
                    m.ops.storage_failures = m.ops.storage_failures.saturating_add(1);
                    if kind == StorageErrorKind::Cancelled {
                        m.ops.storage_cancellations = m.ops.storage_cancellations.saturating_add(1);
                    }
                    metrics::bump_entity(m, entity_path, |e| {
                        e.storage_failures = e.storage_failures.saturating_add(1);
                    });
                });
            }
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent<'_>) {
    // Clone out of the slot so a sink may itself install an override.
    let sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());

    match sink {
        Some(sink) => sink.record(event),
        None => GLOBAL_METRICS_SINK.record(event),
    }
}

/// Snapshot the current metrics state.
#[must_use]
pub fn metrics_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset all metrics state.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override.
///
/// The previous sink is restored on every exit, unwinding included.
pub fn with_metrics_sink<T>(sink: Rc<dyn MetricsSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn MetricsSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let prev = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = prev;
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}

///
/// PageSpan
/// RAII guard that emits start/finish events for one coordinator call.
/// The finish event fires even on unwind; unserved pages do not count.
///

pub(crate) struct PageSpan<'a> {
    entity_path: &'a str,
    served: bool,
    rows: u64,
    token_issued: bool,
}

impl<'a> PageSpan<'a> {
    #[must_use]
    pub(crate) fn new(entity_path: &'a str, resumed: bool) -> Self {
        record(MetricsEvent::PageStart {
            entity_path,
            resumed,
        });

        Self {
            entity_path,
            served: false,
            rows: 0,
            token_issued: false,
        }
    }

    pub(crate) const fn served(&mut self, rows: u64, token_issued: bool) {
        self.served = true;
        self.rows = rows;
        self.token_issued = token_issued;
    }
}

impl Drop for PageSpan<'_> {
    fn drop(&mut self) {
        record(MetricsEvent::PageFinish {
            entity_path: self.entity_path,
            served: self.served,
            rows_returned: self.rows,
            token_issued: self.token_issued,
        });
    }
}
