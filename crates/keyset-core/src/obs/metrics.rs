use serde::{Deserialize, Serialize};
use std::{cell::RefCell, collections::BTreeMap};

///
/// EventState
/// Ephemeral, in-memory pagination counters.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventState {
    pub ops: EventOps,
    pub entities: BTreeMap<String, EntityCounters>,
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventOps {
    // Coordinator entrypoints
    pub pages_requested: u64,
    pub pages_resumed: u64,
    pub pages_served: u64,

    // Rows and tokens
    pub rows_returned: u64,
    pub tokens_issued: u64,
    pub tokens_rejected: u64,

    // Request rejections
    pub unknown_columns: u64,
    pub unsupported_values: u64,

    // Storage collaborator
    pub storage_failures: u64,
    pub storage_cancellations: u64,
}

///
/// EntityCounters
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EntityCounters {
    pub pages_requested: u64,
    pub pages_served: u64,
    pub rows_returned: u64,
    pub tokens_issued: u64,
    pub tokens_rejected: u64,
    pub requests_rejected: u64,
    pub storage_failures: u64,
}

thread_local! {
    static EVENT_STATE: RefCell<EventState> = RefCell::new(EventState::default());
}

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&m.borrow()))
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&mut m.borrow_mut()))
}

/// Reset all counters.
pub(crate) fn reset_all() {
    with_state_mut(|m| *m = EventState::default());
}

/// Bump a counter on the entity entry, creating it on first use.
pub(crate) fn bump_entity(m: &mut EventState, entity_path: &str, f: impl FnOnce(&mut EntityCounters)) {
    let entry = m.entities.entry(entity_path.to_string()).or_default();
    f(entry);
}

///
/// EventReport
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventReport {
    /// Raw counters since the last reset.
    pub counters: Option<EventState>,
    /// Per-entity counters and averages.
    pub entity_counters: Vec<EntitySummary>,
}

///
/// EntitySummary
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EntitySummary {
    pub path: String,
    pub pages_requested: u64,
    pub pages_served: u64,
    pub rows_returned: u64,
    pub tokens_issued: u64,
    pub tokens_rejected: u64,
    pub requests_rejected: u64,
    pub storage_failures: u64,
    pub avg_rows_per_page: f64,
}

/// Build a report from the in-memory counters.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub(crate) fn report() -> EventReport {
    let snap = with_state(Clone::clone);

    let mut entity_counters: Vec<EntitySummary> = snap
        .entities
        .iter()
        .map(|(path, ops)| {
            let avg_rows_per_page = if ops.pages_served > 0 {
                ops.rows_returned as f64 / ops.pages_served as f64
            } else {
                0.0
            };

            EntitySummary {
                path: path.clone(),
                pages_requested: ops.pages_requested,
                pages_served: ops.pages_served,
                rows_returned: ops.rows_returned,
                tokens_issued: ops.tokens_issued,
                tokens_rejected: ops.tokens_rejected,
                requests_rejected: ops.requests_rejected,
                storage_failures: ops.storage_failures,
                avg_rows_per_page,
            }
        })
        .collect();

    // Busiest entities first, path as the tie-break.
    entity_counters.sort_by(|a, b| {
        b.pages_requested
            .cmp(&a.pages_requested)
            .then_with(|| a.path.cmp(&b.path))
    });

    EventReport {
        counters: Some(snap),
        entity_counters,
    }
}
