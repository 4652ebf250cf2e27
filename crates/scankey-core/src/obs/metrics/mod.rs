use crate::range::RangeBound;
use candid::CandidType;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;

#[cfg(test)]
mod tests;

///
/// EventState
/// Ephemeral, in-memory counters for key building and scan narrowing.
///

#[derive(CandidType, Clone, Debug, Default, Deserialize, Serialize)]
pub(crate) struct EventState {
    pub(crate) keys: KeyCounters,
    pub(crate) scans: ScanCounters,
}

///
/// KeyCounters
///

#[derive(CandidType, Clone, Debug, Default, Deserialize, Serialize)]
pub struct KeyCounters {
    // Keys materialized per side
    pub lower_built: u64,
    pub upper_built: u64,
    pub bytes_built: u64,

    // Sides left open
    pub lower_unbounded: u64,
    pub upper_unbounded: u64,
    pub successor_overflows: u64,
}

///
/// ScanCounters
///

#[derive(CandidType, Clone, Debug, Default, Deserialize, Serialize)]
pub struct ScanCounters {
    pub intersected: u64,
    pub pruned: u64,

    pub filters_installed: u64,
    pub filters_flattened: u64,
    pub filters_wrapped: u64,
}

///
/// FilterShape
/// How a conjoined filter landed in the existing chain.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FilterShape {
    Installed,
    Flattened,
    Wrapped,
}

///
/// EventReport
/// Point-in-time snapshot returned to callers.
///

#[derive(CandidType, Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventReport {
    pub keys: KeyCounters,
    pub scans: ScanCounters,
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

/// Bump the per-side counter pair selected by `bound`.
pub(crate) const fn bump_side(lower: &mut u64, upper: &mut u64, bound: RangeBound) {
    match bound {
        RangeBound::Lower => *lower = lower.saturating_add(1),
        RangeBound::Upper => *upper = upper.saturating_add(1),
    }
}

#[must_use]
pub(crate) fn report() -> EventReport {
    with_state(|m| EventReport {
        keys: m.keys.clone(),
        scans: m.scans.clone(),
    })
}
