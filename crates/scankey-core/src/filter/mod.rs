//! Module: filter
//! Responsibility: residual predicate filters attached to a range scan.
//! Does not own: row-by-row predicate evaluation (the store does that).
//! Boundary: scan planning conjoins filters here that key bounds cannot express.

#[cfg(test)]
mod tests;

use crate::obs::{
    FilterShape,
    sink::{MetricsEvent, record},
};
use serde::{Deserialize, Serialize};

///
/// PredicateFilter
///
/// Opaque store-side predicate. `name` identifies the filter
/// implementation; `payload` is its serialized argument block.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct PredicateFilter {
    pub name: String,
    #[serde(with = "serde_bytes")]
    pub payload: Vec<u8>,
}

impl PredicateFilter {
    #[must_use]
    pub fn new(name: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            payload: payload.into(),
        }
    }
}

///
/// ScanFilter
///
/// Filter tree evaluated by the store for every row the scan visits.
/// `All` passes rows every member passes; `Any` passes rows one member passes.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum ScanFilter {
    Predicate(PredicateFilter),
    All(Vec<Self>),
    Any(Vec<Self>),
}

impl ScanFilter {
    /// AND `filter` into `existing`, returning the new chain.
    ///
    /// The new filter always comes first. An existing `All` group gains the
    /// filter as a new leading member instead of being nested.
    #[must_use]
    pub fn and(existing: Option<Self>, filter: Self) -> Self {
        let (conjoined, shape) = match existing {
            None => (filter, FilterShape::Installed),
            Some(Self::All(members)) => {
                let mut all = Vec::with_capacity(members.len() + 1);
                all.push(filter);
                all.extend(members);

                (Self::All(all), FilterShape::Flattened)
            }
            Some(other) => (Self::All(vec![filter, other]), FilterShape::Wrapped),
        };

        record(MetricsEvent::FilterConjoined { shape });

        conjoined
    }

    /// Nesting depth of the tree; a single predicate has depth zero.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Predicate(_) => 0,
            Self::All(members) | Self::Any(members) => {
                1 + members.iter().map(Self::depth).max().unwrap_or(0)
            }
        }
    }
}

impl From<PredicateFilter> for ScanFilter {
    fn from(filter: PredicateFilter) -> Self {
        Self::Predicate(filter)
    }
}
