use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::{AtomId, FragmentId, SpanId};

/// An extracted predicate instance together with the places in the
/// fragment text where it was recognized.
///
/// "Atom" is the domain term here, not the logic-programming one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Atom {
    pub id: AtomId,
    pub regulation_fragment_id: FragmentId,
    /// Predicate text, e.g. `bird(X)`.
    pub predicate: String,
    pub description: String,
    pub is_negated: bool,
    /// Base assertion rather than a derived predicate.
    #[serde(default)]
    pub is_fact: bool,
    #[serde(default)]
    pub spans: Vec<AtomSpan>,
}

/// A half-open character range `[start, end)` into a fragment's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtomSpan {
    pub id: SpanId,
    pub atom_id: AtomId,
    pub start: usize,
    pub end: usize,
}

impl AtomSpan {
    /// Number of characters covered.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}
