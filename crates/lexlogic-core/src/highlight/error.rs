use thiserror::Error;

use crate::models::AtomId;

/// Errors raised while turning spans into display fragments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HighlightError {
    #[error("Span {start}..{end} of atom {atom_id} is out of bounds for text of {len} characters")]
    OutOfBounds {
        atom_id: AtomId,
        start: usize,
        end: usize,
        len: usize,
    },

    #[error("Span {start}..{end} of atom {atom_id} is empty")]
    EmptySpan {
        atom_id: AtomId,
        start: usize,
        end: usize,
    },

    #[error("Span {second:?} of atom {second_atom} overlaps span {first:?} of atom {first_atom}")]
    Overlap {
        first_atom: AtomId,
        first: (usize, usize),
        second_atom: AtomId,
        second: (usize, usize),
    },

    #[error("Invalid atom annotation: {0}")]
    InvalidAnnotation(String),
}
