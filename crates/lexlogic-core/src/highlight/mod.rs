//! Span highlighting.
//!
//! Converts a fragment's raw text plus the spans of its atoms into an ordered
//! list of plain and highlighted pieces. Concatenating the text of every
//! piece always gives back the original text.
//!
//! ```
//! use lexlogic_core::highlight::{highlight, reassemble, Fragment};
//! use lexlogic_core::models::{Atom, AtomSpan};
//!
//! let atom = Atom {
//!     id: 7,
//!     regulation_fragment_id: 1,
//!     predicate: "cat(X)".into(),
//!     description: String::new(),
//!     is_negated: false,
//!     is_fact: true,
//!     spans: vec![AtomSpan { id: 1, atom_id: 7, start: 2, end: 5 }],
//! };
//! let fragments = highlight("A cat sat.", &[atom]).unwrap();
//! assert_eq!(fragments.len(), 3);
//! assert!(matches!(&fragments[1], Fragment::Highlighted { text, .. } if text == "cat"));
//! assert_eq!(reassemble(&fragments), "A cat sat.");
//! ```

mod annotated;
mod error;

pub use annotated::{extract_spans, strip_annotations, NewSpan};
pub use error::HighlightError;

use serde::{Deserialize, Serialize};

use crate::color::{atom_color, HighlightColor};
use crate::hover::HoverState;
use crate::models::{Atom, AtomId, AtomSpan};

/// What to do when two spans overlap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlapPolicy {
    /// Fail with [`HighlightError::Overlap`].
    #[default]
    Reject,
    /// Keep the span that starts first and drop the ones running into it.
    FirstWins,
}

/// A renderable piece of fragment text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Fragment {
    Plain {
        text: String,
    },
    Highlighted {
        atom_id: AtomId,
        text: String,
        color: HighlightColor,
    },
}

impl Fragment {
    pub fn text(&self) -> &str {
        match self {
            Fragment::Plain { text } | Fragment::Highlighted { text, .. } => text,
        }
    }

    pub fn atom_id(&self) -> Option<AtomId> {
        match self {
            Fragment::Plain { .. } => None,
            Fragment::Highlighted { atom_id, .. } => Some(*atom_id),
        }
    }

    /// Background to render with, given the shared hover state.
    /// Plain text has none.
    pub fn background(&self, hover: &HoverState) -> Option<&'static str> {
        match self {
            Fragment::Plain { .. } => None,
            Fragment::Highlighted { atom_id, color, .. } => Some(if hover.is_hovered(*atom_id) {
                color.hover
            } else {
                color.base
            }),
        }
    }
}

/// Span highlighter with a configurable overlap policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Highlighter {
    policy: OverlapPolicy,
}

impl Highlighter {
    pub fn new(policy: OverlapPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> OverlapPolicy {
        self.policy
    }

    /// Split `text` into plain and highlighted fragments.
    ///
    /// Span offsets are character offsets. Empty plain pieces are not emitted.
    pub fn highlight(&self, text: &str, atoms: &[Atom]) -> Result<Vec<Fragment>, HighlightError> {
        let spans = self.resolve(text, atoms)?;
        let offsets = char_offsets(text);

        let mut fragments = Vec::with_capacity(spans.len() * 2 + 1);
        let mut last_end = 0;
        for span in spans {
            push_plain(&mut fragments, &text[offsets[last_end]..offsets[span.start]]);
            fragments.push(Fragment::Highlighted {
                atom_id: span.atom_id,
                text: text[offsets[span.start]..offsets[span.end]].to_string(),
                color: atom_color(span.atom_id),
            });
            last_end = span.end;
        }
        push_plain(&mut fragments, &text[offsets[last_end]..]);

        Ok(fragments)
    }

    /// Render `text` with `<atom id="N">…</atom>` markup around every span.
    pub fn annotate(&self, text: &str, atoms: &[Atom]) -> Result<String, HighlightError> {
        let fragments = self.highlight(text, atoms)?;
        Ok(annotated::render(&fragments))
    }

    /// Flatten, validate and order the spans of all atoms. Each span is
    /// attributed to the atom that owns it, whatever its own `atom_id` says.
    fn resolve(&self, text: &str, atoms: &[Atom]) -> Result<Vec<AtomSpan>, HighlightError> {
        let len = text.chars().count();

        let mut spans: Vec<AtomSpan> = atoms
            .iter()
            .flat_map(|atom| {
                atom.spans.iter().map(move |span| AtomSpan {
                    atom_id: atom.id,
                    ..*span
                })
            })
            .collect();
        spans.sort_by_key(|s| (s.start, s.end));

        let mut accepted: Vec<AtomSpan> = Vec::with_capacity(spans.len());
        for span in spans {
            if span.start >= span.end {
                return Err(HighlightError::EmptySpan {
                    atom_id: span.atom_id,
                    start: span.start,
                    end: span.end,
                });
            }
            if span.end > len {
                return Err(HighlightError::OutOfBounds {
                    atom_id: span.atom_id,
                    start: span.start,
                    end: span.end,
                    len,
                });
            }

            if let Some(previous) = accepted.last() {
                if span.start < previous.end {
                    match self.policy {
                        OverlapPolicy::Reject => {
                            return Err(HighlightError::Overlap {
                                first_atom: previous.atom_id,
                                first: (previous.start, previous.end),
                                second_atom: span.atom_id,
                                second: (span.start, span.end),
                            });
                        }
                        OverlapPolicy::FirstWins => {
                            tracing::warn!(
                                atom_id = span.atom_id,
                                start = span.start,
                                end = span.end,
                                "dropping span overlapping atom {}",
                                previous.atom_id
                            );
                            continue;
                        }
                    }
                }
            }
            accepted.push(span);
        }

        Ok(accepted)
    }
}

/// Highlight with the default (rejecting) overlap policy.
pub fn highlight(text: &str, atoms: &[Atom]) -> Result<Vec<Fragment>, HighlightError> {
    Highlighter::default().highlight(text, atoms)
}

/// Concatenate the text of all fragments, dropping highlight information.
pub fn reassemble(fragments: &[Fragment]) -> String {
    fragments.iter().map(Fragment::text).collect()
}

/// Highlighted pieces belonging to `atom_id`, in text order.
pub fn highlighted_text_for(fragments: &[Fragment], atom_id: AtomId) -> Vec<&str> {
    fragments
        .iter()
        .filter(|f| f.atom_id() == Some(atom_id))
        .map(Fragment::text)
        .collect()
}

fn push_plain(fragments: &mut Vec<Fragment>, text: &str) {
    if !text.is_empty() {
        fragments.push(Fragment::Plain {
            text: text.to_string(),
        });
    }
}

/// Byte offset of every character boundary, including the end of the text.
fn char_offsets(text: &str) -> Vec<usize> {
    text.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect()
}
