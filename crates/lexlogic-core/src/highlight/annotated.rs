//! `<atom id="N">…</atom>` markup.
//!
//! The extraction model returns the fragment text with every recognized atom
//! wrapped in this markup. Span offsets are recovered by subtracting the
//! length of the markup seen so far.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{Fragment, HighlightError};
use crate::models::AtomId;

static ATOM_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?s)<atom id="(\d+)">(.*?)</atom>"#).expect("valid atom tag regex"));

/// A span recovered from annotated text, not yet stored by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewSpan {
    pub atom_id: AtomId,
    pub start: usize,
    pub end: usize,
}

pub(super) fn render(fragments: &[Fragment]) -> String {
    let mut out = String::new();
    for fragment in fragments {
        match fragment {
            Fragment::Plain { text } => out.push_str(text),
            Fragment::Highlighted { atom_id, text, .. } => {
                out.push_str(&format!(r#"<atom id="{}">{}</atom>"#, atom_id, text));
            }
        }
    }
    out
}

/// Character spans of every annotated atom, relative to the text with all
/// markup removed.
pub fn extract_spans(annotated: &str) -> Result<Vec<NewSpan>, HighlightError> {
    let mut spans = Vec::new();
    // Characters of markup removed so far.
    let mut removed = 0usize;
    // Character position of `scanned` in the annotated text.
    let mut chars_before = 0usize;
    let mut scanned = 0usize;

    for captures in ATOM_TAG.captures_iter(annotated) {
        let (Some(whole), Some(id), Some(content)) = (captures.get(0), captures.get(1), captures.get(2))
        else {
            continue;
        };

        chars_before += annotated[scanned..whole.start()].chars().count();
        scanned = whole.start();

        let atom_id: AtomId = id
            .as_str()
            .parse()
            .map_err(|_| HighlightError::InvalidAnnotation(format!("atom id {}", id.as_str())))?;

        let match_len = whole.as_str().chars().count();
        let content_len = content.as_str().chars().count();
        let start = chars_before - removed;

        spans.push(NewSpan {
            atom_id,
            start,
            end: start + content_len,
        });

        removed += match_len - content_len;
    }

    Ok(spans)
}

/// The annotated text with all atom markup removed.
pub fn strip_annotations(annotated: &str) -> String {
    ATOM_TAG.replace_all(annotated, "$2").into_owned()
}
