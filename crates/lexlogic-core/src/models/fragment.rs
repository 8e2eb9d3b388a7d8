use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{FragmentId, Formalism, LlmIdentifier};

/// A piece of regulation text that atoms and rules are extracted from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegulationFragment {
    pub id: FragmentId,
    pub title: String,
    pub content: String,
    #[serde(with = "super::timestamp")]
    pub created_at: DateTime<Utc>,
    pub llm_identifier: LlmIdentifier,
    #[serde(default)]
    pub formalism: Formalism,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used_tokens_in: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used_tokens_out: Option<u64>,
}

impl RegulationFragment {
    /// Content length in characters, the unit span offsets are expressed in.
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }

    /// Dollar cost of the tokens spent on this fragment so far.
    pub fn spent(&self) -> f64 {
        self.llm_identifier.cost().estimate(
            self.used_tokens_in.unwrap_or(0),
            self.used_tokens_out.unwrap_or(0),
        )
    }
}

/// Payload for creating a fragment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRegulationFragment {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub llm_identifier: LlmIdentifier,
    #[serde(default)]
    pub formalism: Formalism,
}

/// Backend cost estimate for a fragment, in dollars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub price: f64,
}
