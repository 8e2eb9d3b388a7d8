use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{FragmentId, RuleId};

/// Separator between a Horn clause head and its body.
pub(crate) const NECK: &str = ":-";

/// A generated Horn clause, stored as unparsed text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: RuleId,
    pub regulation_fragment_id: FragmentId,
    pub description: String,
    /// Clause text of the form `head :- body.`
    pub definition: String,
    pub is_goal: bool,
    #[serde(with = "super::timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Rule {
    /// Head text: everything before the first `:-`, trimmed.
    ///
    /// A definition without `:-` is a fact clause; its head is the whole
    /// definition minus the terminating `.`.
    pub fn head(&self) -> &str {
        match self.definition.split_once(NECK) {
            Some((head, _)) => head.trim(),
            None => {
                let trimmed = self.definition.trim();
                trimmed.strip_suffix('.').unwrap_or(trimmed).trim_end()
            }
        }
    }

    /// Body text after the last `:-`, trimmed, or `None` for fact clauses.
    pub fn body(&self) -> Option<&str> {
        self.definition
            .rsplit_once(NECK)
            .map(|(_, body)| body.trim())
    }
}

/// Payload for creating a rule by hand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRule {
    pub regulation_fragment_id: FragmentId,
    pub description: String,
    pub definition: String,
    #[serde(default)]
    pub is_goal: bool,
}

/// Partial rule update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_goal: Option<bool>,
}

/// Free-text feedback sent along with an atom or rule regeneration request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegenerateFeedback {
    pub feedback: String,
}
