//! Data Transfer Objects exchanged with the formalization backend.
//!
//! These mirror the JSON shapes the backend produces. Nothing here is
//! persisted client-side; the types are plain deserialized values that the
//! highlighter, graph builder and CLI consume.

mod agentic_log;
mod atom;
mod chat;
mod fragment;
mod llm;
mod reasoning;
mod rule;

pub use agentic_log::{AgenticLog, LogOrder, MessageSource};
pub use atom::{Atom, AtomSpan};
pub use chat::{Agent, ChatMessage, CreateChatMessage};
pub use fragment::{CreateRegulationFragment, Price, RegulationFragment};
pub use llm::{Formalism, LlmCost, LlmIdentifier};
pub use reasoning::{
    Example, ExampleArgument, ExampleFact, ExampleSet, PrologAnswer, PrologQuery, PrologResponse,
    PrologResult, QueryStatus,
};
pub use rule::{CreateRule, RegenerateFeedback, Rule, UpdateRule};
pub(crate) use rule::NECK;

/// Identifier of an extracted atom.
pub type AtomId = i64;
/// Identifier of a rule.
pub type RuleId = i64;
/// Identifier of a regulation fragment.
pub type FragmentId = i64;
/// Identifier of an atom span.
pub type SpanId = i64;

/// Timestamp (de)serialization.
///
/// The backend emits either RFC 3339 (`2025-07-17T10:00:00Z`) or HTTP dates
/// (`Thu, 17 Jul 2025 10:00:00 GMT`) depending on the endpoint. Both are
/// accepted; naive timestamps without an offset are taken as UTC.
pub(crate) mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {}", raw)))
    }

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }
}

#[cfg(test)]
mod tests {
    use super::timestamp;

    #[test]
    fn test_parse_rfc3339() {
        let dt = timestamp::parse("2025-07-17T10:00:00Z").unwrap();
        assert_eq!(dt.to_rfc3339(), "2025-07-17T10:00:00+00:00");
    }

    #[test]
    fn test_parse_http_date() {
        let dt = timestamp::parse("Thu, 17 Jul 2025 10:00:00 GMT").unwrap();
        assert_eq!(dt.to_rfc3339(), "2025-07-17T10:00:00+00:00");
    }

    #[test]
    fn test_parse_naive() {
        let dt = timestamp::parse("2025-07-17T10:00:00.123456").unwrap();
        assert_eq!(dt.timestamp(), 1_752_746_400);
    }

    #[test]
    fn test_parse_garbage() {
        assert!(timestamp::parse("yesterday").is_none());
    }
}
