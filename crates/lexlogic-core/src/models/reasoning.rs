use serde::{Deserialize, Serialize};

/// Example facts to evaluate the fragment's rules against.
///
/// `facts` is a newline-separated Prolog program fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrologQuery {
    pub facts: String,
}

/// Outcome of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryStatus {
    Success,
    Failure,
    Error,
}

/// A single variable binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrologResult {
    pub variable: String,
    pub value: String,
}

/// One solution: the set of bindings that satisfy the goals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrologAnswer {
    pub status: QueryStatus,
    pub answers: Vec<PrologResult>,
    #[serde(default)]
    pub message: String,
}

/// Response of the run-example endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrologResponse {
    pub status: QueryStatus,
    pub answers: Vec<PrologAnswer>,
}

impl PrologResponse {
    /// Error text reported by the reasoner, if the query errored.
    pub fn error_message(&self) -> Option<&str> {
        if self.status != QueryStatus::Error {
            return None;
        }
        Some(
            self.answers
                .first()
                .map(|a| a.message.as_str())
                .filter(|m| !m.is_empty())
                .unwrap_or("Unknown error"),
        )
    }
}

/// Examples generated by the backend for a fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleSet {
    #[serde(default)]
    pub examples: Vec<Example>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub description: String,
    #[serde(default)]
    pub facts: Vec<ExampleFact>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleFact {
    pub predicate: String,
    #[serde(default)]
    pub arguments: Vec<ExampleArgument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleArgument {
    pub variable: String,
    pub value: String,
}
