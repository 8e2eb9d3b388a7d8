use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Model the backend used (or should use) to formalize a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LlmIdentifier {
    #[serde(rename = "GPT_3_5_TURBO")]
    Gpt35Turbo,
    #[serde(rename = "GPT_4o_MINI")]
    Gpt4oMini,
    #[serde(rename = "GPT_5")]
    Gpt5,
    #[serde(rename = "GPT_5_MINI")]
    Gpt5Mini,
    #[serde(rename = "GPT_5_NANO")]
    Gpt5Nano,
    #[serde(rename = "SONNET_4")]
    Sonnet4,
    #[serde(rename = "GEMINI_2_5_FLASH")]
    Gemini25Flash,
}

impl LlmIdentifier {
    pub const ALL: [LlmIdentifier; 7] = [
        LlmIdentifier::Gpt35Turbo,
        LlmIdentifier::Gpt4oMini,
        LlmIdentifier::Gpt5,
        LlmIdentifier::Gpt5Mini,
        LlmIdentifier::Gpt5Nano,
        LlmIdentifier::Sonnet4,
        LlmIdentifier::Gemini25Flash,
    ];

    /// Name used on the wire, e.g. `GPT_4o_MINI`.
    pub fn wire_name(&self) -> &'static str {
        match self {
            LlmIdentifier::Gpt35Turbo => "GPT_3_5_TURBO",
            LlmIdentifier::Gpt4oMini => "GPT_4o_MINI",
            LlmIdentifier::Gpt5 => "GPT_5",
            LlmIdentifier::Gpt5Mini => "GPT_5_MINI",
            LlmIdentifier::Gpt5Nano => "GPT_5_NANO",
            LlmIdentifier::Sonnet4 => "SONNET_4",
            LlmIdentifier::Gemini25Flash => "GEMINI_2_5_FLASH",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            LlmIdentifier::Gpt35Turbo => "GPT-3.5 Turbo (OpenAI)",
            LlmIdentifier::Gpt4oMini => "GPT-4o Mini (OpenAI)",
            LlmIdentifier::Gpt5 => "GPT-5 (OpenAI)",
            LlmIdentifier::Gpt5Mini => "GPT-5 Mini (OpenAI)",
            LlmIdentifier::Gpt5Nano => "GPT-5 Nano (OpenAI)",
            LlmIdentifier::Sonnet4 => "Claude Sonnet 4 (Anthropic)",
            LlmIdentifier::Gemini25Flash => "Gemini 2.5 Flash (Google)",
        }
    }

    /// Price in dollars per one million tokens.
    pub fn cost(&self) -> LlmCost {
        let (input, output) = match self {
            LlmIdentifier::Gpt35Turbo => (0.5, 1.5),
            LlmIdentifier::Gpt4oMini => (0.15, 0.60),
            LlmIdentifier::Gpt5 => (1.25, 10.0),
            LlmIdentifier::Gpt5Mini => (0.25, 2.00),
            LlmIdentifier::Gpt5Nano => (0.05, 0.40),
            LlmIdentifier::Sonnet4 => (3.0, 15.0),
            LlmIdentifier::Gemini25Flash => (0.30, 2.50),
        };
        LlmCost { input, output }
    }
}

/// Parses a wire name, ignoring case.
impl FromStr for LlmIdentifier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|llm| llm.wire_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(LlmIdentifier::wire_name).collect();
                format!("unknown model '{}', expected one of {}", s, names.join(", "))
            })
    }
}

/// Dollars per one million input and output tokens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LlmCost {
    pub input: f64,
    pub output: f64,
}

impl LlmCost {
    /// Dollar cost for the given token counts.
    pub fn estimate(&self, tokens_in: u64, tokens_out: u64) -> f64 {
        (tokens_in as f64 * self.input + tokens_out as f64 * self.output) / 1_000_000.0
    }
}

/// Target logic formalism. Prolog is the only one the backend generates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Formalism {
    #[default]
    #[serde(rename = "PROLOG")]
    Prolog,
}

impl Formalism {
    pub fn display_name(&self) -> &'static str {
        match self {
            Formalism::Prolog => "Prolog",
        }
    }
}
