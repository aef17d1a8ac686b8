use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// One multiple-choice question as produced by the provider.
///
/// Relayed without coercion: absent (or null) fields stay absent on the way
/// out, and keys beyond the three known ones are carried through in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    /// Conventionally four entries prefixed "A: " through "D: ".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}
