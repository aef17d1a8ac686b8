use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::question::QuizQuestion;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct QuizRequest {
    // Relayed into the prompt verbatim; only a missing or empty topic is rejected
    #[serde(default)]
    #[validate(required, length(min = 1))]
    pub topic: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizResponse {
    pub questions: Vec<QuizQuestion>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> QuizRequest {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn topic_is_required_and_not_empty() {
        assert!(parse("{}").validate().is_err());
        assert!(parse(r#"{"topic":""}"#).validate().is_err());
        assert!(parse(r#"{"topic":null}"#).validate().is_err());
        assert!(parse(r#"{"topic":"history"}"#).validate().is_ok());
    }

    #[test]
    fn whitespace_topic_is_accepted() {
        assert!(parse(r#"{"topic":"   "}"#).validate().is_ok());
    }

    #[test]
    fn topic_is_kept_verbatim() {
        assert_eq!(
            parse(r#"{"topic":"  Rust traits "}"#).topic.as_deref(),
            Some("  Rust traits ")
        );
    }

    #[test]
    fn non_string_topic_is_rejected_at_parse() {
        assert!(serde_json::from_str::<QuizRequest>(r#"{"topic":42}"#).is_err());
    }
}
