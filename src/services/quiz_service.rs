use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::models::question::QuizQuestion;

pub const QUESTION_COUNT: usize = 5;

static OPEN_FENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```[A-Za-z0-9_+\-]*[ \t]*\r?\n?").unwrap());
static CLOSE_FENCE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r?\n?```\s*$").unwrap());

pub fn build_prompt(topic: &str) -> String {
    format!(
        "Create {count} multiple-choice quiz questions about \"{topic}\".\n\
         Format as JSON array with no markdown formatting, just raw JSON.\n\
         Please include the letters A, B, C, and D with a colon and space at the beginning of each answer respectively:\n\
         [{{ \"question\": \"string\", \"options\": [\"A\",\"B\",\"C\",\"D\"], \"answer\": \"A\" }}]",
        count = QUESTION_COUNT,
        topic = topic,
    )
}

/// Strips markdown code fences the provider sometimes wraps around its JSON.
///
/// Fences are removed by pattern, not matched structurally: unbalanced or
/// repeated fences are stripped best-effort. Text that does not start with a
/// fence is only trimmed.
pub fn sanitize(raw: &str) -> String {
    let trimmed = raw.trim();
    if !trimmed.starts_with("```") {
        return trimmed.to_string();
    }
    let without_close = CLOSE_FENCE_RE.replace(trimmed, "");
    OPEN_FENCE_RE
        .replace_all(&without_close, "")
        .trim()
        .to_string()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum QuizPayload {
    Bare(Vec<QuizQuestion>),
    Wrapped { questions: Vec<QuizQuestion> },
}

pub fn parse_quiz(cleaned: &str) -> Result<Vec<QuizQuestion>> {
    // Parse to a Value first so the error reports JSON syntax, not the untagged enum
    let value: serde_json::Value =
        serde_json::from_str(cleaned).map_err(|source| malformed(cleaned, source))?;
    let payload: QuizPayload =
        serde_json::from_value(value).map_err(|source| malformed(cleaned, source))?;

    Ok(match payload {
        QuizPayload::Bare(questions) | QuizPayload::Wrapped { questions } => questions,
    })
}

fn malformed(text: &str, source: serde_json::Error) -> Error {
    Error::MalformedQuiz {
        text: text.to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ONE_QUESTION: &str =
        r#"[{"question":"Q1","options":["A: x","B: y","C: z","D: w"],"answer":"A"}]"#;

    // Bodies lean on backticks and JSON punctuation so fence runs of every length show up
    fn fenced_text() -> impl Strategy<Value = String> {
        (
            "(json|JSON|rust|[a-z]{0,6})",
            "[ \t]{0,2}\n?",
            "(`{1,4}|[a-z0-9 \n{}\\[\\]\",:]){0,40}",
            "(\n?```)?[ \n]{0,2}",
        )
            .prop_map(|(tag, gap, body, close)| format!("```{}{}{}{}", tag, gap, body, close))
    }

    fn provider_text() -> impl Strategy<Value = String> {
        prop_oneof![
            "\\PC*",
            fenced_text(),
            fenced_text().prop_map(|t| format!("  \n{}", t)),
        ]
    }

    proptest! {
        #[test]
        fn sanitize_is_idempotent(content in provider_text()) {
            let once = sanitize(&content);
            prop_assert_eq!(sanitize(&once), once);
        }

        #[test]
        fn fenced_text_loses_every_fence(content in fenced_text()) {
            prop_assert!(!sanitize(&content).contains("```"));
        }

        #[test]
        fn prompt_embeds_topic(topic in "[a-zA-Z0-9 ]{1,40}") {
            let prompt = build_prompt(&topic);
            let quoted = format!("\"{}\"", topic);
            prop_assert!(prompt.contains(&quoted));
        }
    }

    #[test]
    fn prompt_requests_five_questions_as_raw_json() {
        let prompt = build_prompt("history");
        assert!(prompt.starts_with("Create 5 multiple-choice quiz questions about \"history\"."));
        assert!(prompt.contains("no markdown formatting, just raw JSON"));
        assert!(prompt.contains(r#""options": ["A","B","C","D"]"#));
        assert!(prompt.contains(r#""answer": "A""#));
    }

    #[test]
    fn sanitize_strips_tagged_fence() {
        assert_eq!(sanitize("```json\n[1,2]\n```"), "[1,2]");
    }

    #[test]
    fn sanitize_passes_clean_text_through() {
        assert_eq!(sanitize("[1,2]"), "[1,2]");
        assert_eq!(sanitize("  [1,2]\n"), "[1,2]");
    }

    #[test]
    fn sanitize_strips_bare_fence() {
        assert_eq!(sanitize("```\n[1,2]\n```"), "[1,2]");
        assert_eq!(sanitize("```[1,2]```"), "[1,2]");
    }

    #[test]
    fn sanitize_tolerates_unbalanced_fences() {
        assert_eq!(sanitize("```json\n[1,2]"), "[1,2]");
        assert_eq!(sanitize("```json\n```json\n[1,2]\n```\n```"), "[1,2]");
    }

    #[test]
    fn sanitize_leaves_inner_backticks_when_not_fenced() {
        let text = "[{\"question\":\"What does ``` mean?\"}]";
        assert_eq!(sanitize(text), text);
    }

    #[test]
    fn parse_quiz_reads_single_question() {
        let quiz = parse_quiz(ONE_QUESTION).unwrap();
        assert_eq!(
            quiz,
            vec![QuizQuestion {
                question: Some("Q1".into()),
                options: Some(vec![
                    "A: x".into(),
                    "B: y".into(),
                    "C: z".into(),
                    "D: w".into(),
                ]),
                answer: Some("A".into()),
                ..Default::default()
            }]
        );
    }

    #[test]
    fn parse_quiz_accepts_wrapped_object() {
        let wrapped = format!(r#"{{"questions":{}}}"#, ONE_QUESTION);
        assert_eq!(parse_quiz(&wrapped).unwrap().len(), 1);
    }

    #[test]
    fn parse_quiz_relays_output_unchanged() {
        let raw = concat!(
            r#"[{"question":"Q1","options":["A: x","B: y","C: z","D: w"],"answer":"A","#,
            r#""difficulty":"easy","explanation":"why"},"#,
            r#"{"question":"Q2","hint":"think"}]"#
        );
        let quiz = parse_quiz(raw).unwrap();
        assert_eq!(serde_json::to_string(&quiz).unwrap(), raw);
    }

    #[test]
    fn parse_quiz_passes_missing_fields_through() {
        let quiz = parse_quiz(r#"[{"question":"Q1"}]"#).unwrap();
        assert_eq!(quiz[0].question.as_deref(), Some("Q1"));
        assert!(quiz[0].options.is_none());
        assert!(quiz[0].answer.is_none());
    }

    #[test]
    fn parse_quiz_accepts_null_fields() {
        let quiz = parse_quiz(r#"[{"question":"Q","answer":null}]"#).unwrap();
        assert_eq!(serde_json::to_string(&quiz).unwrap(), r#"[{"question":"Q"}]"#);
    }

    #[test]
    fn parse_quiz_rejects_non_json() {
        let err = parse_quiz("not json").unwrap_err();
        assert!(matches!(err, Error::MalformedQuiz { ref text, .. } if text == "not json"));
    }

    #[test]
    fn parse_quiz_rejects_wrong_shape() {
        assert!(matches!(parse_quiz("[1,2]"), Err(Error::MalformedQuiz { .. })));
        assert!(matches!(parse_quiz(r#"{"quiz":[]}"#), Err(Error::MalformedQuiz { .. })));
    }

    #[test]
    fn fenced_output_parses_after_sanitize() {
        let raw = format!("```json\n{}\n```", ONE_QUESTION);
        assert_eq!(parse_quiz(&sanitize(&raw)).unwrap().len(), 1);
    }
}
