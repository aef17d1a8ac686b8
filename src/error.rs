use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

pub const MSG_NO_TOPIC: &str = "No topic provided";
pub const MSG_GENERATION_FAILED: &str = "Failed to generate quiz";
pub const MSG_EMPTY_RESPONSE: &str = "No text returned from API";
pub const MSG_MALFORMED_QUIZ: &str = "Failed to parse quiz JSON";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Provider returned no text")]
    EmptyResponse,

    #[error("Malformed quiz JSON: {source}")]
    MalformedQuiz {
        text: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, error_message) = match &self {
            Error::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Error::ExternalApi(_) | Error::Http(_) => {
                tracing::error!(error = %self, "API error");
                (StatusCode::INTERNAL_SERVER_ERROR, MSG_GENERATION_FAILED.to_string())
            }
            Error::EmptyResponse => {
                tracing::error!("Provider returned an empty response");
                (StatusCode::INTERNAL_SERVER_ERROR, MSG_EMPTY_RESPONSE.to_string())
            }
            Error::MalformedQuiz { text, source } => {
                tracing::error!(error = %source, cleaned_text = %text, "Failed to parse quiz JSON");
                (StatusCode::INTERNAL_SERVER_ERROR, MSG_MALFORMED_QUIZ.to_string())
            }
            _ => {
                tracing::error!(error = %self, "Unexpected error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
