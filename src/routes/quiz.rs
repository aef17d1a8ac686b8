use axum::{extract::State, response::IntoResponse, Json};
use validator::Validate;

use crate::dto::quiz_dto::{QuizRequest, QuizResponse};
use crate::error::{Error, Result, MSG_NO_TOPIC};
use crate::services::quiz_service::{build_prompt, parse_quiz, sanitize};
use crate::AppState;

/// `POST /api/quiz`: one linear pass, no retries. Any body that does not
/// carry a topic (missing, empty, not JSON) is a 400.
#[axum::debug_handler]
pub async fn generate_quiz(
    State(state): State<AppState>,
    payload: Option<Json<QuizRequest>>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload.unwrap_or_default();
    payload
        .validate()
        .map_err(|_| Error::BadRequest(MSG_NO_TOPIC.to_string()))?;
    let topic = payload
        .topic
        .ok_or_else(|| Error::BadRequest(MSG_NO_TOPIC.to_string()))?;

    tracing::info!(topic = %topic, "Generating quiz");
    let prompt = build_prompt(&topic);

    let raw_text = match tokio::time::timeout(
        state.generation_timeout,
        state.generator.generate(&prompt),
    )
    .await
    {
        Ok(res) => res?,
        Err(_) => {
            return Err(Error::ExternalApi(format!(
                "generation timed out after {:?}",
                state.generation_timeout
            )))
        }
    };

    let cleaned = sanitize(&raw_text);
    let questions = parse_quiz(&cleaned)?;
    tracing::info!(count = questions.len(), "Quiz generated");

    Ok(Json(QuizResponse { questions }))
}
