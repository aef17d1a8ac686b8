pub mod health;
pub mod quiz;

use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::AppState;

/// Full application: JSON API plus the static front-end served from `static_dir`.
pub fn router(state: AppState, static_dir: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_origin(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/api/quiz", post(quiz::generate_quiz))
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
