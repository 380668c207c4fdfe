// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{delete, get, post},
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    docs,
    error,
    handlers::{categories, questions, quiz},
    state::AppState,
};

/// Builds the CORS policy. An empty origin list allows any origin.
fn cors_layer(origins: &[HeaderValue]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins.iter().cloned())
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Assembles the main application router.
///
/// * Registers the category, question and quiz routes.
/// * Answers unknown paths and methods with the JSON error body.
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (Database Pool, Config).
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_allowed_origins);

    Router::new()
        .route("/categories", get(categories::list_categories))
        .route(
            "/categories/{id}/questions",
            get(categories::questions_by_category),
        )
        .route(
            "/questions",
            get(questions::list_questions).post(questions::post_questions),
        )
        .route("/questions/{id}", delete(questions::delete_question))
        .route("/quizzes", post(quiz::next_question))
        .route("/openapi.json", get(docs::openapi_json))
        .fallback(error::not_found)
        .method_not_allowed_fallback(error::method_not_allowed)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
