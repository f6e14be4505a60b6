use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::AppState;

pub mod browser;
pub mod extract;
pub mod health;
pub mod quiz;

pub fn router(state: AppState) -> Router {
    let base_routes = Router::new().route("/health", get(health::health));

    let quiz_api = Router::new()
        .route("/api/quiz/start", post(quiz::start_quiz))
        .route("/api/quiz/:token", get(quiz::get_current_question))
        .route("/api/quiz/:token/state", get(quiz::get_state))
        .route("/api/quiz/:token/answer", post(quiz::submit_answer))
        .route(
            "/api/quiz/:token/summary",
            get(quiz::get_summary).post(quiz::finish_quiz),
        );

    let pages = Router::new()
        .route("/", get(browser::start_page))
        .route("/q", get(browser::question_page))
        .route("/next", post(browser::next_page))
        .route(
            "/end",
            get(browser::summary_page).post(browser::finish_page),
        );

    base_routes
        .merge(quiz_api)
        .merge(pages)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
