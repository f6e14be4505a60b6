#![allow(dead_code)]

use std::sync::Arc;

use axum::{body::to_bytes, response::Response, Router};
use quiz_server::{
    catalog::Catalog,
    models::question::Question,
    services::quiz_service::QuizService,
    store::{InMemorySessionStore, SessionStore, SqliteSessionStore},
    AppState,
};
use serde_json::Value as JsonValue;

pub const SECRET: &str = "test-session-secret-key";

pub fn question(text: &str, correct: &str, difficulty: &str) -> Question {
    Question {
        text: text.to_string(),
        options: vec!["A".into(), "B".into(), "C".into(), "X".into()],
        correct_answer: correct.to_string(),
        difficulty: difficulty.to_string(),
    }
}

/// Q0..Q2 with correct answers "A", "B", "C", in that order.
pub fn three_question_catalog() -> Catalog {
    Catalog::new(vec![
        question("Q0", "A", "easy"),
        question("Q1", "B", "medium"),
        question("Q2", "C", "hard"),
    ])
    .expect("catalog")
}

pub fn memory_store() -> Arc<dyn SessionStore> {
    Arc::new(InMemorySessionStore::new())
}

pub async fn sqlite_store() -> Arc<dyn SessionStore> {
    Arc::new(
        SqliteSessionStore::connect("sqlite::memory:")
            .await
            .expect("sqlite store"),
    )
}

pub fn quiz_service(store: Arc<dyn SessionStore>) -> QuizService {
    QuizService::new(Arc::new(three_question_catalog()), store)
}

pub fn app(store: Arc<dyn SessionStore>) -> Router {
    let state = AppState::new(three_question_catalog(), store, SECRET);
    quiz_server::routes::router(state)
}

pub async fn json_body(resp: Response) -> JsonValue {
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
