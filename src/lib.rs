pub mod catalog;
pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod utils;

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::services::quiz_service::QuizService;
use crate::store::SessionStore;
use crate::utils::cookie::CookieSigner;

#[derive(Clone)]
pub struct AppState {
    pub quiz: QuizService,
    pub cookies: CookieSigner,
}

impl AppState {
    pub fn new(catalog: Catalog, store: Arc<dyn SessionStore>, session_secret: &str) -> Self {
        let quiz = QuizService::new(Arc::new(catalog), store);
        let cookies = CookieSigner::new(session_secret);

        Self { quiz, cookies }
    }
}
