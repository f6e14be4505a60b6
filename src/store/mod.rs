use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{Config, SessionBackend};
use crate::error::Result;
use crate::models::answered_record::AnsweredRecord;

pub mod memory;
pub mod sqlite;

pub use memory::InMemorySessionStore;
pub use sqlite::SqliteSessionStore;

/// Per-token progress and answer log.
///
/// Every operation on an unknown token fails with `Error::SessionNotFound`.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Registers `token` with progress 0 and an empty log.
    async fn create(&self, token: &str) -> Result<()>;

    async fn get_progress(&self, token: &str) -> Result<u32>;

    async fn set_progress(&self, token: &str, progress: u32) -> Result<()>;

    /// Fails with `Error::Conflict` if the index was already answered.
    async fn append_answer(&self, token: &str, record: AnsweredRecord) -> Result<()>;

    /// Answers in ascending question-index order.
    async fn list_answers(&self, token: &str) -> Result<Vec<AnsweredRecord>>;

    /// Appends `record` and moves progress to `record.question_index + 1` as one
    /// unit, provided progress still equals `record.question_index`.
    /// Returns the new progress.
    async fn record_answer(&self, token: &str, record: AnsweredRecord) -> Result<u32>;
}

pub async fn from_config(config: &Config) -> Result<Arc<dyn SessionStore>> {
    let store: Arc<dyn SessionStore> = match config.session_backend {
        SessionBackend::Memory => Arc::new(InMemorySessionStore::new()),
        SessionBackend::Sqlite => Arc::new(SqliteSessionStore::connect(&config.database_url).await?),
    };
    tracing::info!(backend = ?config.session_backend, "session store ready");
    Ok(store)
}
