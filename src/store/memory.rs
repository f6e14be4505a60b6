use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use super::SessionStore;
use crate::error::{Error, Result};
use crate::models::answered_record::AnsweredRecord;

#[derive(Debug, Default)]
struct SessionEntry {
    progress: u32,
    answers: Vec<AnsweredRecord>,
}

impl SessionEntry {
    fn push(&mut self, record: AnsweredRecord) -> Result<()> {
        if let Some(last) = self.answers.last() {
            if record.question_index <= last.question_index {
                return Err(Error::Conflict(format!(
                    "question {} already answered",
                    record.question_index
                )));
            }
        }
        self.answers.push(record);
        Ok(())
    }
}

/// Process-local store. Cloning shares the same underlying map.
#[derive(Clone, Debug, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<Mutex<HashMap<String, SessionEntry>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, SessionEntry>>> {
        self.sessions
            .lock()
            .map_err(|_| Error::Internal("session store mutex poisoned".to_string()))
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, token: &str) -> Result<()> {
        let mut sessions = self.lock()?;
        if sessions.contains_key(token) {
            return Err(Error::Conflict("session token already in use".to_string()));
        }
        sessions.insert(token.to_string(), SessionEntry::default());
        Ok(())
    }

    async fn get_progress(&self, token: &str) -> Result<u32> {
        let sessions = self.lock()?;
        sessions
            .get(token)
            .map(|entry| entry.progress)
            .ok_or(Error::SessionNotFound)
    }

    async fn set_progress(&self, token: &str, progress: u32) -> Result<()> {
        let mut sessions = self.lock()?;
        let entry = sessions.get_mut(token).ok_or(Error::SessionNotFound)?;
        entry.progress = progress;
        Ok(())
    }

    async fn append_answer(&self, token: &str, record: AnsweredRecord) -> Result<()> {
        let mut sessions = self.lock()?;
        let entry = sessions.get_mut(token).ok_or(Error::SessionNotFound)?;
        entry.push(record)
    }

    async fn list_answers(&self, token: &str) -> Result<Vec<AnsweredRecord>> {
        let sessions = self.lock()?;
        let entry = sessions.get(token).ok_or(Error::SessionNotFound)?;
        Ok(entry.answers.clone())
    }

    async fn record_answer(&self, token: &str, record: AnsweredRecord) -> Result<u32> {
        let mut sessions = self.lock()?;
        let entry = sessions.get_mut(token).ok_or(Error::SessionNotFound)?;
        if entry.progress != record.question_index {
            return Err(Error::Conflict(format!(
                "expected progress {}, found {}",
                record.question_index, entry.progress
            )));
        }
        let next = record.question_index + 1;
        entry.push(record)?;
        entry.progress = next;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(index: u32, answer: &str) -> AnsweredRecord {
        AnsweredRecord {
            question_index: index,
            user_answer: answer.to_string(),
            correct_answer: "A".to_string(),
            difficulty: "easy".to_string(),
        }
    }

    #[test]
    fn unknown_token_is_not_found() {
        let store = InMemorySessionStore::new();
        let err = tokio_test::block_on(store.get_progress("missing")).unwrap_err();
        assert!(matches!(err, Error::SessionNotFound));
        let err = tokio_test::block_on(store.record_answer("missing", record(0, "A"))).unwrap_err();
        assert!(matches!(err, Error::SessionNotFound));
    }

    #[test]
    fn record_answer_advances_and_rejects_stale_index() {
        let store = InMemorySessionStore::new();
        tokio_test::block_on(async {
            store.create("t").await.unwrap();
            assert_eq!(store.record_answer("t", record(0, "A")).await.unwrap(), 1);
            let err = store.record_answer("t", record(0, "B")).await.unwrap_err();
            assert!(matches!(err, Error::Conflict(_)));
            assert_eq!(store.get_progress("t").await.unwrap(), 1);
            assert_eq!(store.list_answers("t").await.unwrap(), vec![record(0, "A")]);
        });
    }

    #[test]
    fn create_refuses_existing_token() {
        let store = InMemorySessionStore::new();
        tokio_test::block_on(async {
            store.create("t").await.unwrap();
            assert!(matches!(store.create("t").await, Err(Error::Conflict(_))));
        });
    }
}
