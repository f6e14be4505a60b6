use async_trait::async_trait;
use sqlx::{Sqlite, SqlitePool, Transaction};

use super::SessionStore;
use crate::database::{pool::create_pool, schema::create_schema};
use crate::error::{Error, Result};
use crate::models::answered_record::AnsweredRecord;

/// Session store backed by the `quiz_state` and `answers` tables.
#[derive(Clone, Debug)]
pub struct SqliteSessionStore {
    pool: SqlitePool,
}

fn to_u32(field: &'static str, value: i64) -> Result<u32> {
    u32::try_from(value).map_err(|_| Error::Internal(format!("invalid {}: {}", field, value)))
}

fn unique_violation_as_conflict(err: sqlx::Error, what: String) -> Error {
    match &err {
        // 1555 and 2067 are SQLite's primary-key and unique constraint codes.
        sqlx::Error::Database(db)
            if db.is_unique_violation()
                || matches!(db.code().as_deref(), Some("1555") | Some("2067")) =>
        {
            Error::Conflict(what)
        }
        _ => Error::Database(err),
    }
}

impl SqliteSessionStore {
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = create_pool(database_url).await?;
        create_schema(&pool).await?;
        Ok(Self { pool })
    }

    async fn progress_in(tx: &mut Transaction<'_, Sqlite>, token: &str) -> Result<Option<u32>> {
        let progress: Option<i64> =
            sqlx::query_scalar("SELECT current_index FROM quiz_state WHERE quiz_id = ?1")
                .bind(token)
                .fetch_optional(&mut **tx)
                .await?;
        progress.map(|p| to_u32("current_index", p)).transpose()
    }

    async fn insert_answer(
        tx: &mut Transaction<'_, Sqlite>,
        token: &str,
        record: &AnsweredRecord,
    ) -> Result<()> {
        sqlx::query(
            r#"INSERT INTO answers (quiz_id, question_index, user_answer, correct_answer, difficulty)
               VALUES (?1, ?2, ?3, ?4, ?5)"#,
        )
        .bind(token)
        .bind(i64::from(record.question_index))
        .bind(&record.user_answer)
        .bind(&record.correct_answer)
        .bind(&record.difficulty)
        .execute(&mut **tx)
        .await
        .map_err(|e| {
            unique_violation_as_conflict(
                e,
                format!("question {} already answered", record.question_index),
            )
        })?;
        Ok(())
    }
}

#[async_trait]
impl SessionStore for SqliteSessionStore {
    async fn create(&self, token: &str) -> Result<()> {
        sqlx::query("INSERT INTO quiz_state (quiz_id, current_index) VALUES (?1, 0)")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(|e| unique_violation_as_conflict(e, "session token already in use".to_string()))?;
        Ok(())
    }

    async fn get_progress(&self, token: &str) -> Result<u32> {
        let progress: Option<i64> =
            sqlx::query_scalar("SELECT current_index FROM quiz_state WHERE quiz_id = ?1")
                .bind(token)
                .fetch_optional(&self.pool)
                .await?;
        match progress {
            Some(p) => to_u32("current_index", p),
            None => Err(Error::SessionNotFound),
        }
    }

    async fn set_progress(&self, token: &str, progress: u32) -> Result<()> {
        let result = sqlx::query("UPDATE quiz_state SET current_index = ?1 WHERE quiz_id = ?2")
            .bind(i64::from(progress))
            .bind(token)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::SessionNotFound);
        }
        Ok(())
    }

    async fn append_answer(&self, token: &str, record: AnsweredRecord) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        if Self::progress_in(&mut tx, token).await?.is_none() {
            return Err(Error::SessionNotFound);
        }
        Self::insert_answer(&mut tx, token, &record).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn list_answers(&self, token: &str) -> Result<Vec<AnsweredRecord>> {
        let mut tx = self.pool.begin().await?;
        if Self::progress_in(&mut tx, token).await?.is_none() {
            return Err(Error::SessionNotFound);
        }
        let rows: Vec<(i64, String, String, String)> = sqlx::query_as(
            r#"SELECT question_index, user_answer, correct_answer, difficulty
               FROM answers WHERE quiz_id = ?1 ORDER BY question_index ASC"#,
        )
        .bind(token)
        .fetch_all(&mut *tx)
        .await?;
        tx.commit().await?;

        rows.into_iter()
            .map(|(index, user_answer, correct_answer, difficulty)| {
                Ok(AnsweredRecord {
                    question_index: to_u32("question_index", index)?,
                    user_answer,
                    correct_answer,
                    difficulty,
                })
            })
            .collect()
    }

    async fn record_answer(&self, token: &str, record: AnsweredRecord) -> Result<u32> {
        let mut tx = self.pool.begin().await?;
        let advanced = sqlx::query(
            r#"UPDATE quiz_state SET current_index = current_index + 1
               WHERE quiz_id = ?1 AND current_index = ?2"#,
        )
        .bind(token)
        .bind(i64::from(record.question_index))
        .execute(&mut *tx)
        .await?;

        if advanced.rows_affected() == 0 {
            return match Self::progress_in(&mut tx, token).await? {
                None => Err(Error::SessionNotFound),
                Some(found) => Err(Error::Conflict(format!(
                    "expected progress {}, found {}",
                    record.question_index, found
                ))),
            };
        }

        Self::insert_answer(&mut tx, token, &record).await?;
        tx.commit().await?;
        Ok(record.question_index + 1)
    }
}
