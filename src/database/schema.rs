use crate::error::Result;
use sqlx::SqlitePool;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS quiz_state (
        quiz_id       TEXT PRIMARY KEY,
        current_index INTEGER NOT NULL DEFAULT 0
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS answers (
        quiz_id        TEXT NOT NULL REFERENCES quiz_state(quiz_id),
        question_index INTEGER NOT NULL,
        user_answer    TEXT NOT NULL,
        correct_answer TEXT NOT NULL,
        difficulty     TEXT NOT NULL,
        PRIMARY KEY (quiz_id, question_index)
    )
    "#,
];

pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}
