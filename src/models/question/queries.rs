use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::errors::AppError;
use super::types::{NewQuestion, Question};

/// Create a question. Rejects empty text and an `end_date` before `pub_date`.
pub async fn create(pool: &SqlitePool, new: &NewQuestion) -> Result<i64, AppError> {
    let errors = new.validate();
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let result = sqlx::query(
        "INSERT INTO questions (question_text, pub_date, end_date) VALUES (?, ?, ?)",
    )
    .bind(new.question_text.trim())
    .bind(new.pub_date)
    .bind(new.end_date)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Question>, AppError> {
    let question = sqlx::query_as::<_, Question>(
        "SELECT id, question_text, pub_date, end_date FROM questions WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(question)
}

/// Latest questions published at or before `now`, newest first.
pub async fn find_latest_published(
    pool: &SqlitePool,
    now: DateTime<Utc>,
    limit: i64,
) -> Result<Vec<Question>, AppError> {
    let questions = sqlx::query_as::<_, Question>(
        "SELECT id, question_text, pub_date, end_date \
         FROM questions \
         WHERE pub_date <= ? \
         ORDER BY pub_date DESC, id DESC \
         LIMIT ?",
    )
    .bind(now)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(questions)
}

/// Delete a question together with its choices and their votes.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM questions WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn count(pool: &SqlitePool) -> Result<i64, AppError> {
    let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM questions")
        .fetch_one(pool)
        .await?;
    Ok(n)
}
