use sqlx::{SqliteExecutor, SqlitePool};

use crate::auth::validate;
use crate::errors::AppError;
use crate::models::question::MAX_TEXT_LEN;
use super::types::{Choice, ChoiceResult};

pub async fn create(pool: &SqlitePool, question_id: i64, choice_text: &str) -> Result<i64, AppError> {
    if let Some(err) = validate::validate_required(choice_text, "Choice text", MAX_TEXT_LEN) {
        return Err(AppError::Validation(vec![err]));
    }

    let result = sqlx::query("INSERT INTO choices (question_id, choice_text) VALUES (?, ?)")
        .bind(question_id)
        .bind(choice_text.trim())
        .execute(pool)
        .await?;
    Ok(result.last_insert_rowid())
}

pub async fn find_for_question(pool: &SqlitePool, question_id: i64) -> Result<Vec<Choice>, AppError> {
    let choices = sqlx::query_as::<_, Choice>(
        "SELECT id, question_id, choice_text FROM choices WHERE question_id = ? ORDER BY id",
    )
    .bind(question_id)
    .fetch_all(pool)
    .await?;
    Ok(choices)
}

/// Find a choice only if it belongs to the given question. Takes any executor
/// so it can run inside a vote transaction.
pub async fn find_in_question<'e, E>(
    executor: E,
    question_id: i64,
    choice_id: i64,
) -> Result<Option<Choice>, AppError>
where
    E: SqliteExecutor<'e>,
{
    let choice = sqlx::query_as::<_, Choice>(
        "SELECT id, question_id, choice_text FROM choices WHERE id = ? AND question_id = ?",
    )
    .bind(choice_id)
    .bind(question_id)
    .fetch_optional(executor)
    .await?;
    Ok(choice)
}

/// Every choice of a question with the number of votes it holds.
pub async fn results_for_question(
    pool: &SqlitePool,
    question_id: i64,
) -> Result<Vec<ChoiceResult>, AppError> {
    let results = sqlx::query_as::<_, ChoiceResult>(
        "SELECT c.id, c.choice_text, COUNT(v.id) AS votes \
         FROM choices c \
         LEFT JOIN votes v ON v.choice_id = c.id \
         WHERE c.question_id = ? \
         GROUP BY c.id, c.choice_text \
         ORDER BY c.id",
    )
    .bind(question_id)
    .fetch_all(pool)
    .await?;
    Ok(results)
}
