use sqlx::SqlitePool;

use crate::errors::AppError;
use crate::models::choice;
use super::types::{Vote, VoteOutcome};

const SELECT_USER_VOTE_IN_QUESTION: &str = "\
    SELECT v.id, v.choice_id, v.user_id \
    FROM votes v \
    JOIN choices c ON c.id = v.choice_id \
    WHERE v.user_id = ? AND c.question_id = ? \
    ORDER BY v.id \
    LIMIT 1";

/// The user's vote among all choices of the question, if any.
pub async fn find_for_user_in_question(
    pool: &SqlitePool,
    user_id: i64,
    question_id: i64,
) -> Result<Option<Vote>, AppError> {
    let vote = sqlx::query_as::<_, Vote>(SELECT_USER_VOTE_IN_QUESTION)
        .bind(user_id)
        .bind(question_id)
        .fetch_optional(pool)
        .await?;
    Ok(vote)
}

/// Record the user's vote for `choice_id` on `question_id`, replacing any
/// earlier vote the user cast on that question.
///
/// Returns `AppError::InvalidChoice` without touching any row when the choice
/// does not belong to the question.
pub async fn cast(
    pool: &SqlitePool,
    user_id: i64,
    question_id: i64,
    choice_id: i64,
) -> Result<VoteOutcome, AppError> {
    let mut tx = pool.begin().await?;

    if choice::find_in_question(&mut *tx, question_id, choice_id).await?.is_none() {
        return Err(AppError::InvalidChoice);
    }

    let existing = sqlx::query_as::<_, Vote>(SELECT_USER_VOTE_IN_QUESTION)
        .bind(user_id)
        .bind(question_id)
        .fetch_optional(&mut *tx)
        .await?;

    let outcome = match existing {
        Some(vote) if vote.choice_id == choice_id => VoteOutcome::Unchanged(vote.id),
        Some(vote) => {
            sqlx::query("UPDATE votes SET choice_id = ? WHERE id = ?")
                .bind(choice_id)
                .bind(vote.id)
                .execute(&mut *tx)
                .await?;
            VoteOutcome::Changed { vote_id: vote.id, from: vote.choice_id, to: choice_id }
        }
        None => {
            let result = sqlx::query("INSERT INTO votes (choice_id, user_id) VALUES (?, ?)")
                .bind(choice_id)
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
            VoteOutcome::Created(result.last_insert_rowid())
        }
    };

    tx.commit().await?;
    log::info!("User {user_id} voted on question {question_id}: {outcome:?}");
    Ok(outcome)
}

/// Total votes across every choice of the question.
pub async fn count_for_question(pool: &SqlitePool, question_id: i64) -> Result<i64, AppError> {
    let (n,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM votes v JOIN choices c ON c.id = v.choice_id WHERE c.question_id = ?",
    )
    .bind(question_id)
    .fetch_one(pool)
    .await?;
    Ok(n)
}
