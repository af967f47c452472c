use sqlx::SqlitePool;

use crate::auth::validate;
use crate::errors::AppError;
use super::types::{NewUser, User};

const SELECT_USER: &str = "SELECT id, username, password, created_at FROM users";

/// Find user by username for authentication. Returns internal User with password hash.
pub async fn find_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>, AppError> {
    let sql = format!("{SELECT_USER} WHERE username = ?");
    let user = sqlx::query_as::<_, User>(&sql)
        .bind(username)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>, AppError> {
    let sql = format!("{SELECT_USER} WHERE id = ?");
    let user = sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn create(pool: &SqlitePool, new: &NewUser) -> Result<i64, AppError> {
    if let Some(err) = validate::validate_username(&new.username) {
        return Err(AppError::Validation(vec![err]));
    }

    let result = sqlx::query("INSERT INTO users (username, password) VALUES (?, ?)")
        .bind(new.username.trim())
        .bind(&new.password)
        .execute(pool)
        .await?;
    Ok(result.last_insert_rowid())
}

pub async fn count(pool: &SqlitePool) -> Result<i64, AppError> {
    let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    Ok(n)
}
