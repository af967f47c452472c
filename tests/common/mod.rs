//! Shared test infrastructure.
//!
//! `setup_test_db()` gives every test its own in-memory SQLite database with
//! migrations applied. The fixtures mirror how an administrator would set up
//! polls: a question scheduled `days` away from now, then its choices.
#![allow(dead_code)]

use chrono::{Duration, Utc};
use sqlx::SqlitePool;

use polls::auth::password;
use polls::db;
use polls::models::question::NewQuestion;
use polls::models::user::NewUser;
use polls::models::{choice, question, user};

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const TEST_USER: &str = "test_user";
pub const TEST_PASS: &str = "secret";

// ============================================================================
// DATABASE SETUP
// ============================================================================

pub struct TestDb {
    pool: SqlitePool,
}

impl TestDb {
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// A single-connection pool, since each in-memory connection is its own database.
pub async fn setup_test_db() -> TestDb {
    let pool = db::init_pool("sqlite::memory:", 1)
        .await
        .expect("Failed to open test DB");
    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    TestDb { pool }
}

// ============================================================================
// FIXTURES
// ============================================================================

/// Create a question published `days` from now (negative for the past) with
/// no end date.
pub async fn create_question(pool: &SqlitePool, text: &str, days: i64) -> i64 {
    let new = NewQuestion {
        question_text: text.to_string(),
        pub_date: Utc::now() + Duration::days(days),
        end_date: None,
    };
    question::create(pool, &new).await.expect("create question")
}

/// Create a question whose voting window runs from `pub_days` to `end_days`
/// relative to now.
pub async fn create_scheduled_question(pool: &SqlitePool, text: &str, pub_days: i64, end_days: i64) -> i64 {
    let now = Utc::now();
    let new = NewQuestion {
        question_text: text.to_string(),
        pub_date: now + Duration::days(pub_days),
        end_date: Some(now + Duration::days(end_days)),
    };
    question::create(pool, &new).await.expect("create scheduled question")
}

pub async fn create_choice(pool: &SqlitePool, question_id: i64, text: &str) -> i64 {
    choice::create(pool, question_id, text).await.expect("create choice")
}

pub async fn create_user(pool: &SqlitePool, username: &str, pass: &str) -> i64 {
    let hash = password::hash_password(pass).expect("hash password");
    user::create(pool, &NewUser { username: username.to_string(), password: hash })
        .await
        .expect("create user")
}
