use std::path::Path;
use std::str::FromStr;

use chrono::{Duration, Utc};
use serde::Deserialize;
use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

use crate::auth::password;
use crate::errors::AppError;
use crate::models::{choice, question, user};
use crate::models::question::NewQuestion;
use crate::models::user::NewUser;

pub static MIGRATOR: Migrator = sqlx::migrate!();

const DEMO_SEED: &str = include_str!("../data/seed/polls.json");

pub const ADMIN_USERNAME: &str = "admin";

/// Directory holding a file-backed SQLite database, so it can be created
/// before connecting. `None` for in-memory databases or bare file names.
pub fn database_dir(database_url: &str) -> Option<&Path> {
    let path = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() || path.contains(":memory:") {
        return None;
    }
    Path::new(path).parent().filter(|p| !p.as_os_str().is_empty())
}

pub async fn init_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let mut options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    if !database_url.contains(":memory:") {
        options = options.journal_mode(SqliteJournalMode::Wal);
    }
    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), AppError> {
    MIGRATOR.run(pool).await?;
    log::info!("Database migrations complete");
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct SeedPayload {
    pub questions: Vec<SeedQuestion>,
}

/// A demo question scheduled relative to the moment of seeding.
#[derive(Debug, Deserialize)]
pub struct SeedQuestion {
    pub question_text: String,
    pub pub_offset_days: i64,
    pub end_offset_days: Option<i64>,
    pub choices: Vec<String>,
}

/// Create the admin user if no user exists yet.
pub async fn seed_admin(pool: &SqlitePool, admin_password: &str) -> Result<(), AppError> {
    let existing = user::count(pool).await?;
    if existing > 0 {
        log::info!("Database already has {existing} users, skipping admin seed");
        return Ok(());
    }
    let hash = password::hash_password(admin_password)?;
    user::create(pool, &NewUser { username: ADMIN_USERNAME.to_string(), password: hash }).await?;
    log::info!("Seeded '{ADMIN_USERNAME}' user");
    Ok(())
}

/// Insert the given questions and choices unless questions already exist.
/// Returns how many questions were created.
pub async fn seed_questions(pool: &SqlitePool, payload: &SeedPayload) -> Result<usize, AppError> {
    let existing = question::count(pool).await?;
    if existing > 0 {
        log::info!("Database already has {existing} questions, skipping demo seed");
        return Ok(0);
    }

    let now = Utc::now();
    let mut created = 0;
    for seed in &payload.questions {
        let new = NewQuestion {
            question_text: seed.question_text.clone(),
            pub_date: now + Duration::days(seed.pub_offset_days),
            end_date: seed.end_offset_days.map(|d| now + Duration::days(d)),
        };
        let question_id = match question::create(pool, &new).await {
            Ok(id) => id,
            Err(e) => {
                log::warn!("Seed question '{}' skipped: {e}", seed.question_text);
                continue;
            }
        };
        for text in &seed.choices {
            choice::create(pool, question_id, text).await?;
        }
        created += 1;
    }
    log::info!("Seeded {created} demo questions");
    Ok(created)
}

/// Seed the bundled demo questions.
pub async fn seed_demo(pool: &SqlitePool) -> Result<usize, AppError> {
    let payload: SeedPayload = serde_json::from_str(DEMO_SEED)
        .map_err(|e| AppError::Validation(vec![format!("Bad demo seed JSON: {e}")]))?;
    seed_questions(pool, &payload).await
}
