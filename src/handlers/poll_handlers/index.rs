use actix_session::Session;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use sqlx::SqlitePool;

use crate::errors::{AppError, render};
use crate::models::question;
use crate::templates_structs::{IndexTemplate, PageContext, QuestionRow};

/// How many questions the index shows.
pub const LATEST_LIMIT: i64 = 5;

pub async fn index(
    pool: web::Data<SqlitePool>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let now = Utc::now();
    let questions = question::find_latest_published(&pool, now, LATEST_LIMIT).await?;

    let tmpl = IndexTemplate {
        ctx: PageContext::build(&session),
        latest_question_list: questions.iter().map(|q| QuestionRow::new(q, now)).collect(),
    };
    render(tmpl)
}
