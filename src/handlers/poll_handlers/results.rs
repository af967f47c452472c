use actix_session::Session;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use sqlx::SqlitePool;

use crate::auth::session::set_flash;
use crate::errors::{AppError, render, see_other};
use crate::models::{choice, question};
use crate::templates_structs::{PageContext, ResultsTemplate};
use super::helpers::{MSG_NOT_FOUND, MSG_RESULTS_UNAVAILABLE};

pub async fn results(
    pool: web::Data<SqlitePool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let now = Utc::now();

    let Some(question) = question::find_by_id(&pool, path.into_inner()).await? else {
        set_flash(&session, MSG_NOT_FOUND);
        return Ok(see_other("/"));
    };
    if !question.is_published(now) {
        set_flash(&session, MSG_RESULTS_UNAVAILABLE);
        return Ok(see_other("/"));
    }

    let results = choice::results_for_question(&pool, question.id).await?;
    let total_votes: i64 = results.iter().map(|r| r.votes).sum();

    let tmpl = ResultsTemplate {
        ctx: PageContext::build(&session),
        can_vote: question.can_vote(now),
        question,
        results,
        total_votes,
    };
    render(tmpl)
}
