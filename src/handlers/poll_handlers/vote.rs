use actix_session::Session;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use sqlx::SqlitePool;

use crate::auth::csrf;
use crate::auth::session::get_user_id;
use crate::errors::{AppError, see_other};
use crate::models::user;
use crate::models::vote::{self, VoteForm};
use super::helpers;

/// Record the signed-in user's vote. Runs behind `require_auth`. A session
/// whose user no longer exists is dropped and sent back to the login page.
pub async fn vote(
    pool: web::Data<SqlitePool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Form<VoteForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let user_id = get_user_id(&session)
        .ok_or_else(|| AppError::Session("Not authenticated".to_string()))?;
    let Some(voter) = user::find_by_id(&pool, user_id).await? else {
        log::warn!("Session refers to missing user {user_id}, logging out");
        session.purge();
        return Ok(see_other("/login"));
    };
    let question_id = path.into_inner();

    let Some(question) = helpers::find_open_question(&pool, &session, question_id, Utc::now()).await? else {
        return Ok(see_other("/"));
    };

    let outcome = match form.choice_id() {
        Some(choice_id) => vote::cast(&pool, voter.id, question.id, choice_id).await,
        None => Err(AppError::InvalidChoice),
    };

    match outcome {
        Ok(outcome) => {
            log::debug!("{} holds vote {} on question {question_id}", voter.username, outcome.vote_id());
            Ok(see_other(&format!("/{question_id}/results/")))
        }
        Err(AppError::InvalidChoice) => {
            helpers::render_detail(&pool, &session, question, voter.id, Some(helpers::MSG_NO_CHOICE)).await
        }
        Err(e) => Err(e),
    }
}
