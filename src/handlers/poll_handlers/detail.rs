use actix_session::Session;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use sqlx::SqlitePool;

use crate::auth::session::{get_user_id, login_url};
use crate::errors::{AppError, see_other};
use super::helpers;

/// Voting form. Schedule checks run before the login check so that an
/// anonymous visitor learns a poll is closed without signing in first.
pub async fn detail(
    pool: web::Data<SqlitePool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let question_id = path.into_inner();

    let Some(question) = helpers::find_open_question(&pool, &session, question_id, Utc::now()).await? else {
        return Ok(see_other("/"));
    };

    let Some(user_id) = get_user_id(&session) else {
        return Ok(see_other(&login_url(&format!("/{question_id}/"))));
    };

    helpers::render_detail(&pool, &session, question, user_id, None).await
}
