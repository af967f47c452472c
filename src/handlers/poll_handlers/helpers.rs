use actix_session::Session;
use actix_web::HttpResponse;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::auth::session::set_flash;
use crate::errors::{AppError, render};
use crate::models::{choice, question, vote};
use crate::models::question::{Question, QuestionStatus};
use crate::templates_structs::{DetailTemplate, PageContext};

pub const MSG_NOT_FOUND: &str = "We don't have this question.";
pub const MSG_NOT_PUBLISHED: &str = "This poll is not published.";
pub const MSG_VOTING_ENDED: &str = "Voting period has ended.";
pub const MSG_RESULTS_UNAVAILABLE: &str = "This poll is not available.";
pub const MSG_NO_CHOICE: &str = "You didn't select a choice.";

/// Load a question that is open for voting at `now`. Otherwise queue the
/// reason as a flash message and return `None`; callers redirect to the index.
pub async fn find_open_question(
    pool: &SqlitePool,
    session: &Session,
    question_id: i64,
    now: DateTime<Utc>,
) -> Result<Option<Question>, AppError> {
    let Some(question) = question::find_by_id(pool, question_id).await? else {
        set_flash(session, MSG_NOT_FOUND);
        return Ok(None);
    };
    match question.status(now) {
        QuestionStatus::Open => Ok(Some(question)),
        QuestionStatus::Scheduled => {
            set_flash(session, MSG_NOT_PUBLISHED);
            Ok(None)
        }
        QuestionStatus::Closed => {
            set_flash(session, MSG_VOTING_ENDED);
            Ok(None)
        }
    }
}

/// Render the voting form with the user's current choice pre-selected.
pub async fn render_detail(
    pool: &SqlitePool,
    session: &Session,
    question: Question,
    user_id: i64,
    error_message: Option<&str>,
) -> Result<HttpResponse, AppError> {
    let choices = choice::find_for_question(pool, question.id).await?;
    let existing = vote::find_for_user_in_question(pool, user_id, question.id).await?;
    let ctx = PageContext::build(session);
    let tmpl = DetailTemplate::new(
        ctx,
        question,
        choices,
        existing.map(|v| v.choice_id),
        error_message.map(String::from),
    );
    render(tmpl)
}
