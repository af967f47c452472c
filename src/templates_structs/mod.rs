// Template context structures for askama templates.

use actix_session::Session;

use crate::auth::csrf;
use crate::auth::session::{get_username, take_flash};

pub const APP_NAME: &str = "Polls";

/// Common context shared by all pages.
/// Templates access these as `ctx.username`, `ctx.flash`, etc.
pub struct PageContext {
    pub app_name: String,
    pub username: Option<String>,
    pub flash: Option<String>,
    pub csrf_token: String,
}

impl PageContext {
    /// Consumes any pending flash message.
    pub fn build(session: &Session) -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            username: get_username(session),
            flash: take_flash(session),
            csrf_token: csrf::get_or_create_token(session),
        }
    }
}

mod common;
mod poll;

pub use self::common::LoginTemplate;
pub use self::poll::{ChoiceOption, DetailTemplate, IndexTemplate, QuestionRow, ResultsTemplate};
