use actix_session::Session;

use crate::errors::AppError;

const USER_ID: &str = "user_id";
const USERNAME: &str = "username";
const FLASH: &str = "flash";

pub fn get_user_id(session: &Session) -> Option<i64> {
    session.get::<i64>(USER_ID).unwrap_or(None)
}

pub fn get_username(session: &Session) -> Option<String> {
    session.get::<String>(USERNAME).unwrap_or(None)
}

/// Store the signed-in user. The session id is renewed to prevent fixation.
pub fn log_in(session: &Session, user_id: i64, username: &str) -> Result<(), AppError> {
    session.renew();
    session
        .insert(USER_ID, user_id)
        .and_then(|_| session.insert(USERNAME, username))
        .map_err(|e| AppError::Session(e.to_string()))
}

pub fn set_flash(session: &Session, message: &str) {
    if let Err(e) = session.insert(FLASH, message) {
        log::warn!("Failed to store flash message: {e}");
    }
}

pub fn take_flash(session: &Session) -> Option<String> {
    let flash = session.get::<String>(FLASH).unwrap_or(None);
    if flash.is_some() {
        session.remove(FLASH);
    }
    flash
}

/// Login page URL that brings the user back to `path` afterwards.
pub fn login_url(path: &str) -> String {
    match safe_next(path) {
        Some(next) if next != "/" => format!("/login?next={next}"),
        _ => "/login".to_string(),
    }
}

/// Accept only local absolute paths as a post-login target.
pub fn safe_next(next: &str) -> Option<&str> {
    let next = next.trim();
    let local = next.starts_with('/')
        && !next.starts_with("//")
        && !next.contains('\\')
        && next.chars().all(|c| c.is_ascii_alphanumeric() || "/-_.".contains(c));
    local.then_some(next)
}
