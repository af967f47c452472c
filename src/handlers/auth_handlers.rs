use actix_session::Session;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::auth::{csrf, password, rate_limit::RateLimiter};
use crate::auth::session::{get_user_id, log_in, safe_next};
use crate::errors::{AppError, render, see_other};
use crate::models::user::{self, LoginForm};
use crate::templates_structs::{APP_NAME, LoginTemplate};

const MSG_BAD_CREDENTIALS: &str = "Invalid username or password";
const MSG_RATE_LIMITED: &str = "Too many failed login attempts. Please try again later.";

#[derive(Deserialize)]
pub struct NextQuery {
    #[serde(default)]
    pub next: String,
}

#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

fn login_form(session: &Session, error: Option<&str>, next: &str) -> Result<HttpResponse, AppError> {
    let tmpl = LoginTemplate {
        error: error.map(String::from),
        app_name: APP_NAME.to_string(),
        csrf_token: csrf::get_or_create_token(session),
        next: safe_next(next).unwrap_or("/").to_string(),
    };
    render(tmpl)
}

pub async fn login_page(
    session: Session,
    query: web::Query<NextQuery>,
) -> Result<HttpResponse, AppError> {
    if get_user_id(&session).is_some() {
        return Ok(see_other("/"));
    }
    login_form(&session, None, &query.next)
}

pub async fn login_submit(
    req: HttpRequest,
    pool: web::Data<SqlitePool>,
    session: Session,
    form: web::Form<LoginForm>,
    limiter: web::Data<RateLimiter>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    // Rate-limit check before any database access
    let ip = req.peer_addr()
        .map(|addr| addr.ip())
        .unwrap_or(std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED));

    if limiter.is_blocked(ip) {
        log::warn!("Login blocked for {ip}: too many failures");
        return login_form(&session, Some(MSG_RATE_LIMITED), &form.next);
    }

    let found = user::find_by_username(&pool, form.username.trim()).await?;
    let verified = match &found {
        Some(u) => password::verify_password(&form.password, &u.password)?,
        None => false,
    };

    match found {
        Some(u) if verified => {
            limiter.clear(ip);
            log_in(&session, u.id, &u.username)?;
            log::info!("User '{}' logged in", u.username);
            let target = safe_next(&form.next).unwrap_or("/");
            Ok(see_other(target))
        }
        _ => {
            limiter.record_failure(ip);
            log::warn!("Failed login for '{}' from {ip}", form.username.trim());
            login_form(&session, Some(MSG_BAD_CREDENTIALS), &form.next)
        }
    }
}

pub async fn logout(
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    session.purge();
    Ok(see_other("/"))
}
