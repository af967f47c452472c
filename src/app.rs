use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{
    App, Error, HttpResponse,
    body::MessageBody,
    cookie::Key,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware, web,
};
use sqlx::SqlitePool;

use crate::auth::middleware::require_auth;
use crate::auth::rate_limit::RateLimiter;
use crate::handlers::{auth_handlers, poll_handlers};

/// Everything a worker needs, cloned into each `App`.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub limiter: RateLimiter,
    pub session_key: Key,
    pub cookie_secure: bool,
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Static files
        .service(actix_files::Files::new("/static", "./static"))
        // Login
        .route("/login", web::get().to(auth_handlers::login_page))
        .route("/login", web::post().to(auth_handlers::login_submit))
        .route("/logout", web::post().to(auth_handlers::logout))
        // Polls
        .route("/", web::get().to(poll_handlers::index))
        .route("/{id}/", web::get().to(poll_handlers::detail))
        .route("/{id}/results/", web::get().to(poll_handlers::results))
        .service(
            web::resource("/{id}/vote/")
                .wrap(middleware::from_fn(require_auth))
                .route(web::post().to(poll_handlers::vote)),
        );
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound()
        .content_type("text/html; charset=utf-8")
        .body(include_str!("../templates/errors/404.html"))
}

pub fn build(
    state: AppState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let session_mw = SessionMiddleware::builder(
        CookieSessionStore::default(),
        state.session_key,
    )
    .cookie_secure(state.cookie_secure)
    .cookie_http_only(true)
    .build();

    App::new()
        .wrap(session_mw)
        .wrap(middleware::Logger::default())
        .app_data(web::Data::new(state.pool))
        .app_data(web::Data::new(state.limiter))
        .configure(routes)
        // Default 404 handler (must be registered last)
        .default_service(web::to(not_found))
}
