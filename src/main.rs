use actix_web::HttpServer;

use polls::app::{self, AppState};
use polls::auth::rate_limit::RateLimiter;
use polls::config::AppConfig;
use polls::db;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;

    if let Some(dir) = db::database_dir(&config.database_url) {
        std::fs::create_dir_all(dir)?;
    }

    let pool = db::init_pool(&config.database_url, config.max_connections)
        .await
        .map_err(std::io::Error::other)?;
    db::run_migrations(&pool).await.map_err(std::io::Error::other)?;

    db::seed_admin(&pool, &config.admin_password)
        .await
        .map_err(std::io::Error::other)?;
    if config.seed_demo {
        db::seed_demo(&pool).await.map_err(std::io::Error::other)?;
    }

    let state = AppState {
        pool,
        limiter: RateLimiter::default(),
        session_key: config.session_key(),
        cookie_secure: config.cookie_secure,
    };

    log::info!("Starting server at http://{}", config.bind_addr);

    HttpServer::new(move || app::build(state.clone()))
        .bind(&config.bind_addr)?
        .run()
        .await
}
