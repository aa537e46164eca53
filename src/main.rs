mod config;
mod db;
mod error;
mod handlers;
mod models;
mod ordering;
mod services;
mod validation;

use crate::config::AppConfig;
use db::Db;
use ntex::web;
use ntex_cors::Cors;
use std::sync::Arc;

#[ntex::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;

    let db = Arc::new(Db::open(&config.database_path).map_err(|e| {
        tracing::error!(path = %config.database_path, error = %e, "failed to open database");
        std::io::Error::other(e)
    })?);

    tracing::info!(
        "Leaderboard server starting on {}:{} (database: {})",
        config.host,
        config.port,
        config.database_path
    );

    let cors_origin = config.cors_origin.clone();
    web::HttpServer::new(move || {
        web::App::new()
            .state(db.clone())
            .wrap(
                Cors::new()
                    .allowed_origin(cors_origin.as_str())
                    .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                    .allowed_headers(vec!["Content-Type"])
                    .max_age(3600)
                    .finish(),
            )
            .configure(handlers::configure)
    })
    .bind(format!("{}:{}", config.host, config.port))?
    .run()
    .await
}
