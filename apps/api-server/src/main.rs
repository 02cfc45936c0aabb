//! # Quill API Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer, web};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use api_server::observability::RequestIdMiddleware;
use api_server::telemetry::{TelemetryConfig, init_telemetry};
use api_server::{AppConfig, AppState, handlers};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env().context("invalid configuration")?;

    tracing::info!(
        mode = ?config.mode,
        "Starting Quill API Server on {}:{}",
        config.host,
        config.port
    );

    let state = AppState::new(&config).await;
    let bind = (config.host.clone(), config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(RequestIdMiddleware)
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    })
    .bind(bind)
    .context("failed to bind HTTP listener")?
    .run()
    .await?;

    Ok(())
}
