#![warn(clippy::all, clippy::pedantic)]

use std::net::SocketAddr;

use actix_web::{App, HttpServer, web};
use tracing::{info, warn};

mod config;
mod error;
mod routes;
mod state;
#[cfg(test)]
mod test_support;

use config::ServerConfig;
use error::AppError;
use logger::init_tracing;
use state::AppState;

#[actix_web::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env()?;
    let state = web::Data::new(AppState::from_config(&config)?);
    info!(
        projects = state.registry.len(),
        monitorable = state.registry.monitorable_count(),
        timeout_ms = config.probe_timeout.as_millis() as u64,
        "Project registry loaded"
    );

    // Initial load, like the dashboard checking on mount
    if let Err(error) = state.aggregator.spawn_pass(state.registry.snapshot()) {
        warn!("Initial monitoring pass not started: {error}");
    }

    run_server(config.socket_addr()?, state).await
}

async fn run_server(addr: SocketAddr, state: web::Data<AppState>) -> Result<(), AppError> {
    info!("Listening on http://{addr}");

    HttpServer::new(move || App::new().app_data(state.clone()).configure(routes::routes))
        .bind(addr)?
        .run()
        .await?;

    Ok(())
}
