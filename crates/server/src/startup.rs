use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use service::storage::SharedDirectory;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    let raw = cfg.server.bind_addr();
    raw.parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bad bind address {raw}: {e}")))
}

/// Fresh directory for the process, seeded when configured.
pub fn build_directory(cfg: &AppConfig) -> SharedDirectory {
    if cfg.directory.seed_on_start {
        SharedDirectory::seeded()
    } else {
        SharedDirectory::new()
    }
}

pub fn build_app(directory: SharedDirectory) -> Router {
    routes::build_router(ServerState::new(directory), build_cors())
}

/// Build the app from an already loaded config and serve until the listener fails.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let directory = build_directory(&cfg);
    let app = build_app(directory);

    let addr = bind_addr(&cfg)?;
    info!(%addr, seeded = cfg.directory.seed_on_start, "starting course registry");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
