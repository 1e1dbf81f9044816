//src/main.rs

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

mod codec;
mod common;
mod config;
mod db;
mod handlers;
mod lookup;
mod middleware;
mod models;
mod routes;
mod services;

use crate::config::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG manda; sem ele, info
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new().await?;
    let port = app_state.settings.port;

    let app = routes::build_router(app_state);

    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
