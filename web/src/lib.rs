use log::*;
use tokio::net::TcpListener;

pub use self::error::{Error, Result};
pub use service::AppState;

mod controller;
mod error;
mod extractors;
mod middleware;
mod router;

const DEFAULT_INTERFACE: &str = "127.0.0.1";

pub async fn init_server(app_state: AppState) -> std::io::Result<()> {
    let host = format!(
        "{}:{}",
        app_state
            .config
            .interface
            .as_deref()
            .unwrap_or(DEFAULT_INTERFACE),
        app_state.config.port
    );

    info!(
        "Server starting... listening for connections on http://{} ({})",
        host, app_state.config.runtime_env
    );
    debug!(
        "Allowed CORS origins: {}",
        app_state.config.allowed_origins.join(",")
    );

    let listener = TcpListener::bind(&host).await?;
    axum::serve(listener, router::define_routes(app_state)).await
}
