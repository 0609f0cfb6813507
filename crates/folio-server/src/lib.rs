//! HTTP reader server for Folio.
//!
//! Serves published subjects as HTML pages rendered on the server:
//! - `/` subject catalogue with a `?q=` filter
//! - `/subjects/{id}` and `/subjects/{id}/{subTitleId}` subject pages with
//!   the outline sidebar, breadcrumbs and previous/next links
//! - `/api/subjects/{id}/nav` the outline as JSON
//! - `/assets/*` stylesheet and script compiled into the binary
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use folio_api::HttpContentApi;
//! use folio_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig::default();
//!     let api = HttpContentApi::new(&config.api_base_url, Duration::from_secs(30));
//!     run_server(config, Arc::new(api)).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum server (folio-server)
//!                        │
//!                        ├─► Page routes ──► spawn_blocking ──► ContentApi
//!                        │                                         │
//!                        │       SubjectOutline + Document ◄───────┘
//!                        │
//!                        └─► Static assets (rust-embed, highlight.css)
//! ```

mod app;
mod error;
mod handlers;
mod layout;
mod middleware;
mod state;
mod static_files;

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use folio_api::{ContentApi, ImageUrlResolver};
use folio_renderer::RenderOptions;
use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Content API base URL, used to resolve image references.
    pub api_base_url: String,
    /// Sort page components by their order field before rendering.
    pub sort_components: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7878,
            api_base_url: "http://localhost:3000/api".to_owned(),
            sort_components: false,
        }
    }
}

/// Run the server.
///
/// # Errors
///
/// Returns an error if the address is invalid or the listener fails.
pub async fn run_server(
    config: ServerConfig,
    api: Arc<dyn ContentApi>,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState {
        api,
        images: ImageUrlResolver::new(&config.api_base_url),
        options: RenderOptions {
            sort_by_order: config.sort_components,
        },
    });

    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, api = %config.api_base_url, "Starting reader server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        return;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from Folio config.
#[must_use]
pub fn server_config_from_folio_config(config: &folio_config::Config) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        api_base_url: config.api.base_url().to_owned(),
        sort_components: config.reader.sort_components,
    }
}
