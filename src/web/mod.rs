//! Web layer
//!
//! Routes, shared state and server lifecycle. Handlers delegate to
//! [`GalleryService`] and [`ResultsStore`]; errors are turned into JSON by
//! [`responses::handle_error`].

use axum::{
    Router,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::config::Config;
use crate::errors::{GalleryError, GalleryResult};
use crate::services::{GalleryService, ResultsStore};

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod responses;
pub mod utils;

pub use responses::{ErrorResponse, handle_error};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub gallery: Arc<GalleryService>,
    pub results: Arc<ResultsStore>,
    /// Application start time for uptime calculation
    pub start_time: DateTime<Utc>,
}

impl AppState {
    /// Build the caches and results store described by `config`
    pub fn from_config(config: Config) -> Self {
        let gallery = GalleryService::from_config(&config);
        let results = ResultsStore::new(config.gallery.results_path.clone());
        Self {
            config: Arc::new(config),
            gallery: Arc::new(gallery),
            results: Arc::new(results),
            start_time: Utc::now(),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/config", get(handlers::files::gallery_defaults))
        .route("/api/filter-paged", post(handlers::files::filter_paged))
        .route("/api/view", get(handlers::files::view))
        .route("/image/{encoded}", get(handlers::images::full_image))
        .route("/preview/{encoded}", get(handlers::images::preview_image))
        .route("/results/list", get(handlers::results::list_results))
        .route("/api/save-image", post(handlers::results::save_image))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::request_logging_middleware))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Web server configuration and setup
pub struct WebServer {
    app: Router,
    addr: SocketAddr,
}

impl WebServer {
    pub fn new(state: AppState) -> GalleryResult<Self> {
        let web = &state.config.web;
        let addr: SocketAddr = format!("{}:{}", web.host, web.port).parse().map_err(|e| {
            GalleryError::configuration(format!(
                "invalid listen address {}:{}: {}",
                web.host, web.port, e
            ))
        })?;

        Ok(Self {
            app: create_router(state),
            addr,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Serve until SIGINT or SIGTERM
    pub async fn serve(self) -> GalleryResult<()> {
        self.serve_with_shutdown(shutdown_signal()).await
    }

    pub async fn serve_with_shutdown<F>(self, shutdown: F) -> GalleryResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = tokio::net::TcpListener::bind(&self.addr).await?;
        info!("Web server listening on http://{}", self.addr);

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Web server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {
                        info!("Received SIGTERM, shutting down gracefully");
                    }
                    _ = sigint.recv() => {
                        info!("Received SIGINT (Ctrl+C), shutting down gracefully");
                    }
                }
            }
            (Err(e), _) | (_, Err(e)) => {
                warn!("Failed to install signal handlers, running until killed: {}", e);
                std::future::pending::<()>().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler, running until killed: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down gracefully");
    }
}
