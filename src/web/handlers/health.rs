use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::services::GalleryStats;
use crate::utils::format_uptime;
use crate::web::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: DateTime<Utc>,
    pub uptime_seconds: u64,
    pub uptime: String,
    pub caches: GalleryStats,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let now = Utc::now();
    let uptime = (now - state.start_time).to_std().unwrap_or_default();

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: now,
        uptime_seconds: uptime.as_secs(),
        uptime: format_uptime(uptime),
        caches: state.gallery.stats().await,
    })
}
