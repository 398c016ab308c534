use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::dashboard::handlers;
use crate::features::dashboard::services::DashboardService;

/// Dashboard and settings pages (session required)
pub fn routes(dashboard_service: Arc<DashboardService>) -> Router {
    Router::new()
        .route("/dashboard", get(handlers::get_dashboard))
        .route("/settings", get(handlers::get_settings))
        .with_state(dashboard_service)
}
