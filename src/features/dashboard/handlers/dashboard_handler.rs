use axum::{extract::State, response::Html};
use minijinja::context;
use std::sync::Arc;

use crate::core::error::Result;
use crate::features::auth::model::CurrentSession;
use crate::features::dashboard::services::DashboardService;
use crate::shared::views::page;

/// Dashboard overview
pub async fn get_dashboard(
    State(service): State<Arc<DashboardService>>,
    session: CurrentSession,
) -> Result<Html<String>> {
    let stats = service.get_stats(&session.token).await;
    page(
        "dashboard.html",
        context! {
            user => session.user,
            active => "dashboard",
            stats => stats,
        },
    )
}

/// Settings placeholder
pub async fn get_settings(session: CurrentSession) -> Result<Html<String>> {
    let is_admin = session.user.is_admin();
    page(
        "settings.html",
        context! {
            user => session.user,
            active => "settings",
            is_admin => is_admin,
        },
    )
}
