use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::features::projects::handlers;
use crate::features::projects::services::ProjectService;

/// Project pages (session required)
pub fn routes(project_service: Arc<ProjectService>) -> Router {
    Router::new()
        .route("/projects", get(handlers::list_projects))
        .route(
            "/projects/new",
            get(handlers::new_project_page).post(handlers::create_project),
        )
        .route("/projects/{id}", get(handlers::show_project))
        .route(
            "/projects/{id}/edit",
            get(handlers::edit_project_page).post(handlers::update_project),
        )
        .route("/projects/{id}/delete", post(handlers::delete_project))
        .with_state(project_service)
}
