use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::features::videos::handlers;
use crate::features::videos::services::VideoService;

/// Video pages (session required)
pub fn routes(video_service: Arc<VideoService>) -> Router {
    Router::new()
        .route("/videos", get(handlers::list_videos))
        .route(
            "/videos/new",
            get(handlers::new_video_page).post(handlers::create_video),
        )
        .route("/videos/{id}", get(handlers::show_video))
        .route(
            "/videos/{id}/edit",
            get(handlers::edit_video_page).post(handlers::update_video),
        )
        .route("/videos/{id}/delete", post(handlers::delete_video))
        .with_state(video_service)
}
