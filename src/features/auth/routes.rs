use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::features::auth::handlers;
use crate::features::auth::services::AuthService;

/// Public auth routes (no session required)
pub fn routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/login", get(handlers::login_page).post(handlers::login))
        .route("/logout", post(handlers::logout))
        .with_state(service)
}
