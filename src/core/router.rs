use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware::from_fn_with_state,
    response::Redirect,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::core::config::AppConfig;
use crate::core::middleware;
use crate::features::auth::{routes as auth_routes, AuthService};
use crate::features::categories::CategoryService;
use crate::features::dashboard::{routes as dashboard_routes, DashboardService};
use crate::features::files::FileService;
use crate::features::projects::{routes as projects_routes, ProjectService};
use crate::features::videos::{routes as videos_routes, VideoService};
use crate::modules::api::AdminApi;
use crate::shared::constants::DASHBOARD_ROUTE;

/// Simple health check endpoint (no session required)
async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Assemble every page of the console on top of `api`
pub fn build_router(api: Arc<dyn AdminApi>, config: &AppConfig) -> Router {
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&api),
        config.session_cookie_secure,
    ));
    let file_service = Arc::new(FileService::new(Arc::clone(&api)));
    let category_service = Arc::new(CategoryService::new(Arc::clone(&api)));
    let project_service = Arc::new(ProjectService::new(
        Arc::clone(&api),
        Arc::clone(&file_service),
        Arc::clone(&category_service),
    ));
    let video_service = Arc::new(VideoService::new(
        Arc::clone(&api),
        Arc::clone(&file_service),
    ));
    let dashboard_service = Arc::new(DashboardService::new(Arc::clone(&api)));

    // Protected pages (require a resolved session)
    let protected_routes = Router::new()
        .merge(dashboard_routes::routes(dashboard_service))
        .merge(projects_routes::routes(project_service))
        .merge(videos_routes::routes(video_service))
        .route_layer(from_fn_with_state(
            Arc::clone(&auth_service),
            middleware::session_middleware,
        ));

    let public_routes = Router::new()
        .merge(auth_routes::routes(auth_service))
        .route("/health", get(health_check));

    Router::new()
        .merge(protected_routes)
        .merge(public_routes)
        // Unknown paths, including `/`, land on the dashboard
        .fallback(|| async { Redirect::to(DASHBOARD_ROUTE) })
        .layer(DefaultBodyLimit::max(config.max_request_body_size))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
}
