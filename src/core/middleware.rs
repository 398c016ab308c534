use axum::{
    extract::{Request, State},
    http::{HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::{debug, Span};
use uuid::Uuid;

use crate::features::auth::cookie::session_token;
use crate::features::auth::guards::{decide, redirect_to_login, GuardDecision};
use crate::features::auth::AuthService;

/// Request ID generator using UUID v7 (time-ordered)
#[derive(Clone, Copy)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Custom MakeSpan that includes request_id in the tracing span
#[derive(Clone, Debug)]
pub struct MakeSpanWithRequestId;

impl<B> tower_http::trace::MakeSpan<B> for MakeSpanWithRequestId {
    fn make_span(&mut self, request: &axum::http::Request<B>) -> Span {
        let request_id = request
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");

        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    }
}

/// Guard for protected pages.
///
/// Resolves the session cookie into a [`CurrentSession`] extension, or sends
/// the visitor to the login page and drops a stale cookie.
///
/// [`CurrentSession`]: crate::features::auth::model::CurrentSession
pub async fn session_middleware(
    State(service): State<Arc<AuthService>>,
    mut req: Request,
    next: Next,
) -> Response {
    let token = session_token(req.headers());
    let had_cookie = token.is_some();

    let session = service.session();
    let status = session.resolve(token).await;

    match decide(status) {
        GuardDecision::Render => match session.current().await {
            Some(current) => {
                req.extensions_mut().insert(current);
                next.run(req).await
            }
            None => redirect_to_login(had_cookie),
        },
        GuardDecision::Wait => (StatusCode::SERVICE_UNAVAILABLE, "Loading session").into_response(),
        GuardDecision::RedirectToLogin => {
            debug!("No valid session for {}, redirecting to login", req.uri());
            redirect_to_login(had_cookie)
        }
    }
}
