use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use minijinja::context;
use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppForm;
use crate::features::auth::cookie::{cleared_session_cookie, session_cookie, session_token};
use crate::features::auth::dtos::{LoginPageQuery, LoginRequestDto};
use crate::features::auth::services::AuthService;
use crate::features::auth::session::SessionStatus;
use crate::features::forms::FieldErrors;
use crate::shared::constants::{DASHBOARD_ROUTE, LOGIN_ROUTE};
use crate::shared::views::page;

/// Login page; a visitor with a live session goes straight to the dashboard
pub async fn login_page(
    State(service): State<Arc<AuthService>>,
    headers: HeaderMap,
    Query(query): Query<LoginPageQuery>,
) -> Result<Response> {
    let session = service.session();
    if session.resolve(session_token(&headers)).await == SessionStatus::Authenticated {
        return Ok(Redirect::to(DASHBOARD_ROUTE).into_response());
    }

    render_login(StatusCode::OK, "", None, query.signed_out)
}

/// Exchange credentials for a session cookie
pub async fn login(
    State(service): State<Arc<AuthService>>,
    AppForm(dto): AppForm<LoginRequestDto>,
) -> Result<Response> {
    if let Err(e) = dto.validate() {
        let message = FieldErrors::from(e).messages().join(", ");
        return render_login(StatusCode::UNPROCESSABLE_ENTITY, &dto.email, Some(message), false);
    }

    let session = service.session();
    match session.login(&dto).await {
        Ok(current) => {
            let cookie = session_cookie(&current.token, service.secure_cookie())?;
            Ok((
                [(header::SET_COOKIE, cookie)],
                Redirect::to(DASHBOARD_ROUTE),
            )
                .into_response())
        }
        Err(AppError::Unauthorized(_)) => render_login(
            StatusCode::UNAUTHORIZED,
            &dto.email,
            Some("Invalid email or password".to_string()),
            false,
        ),
        Err(e) => {
            let status = e.status_code();
            render_login(status, &dto.email, Some(e.notification()), false)
        }
    }
}

/// Revoke the session (best effort), drop the cookie and return to login
pub async fn logout(
    State(service): State<Arc<AuthService>>,
    headers: HeaderMap,
) -> Response {
    let session = service.session();
    session.resolve(session_token(&headers)).await;
    session.logout().await;

    (
        [(header::SET_COOKIE, cleared_session_cookie())],
        Redirect::to(&format!("{}?signed_out=true", LOGIN_ROUTE)),
    )
        .into_response()
}

fn render_login(
    status: StatusCode,
    email: &str,
    error: Option<String>,
    signed_out: bool,
) -> Result<Response> {
    let html = page(
        "login.html",
        context! {
            email => email,
            error => error,
            signed_out => signed_out,
        },
    )?;
    Ok((status, html).into_response())
}
