//! Route guarding for protected pages.
//!
//! Every protected route asks one question of the session: is it
//! authenticated? Rendering waits for resolution to finish; once resolved,
//! anything unauthenticated is sent to the login page.

use axum::{
    http::header,
    response::{IntoResponse, Redirect, Response},
};

use crate::features::auth::cookie::cleared_session_cookie;
use crate::features::auth::session::SessionStatus;
use crate::shared::constants::LOGIN_ROUTE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session resolved and authenticated: render the route
    Render,
    /// Session still resolving: show a loading state, do not render
    Wait,
    /// Session resolved and unauthenticated: go to `/login`
    RedirectToLogin,
}

pub fn decide(status: SessionStatus) -> GuardDecision {
    match status {
        SessionStatus::Resolving => GuardDecision::Wait,
        SessionStatus::Authenticated => GuardDecision::Render,
        SessionStatus::Unauthenticated => GuardDecision::RedirectToLogin,
    }
}

/// Send the browser to `/login`, dropping the session cookie when it is
/// known to be stale
pub fn redirect_to_login(clear_cookie: bool) -> Response {
    let mut response = Redirect::to(LOGIN_ROUTE).into_response();
    if clear_cookie {
        response
            .headers_mut()
            .insert(header::SET_COOKIE, cleared_session_cookie());
    }
    response
}
