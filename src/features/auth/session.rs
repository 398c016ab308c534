//! Explicit authentication context.
//!
//! A `SessionContext` starts out resolving, becomes authenticated or
//! unauthenticated once `resolve` completes, and is cleared by `logout`.
//! Protected routes consult only [`SessionContext::is_authenticated`].

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::LoginRequestDto;
use crate::features::auth::model::{CurrentSession, User};
use crate::modules::api::AdminApi;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Initial lookup has not completed yet
    Resolving,
    Authenticated,
    Unauthenticated,
}

#[derive(Debug)]
struct SessionState {
    user: Option<User>,
    token: Option<String>,
    loading: bool,
}

#[derive(Clone)]
pub struct SessionContext {
    api: Arc<dyn AdminApi>,
    state: Arc<RwLock<SessionState>>,
}

impl SessionContext {
    pub fn new(api: Arc<dyn AdminApi>) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(SessionState {
                user: None,
                token: None,
                loading: true,
            })),
        }
    }

    /// Resolve a previously issued token into a session.
    ///
    /// Any lookup failure leaves the context unauthenticated; the token is
    /// discarded rather than retried.
    pub async fn resolve(&self, token: Option<String>) -> SessionStatus {
        let user = match token.as_deref() {
            Some(token) => match self.api.current_user(token).await {
                Ok(user) => Some(user),
                Err(AppError::Unauthorized(_)) => {
                    debug!("Stored session token was rejected");
                    None
                }
                Err(e) => {
                    warn!("Failed to resolve session: {}", e);
                    None
                }
            },
            None => None,
        };

        let mut state = self.state.write().await;
        state.loading = false;
        match user {
            Some(user) => {
                state.user = Some(user);
                state.token = token;
                SessionStatus::Authenticated
            }
            None => {
                state.user = None;
                state.token = None;
                SessionStatus::Unauthenticated
            }
        }
    }

    /// Exchange credentials for a session and become authenticated
    pub async fn login(&self, credentials: &LoginRequestDto) -> Result<CurrentSession> {
        let session = self.api.login(credentials).await?;

        let mut state = self.state.write().await;
        state.loading = false;
        state.user = Some(session.user.clone());
        state.token = Some(session.token.clone());

        info!("User {} signed in", session.user.username);
        Ok(CurrentSession {
            user: session.user,
            token: session.token,
        })
    }

    /// Revoke the session remotely (best effort) and clear local state
    pub async fn logout(&self) {
        let token = {
            let mut state = self.state.write().await;
            state.loading = false;
            state.user = None;
            state.token.take()
        };

        if let Some(token) = token {
            if let Err(e) = self.api.logout(&token).await {
                warn!("Failed to revoke session remotely: {}", e);
            }
        }
    }

    pub async fn status(&self) -> SessionStatus {
        let state = self.state.read().await;
        if state.loading {
            SessionStatus::Resolving
        } else if state.user.is_some() && state.token.is_some() {
            SessionStatus::Authenticated
        } else {
            SessionStatus::Unauthenticated
        }
    }

    pub async fn is_authenticated(&self) -> bool {
        self.status().await == SessionStatus::Authenticated
    }

    /// User and token, when authenticated
    pub async fn current(&self) -> Option<CurrentSession> {
        let state = self.state.read().await;
        match (&state.user, &state.token) {
            (Some(user), Some(token)) if !state.loading => Some(CurrentSession {
                user: user.clone(),
                token: token.clone(),
            }),
            _ => None,
        }
    }
}
