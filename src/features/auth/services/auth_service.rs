use std::sync::Arc;

use crate::features::auth::session::SessionContext;
use crate::modules::api::AdminApi;

/// Hands out per-request session contexts and carries cookie settings
pub struct AuthService {
    api: Arc<dyn AdminApi>,
    secure_cookie: bool,
}

impl AuthService {
    pub fn new(api: Arc<dyn AdminApi>, secure_cookie: bool) -> Self {
        Self { api, secure_cookie }
    }

    /// Fresh, unresolved session context for one request
    pub fn session(&self) -> SessionContext {
        SessionContext::new(self.api.clone())
    }

    pub fn secure_cookie(&self) -> bool {
        self.secure_cookie
    }
}
