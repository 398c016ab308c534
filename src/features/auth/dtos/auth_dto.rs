use serde::{Deserialize, Serialize};
use validator::Validate;

/// Credentials posted by the login form and forwarded to the directory API
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequestDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Query string of the login page
#[derive(Debug, Default, Deserialize)]
pub struct LoginPageQuery {
    /// Set after a successful sign-out
    #[serde(default)]
    pub signed_out: bool,
}
