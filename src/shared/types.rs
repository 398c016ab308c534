use serde::{Deserialize, Serialize};

/// Standard response envelope, shared by the remote directory API and the
/// JSON error bodies this console emits.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Option<Vec<String>>,
}

impl<T> ApiResponse<T> {
    pub fn error(message: Option<String>, errors: Option<Vec<String>>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
            errors,
        }
    }

    /// Best human-readable explanation carried by an error envelope
    pub fn describe(&self) -> Option<String> {
        self.message.clone().or_else(|| {
            self.errors
                .as_ref()
                .filter(|errors| !errors.is_empty())
                .map(|errors| errors.join("; "))
        })
    }
}
