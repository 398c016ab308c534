use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Moderator,
}

/// Signed-in console user as reported by the directory API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Result of exchanging credentials with the directory API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

/// Resolved session attached to every protected request
#[derive(Debug, Clone)]
pub struct CurrentSession {
    pub user: User,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_parses_lowercase_role() {
        let user: User = serde_json::from_str(
            r#"{"id":"u1","username":"mod","email":"mod@example.org","role":"moderator"}"#,
        )
        .unwrap();
        assert_eq!(user.role, Role::Moderator);
        assert!(!user.is_admin());
    }
}
