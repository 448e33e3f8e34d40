use serde::{Deserialize, Serialize};

use crate::blogs::repo::Blog;
use crate::users::repo::User;

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Form body for the token endpoint (`POST /token`).
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Response returned after login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Public part of the user returned to the client, with their blogs
/// embedded. The password hash never leaves the repo layer.
#[derive(Debug, Serialize)]
pub struct UserOut {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub is_active: bool,
    pub blogs: Vec<Blog>,
}

impl UserOut {
    pub fn from_user(user: User, blogs: Vec<Blog>) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            is_active: user.is_active,
            blogs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_response_serialization() {
        let response = TokenResponse {
            access_token: "abc.def.ghi".into(),
            token_type: "bearer".into(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"access_token\":\"abc.def.ghi\""));
        assert!(json.contains("\"token_type\":\"bearer\""));
    }

    #[test]
    fn user_out_has_no_password_field() {
        let user = User {
            id: 7,
            username: "bob".into(),
            email: "bob@example.com".into(),
            password_hash: "$argon2id$v=19$secret".into(),
            is_active: true,
        };
        let out = UserOut::from_user(user, vec![]);
        let json = serde_json::to_string(&out).unwrap();
        assert!(json.contains("\"blogs\":[]"));
        assert!(!json.contains("password"));
        assert!(!json.contains("argon2id"));
    }
}
