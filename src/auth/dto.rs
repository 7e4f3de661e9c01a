use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub firstname: String,
    pub lastname: String,
    pub contact: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Request body for login. Users sign in with their username.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for token refresh.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Request body for profile updates.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub firstname: String,
    pub lastname: String,
    pub contact: String,
}

/// Response returned after register or refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: PublicUser,
}

/// Login additionally tells the client whether goal onboarding is done.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: PublicUser,
    pub has_goal_profile: bool,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub firstname: String,
    pub lastname: String,
    pub contact: String,
    pub username: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_user_serializes_without_secrets() {
        let user = PublicUser {
            id: Uuid::new_v4(),
            firstname: "Asha".into(),
            lastname: "Rao".into(),
            contact: "9999999999".into(),
            username: "asha".into(),
            email: "asha@example.com".into(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("asha@example.com"));
        assert!(!json.contains("password"));
    }
}
