pub mod extractors;
pub mod middleware;
pub mod password;
pub mod session;
pub mod token;

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

// Re-export necessary items
pub use extractors::CurrentUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use session::{create_session, revoke_session, session_status, SessionStatus};
pub use token::{generate_token, verify_token, Claims};

/// Strips surrounding whitespace during deserialization. Email and name
/// comparisons are always against the trimmed value, so padded input must be
/// normalized before validation sees it.
fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(value.trim().to_string())
}

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// User's email address, trimmed on arrival.
    /// Must be a valid email format.
    #[validate(email)]
    #[serde(deserialize_with = "trimmed")]
    pub email: String,
    /// User's password.
    /// Must be at least 6 characters long; checked before any storage access.
    #[validate(length(min = 6))]
    pub password: String,
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name for the new account, trimmed on arrival.
    #[validate(length(min = 1, max = 100))]
    #[serde(deserialize_with = "trimmed")]
    pub name: String,
    /// Email address for the new account, trimmed on arrival.
    /// Must be a valid email format; unique among live accounts.
    #[validate(email)]
    #[serde(deserialize_with = "trimmed")]
    pub email: String,
    /// Password for the new account.
    /// Must be at least 6 characters long.
    #[validate(length(min = 6))]
    pub password: String,
}

/// Response structure after a successful login.
/// Contains the JWT referencing the freshly created session.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    /// The JWT (JSON Web Token) for session authentication.
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_login_request_validation() {
        let valid_login = LoginRequest {
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(valid_login.validate().is_ok());

        let invalid_email_login = LoginRequest {
            email: "testexample.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(invalid_email_login.validate().is_err());

        let short_password_login = LoginRequest {
            email: "test@example.com".to_string(),
            password: "12345".to_string(),
        };
        assert!(short_password_login.validate().is_err());
    }

    #[test]
    fn test_register_request_validation() {
        let valid_register = RegisterRequest {
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(valid_register.validate().is_ok());

        let empty_name_register = RegisterRequest {
            name: "".to_string(),
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(empty_name_register.validate().is_err());

        let short_password_register = RegisterRequest {
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            password: "12345".to_string(),
        };
        assert!(short_password_register.validate().is_err());
    }

    // Padded input must land trimmed so the email-format check and the
    // trimmed storage comparisons see the same value.
    #[test]
    fn test_padded_name_and_email_trimmed_on_deserialize() {
        let register: RegisterRequest = serde_json::from_value(serde_json::json!({
            "name": "  Test User  ",
            "email": "  test@example.com  ",
            "password": "password123"
        }))
        .unwrap();
        assert_eq!(register.name, "Test User");
        assert_eq!(register.email, "test@example.com");
        assert!(register.validate().is_ok());

        let login: LoginRequest = serde_json::from_value(serde_json::json!({
            "email": "\ttest@example.com\n",
            "password": "password123"
        }))
        .unwrap();
        assert_eq!(login.email, "test@example.com");
        assert!(login.validate().is_ok());
    }
}
