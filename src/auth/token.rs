use crate::error::AppError;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token lifetime. Tokens outlive neither this window nor the session they
/// reference; the auth gate checks both.
const TOKEN_TTL_HOURS: i64 = 24;

/// Represents the claims encoded within a JWT (JSON Web Token).
///
/// Besides the user's identity the token carries the id of the server-side
/// session created at login, so a logout can revoke the token before it expires.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the user's unique identifier.
    pub sub: Uuid,
    /// The user's display name.
    pub name: String,
    /// The user's email address.
    pub email: String,
    /// The server-side session this token references.
    pub session_id: Uuid,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: usize,
    /// Expiration timestamp (seconds since epoch) for the token.
    pub exp: usize,
}

/// Generates a JWT for a freshly created login session.
///
/// The token is signed with HS256 and expires in 24 hours.
/// It requires the `JWT_SECRET` environment variable to be set for signing.
///
/// # Returns
/// A `Result` containing the JWT string if successful.
/// Returns `AppError::InternalServerError` if `JWT_SECRET` is not set or if encoding fails.
pub fn generate_token(
    user_id: Uuid,
    name: &str,
    email: &str,
    session_id: Uuid,
) -> Result<String, AppError> {
    let now = chrono::Utc::now();
    let expiration = now
        .checked_add_signed(chrono::Duration::hours(TOKEN_TTL_HOURS))
        .expect("valid timestamp")
        .timestamp() as usize;

    let claims = Claims {
        sub: user_id,
        name: name.to_string(),
        email: email.to_string(),
        session_id,
        iat: now.timestamp() as usize,
        exp: expiration,
    };

    let secret = std::env::var("JWT_SECRET")
        .map_err(|_| AppError::InternalServerError("JWT_SECRET not set".into()))?;

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
}

/// Verifies a JWT string and decodes its claims.
///
/// It requires the `JWT_SECRET` environment variable to be set for verifying the signature.
/// Validation is pinned to HS256, so a token presenting any other algorithm is
/// rejected as unauthorized rather than decoded.
///
/// # Returns
/// A `Result` containing the decoded `Claims` if the token is valid.
/// Returns `AppError::InternalServerError` if `JWT_SECRET` is not set.
/// Returns `AppError::Unauthorized` if the token is malformed, its signature is
/// invalid, or it has expired.
pub fn verify_token(token: &str) -> Result<Claims, AppError> {
    let secret = std::env::var("JWT_SECRET")
        .map_err(|_| AppError::InternalServerError("JWT_SECRET not set".into()))?;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Every unit test in this binary that touches JWT_SECRET sets the same
    // value, so tests can run in parallel without restoring the variable.
    const TEST_SECRET: &str = "unit-test-secret";

    fn set_test_secret() {
        std::env::set_var("JWT_SECRET", TEST_SECRET);
    }

    fn encode_with_secret(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn sample_claims(iat: usize, exp: usize) -> Claims {
        Claims {
            sub: Uuid::new_v4(),
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            session_id: Uuid::new_v4(),
            iat,
            exp,
        }
    }

    #[test]
    fn test_token_generation_and_verification() {
        set_test_secret();

        let user_id = Uuid::new_v4();
        let session_id = Uuid::new_v4();
        let token = generate_token(user_id, "Test User", "test@example.com", session_id).unwrap();
        let claims = verify_token(&token).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.name, "Test User");
        assert_eq!(claims.email, "test@example.com");
        assert_eq!(claims.session_id, session_id);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_token_expiration() {
        set_test_secret();

        let two_hours_ago = (chrono::Utc::now() - chrono::Duration::hours(2)).timestamp() as usize;
        let expired_token =
            encode_with_secret(&sample_claims(two_hours_ago, two_hours_ago), TEST_SECRET);

        match verify_token(&expired_token) {
            Err(AppError::Unauthorized(msg)) => {
                assert!(
                    msg.contains("ExpiredSignature"),
                    "unexpected error message for expired token: {}",
                    msg
                );
            }
            Ok(_) => panic!("Token should have been invalid due to expiration"),
            Err(e) => panic!("Unexpected error type for expired token: {:?}", e),
        }
    }

    #[test]
    fn test_invalid_token_signature() {
        set_test_secret();

        let now = chrono::Utc::now();
        let iat = now.timestamp() as usize;
        let exp = (now + chrono::Duration::hours(1)).timestamp() as usize;
        let signed_elsewhere =
            encode_with_secret(&sample_claims(iat, exp), "a_completely_different_secret");

        match verify_token(&signed_elsewhere) {
            Err(AppError::Unauthorized(msg)) => {
                assert!(
                    msg.contains("InvalidSignature"),
                    "unexpected error message for invalid signature: {}",
                    msg
                );
            }
            Ok(_) => panic!("Token should have been invalid due to signature mismatch"),
            Err(e) => panic!("Unexpected error type for invalid signature: {:?}", e),
        }
    }

    #[test]
    fn test_malformed_token_is_unauthorized() {
        set_test_secret();

        match verify_token("not.a.jwt") {
            Err(AppError::Unauthorized(_)) => {}
            Ok(_) => panic!("Malformed token should not verify"),
            Err(e) => panic!("Unexpected error type for malformed token: {:?}", e),
        }
    }
}
