use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::error::AppError;

/// The identity attached to a request by `AuthMiddleware` after the token
/// signature and the referenced session have both been validated.
///
/// Handlers take this as an explicit parameter; it is the only way identity
/// flows into them, and its lifetime is exactly one request.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub session_id: Uuid,
}

impl FromRequest for CurrentUser {
    type Error = ActixError; // AppError will be converted into ActixError via ResponseError
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<CurrentUser>().cloned() {
            Some(user) => ready(Ok(user)),
            None => {
                // Only reachable if a route was registered without AuthMiddleware.
                // Responding with Unauthorized is the safe default.
                let err = AppError::Unauthorized(
                    "User identity not found in request. Ensure AuthMiddleware is active."
                        .to_string(),
                );
                ready(Err(err.into()))
            }
        }
    }
}
