use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use sqlx::PgPool;
use std::rc::Rc;

use crate::auth::extractors::CurrentUser;
use crate::auth::session::{session_status, SessionStatus};
use crate::auth::token::verify_token;
use crate::error::AppError;

/// Authentication gate for protected routes.
///
/// A request passes only if it carries a `Bearer` token whose signature
/// verifies and whose referenced session is still active. Any other outcome
/// short-circuits with 401 before the downstream handler runs; a session
/// lookup that fails for infrastructure reasons surfaces as 500 instead.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    // Rc so the service handle can move into the async block per call.
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let auth_header = req
                .headers()
                .get("Authorization")
                .and_then(|value| value.to_str().ok())
                .map(|value| value.to_owned());

            let header = match auth_header {
                Some(header) => header,
                None => {
                    return Err(
                        AppError::Unauthorized("authorization header missing".into()).into(),
                    )
                }
            };

            let token = match header.strip_prefix("Bearer ") {
                Some(token) => token,
                None => return Err(AppError::Unauthorized("bearer token missing".into()).into()),
            };

            // Signature, algorithm and expiry checks happen here; the token is
            // not trusted yet, its session may have been revoked since issue.
            let claims = verify_token(token)?;

            let pool = req
                .app_data::<web::Data<PgPool>>()
                .cloned()
                .ok_or_else(|| {
                    AppError::InternalServerError("database pool missing from app data".into())
                })?;

            match session_status(pool.get_ref(), claims.session_id).await? {
                SessionStatus::Active => {}
                // A missing session row means a verified token references state
                // that no longer exists; both cases read as a revoked credential.
                SessionStatus::Revoked | SessionStatus::NotFound => {
                    return Err(AppError::Unauthorized("invalid token".into()).into());
                }
            }

            req.extensions_mut().insert(CurrentUser {
                user_id: claims.sub,
                name: claims.name,
                email: claims.email,
                session_id: claims.session_id,
            });

            service.call(req).await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App, HttpResponse};

    async fn protected() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    async fn request_status(req: actix_http::Request) -> StatusCode {
        let app = test::init_service(
            App::new()
                .wrap(AuthMiddleware)
                .route("/protected", web::get().to(protected)),
        )
        .await;

        match test::try_call_service(&app, req).await {
            Ok(resp) => resp.status(),
            Err(err) => err.error_response().status(),
        }
    }

    #[actix_rt::test]
    async fn test_missing_header_is_unauthorized() {
        let req = test::TestRequest::get().uri("/protected").to_request();
        assert_eq!(request_status(req).await, StatusCode::UNAUTHORIZED);
    }

    #[actix_rt::test]
    async fn test_non_bearer_header_is_unauthorized() {
        let req = test::TestRequest::get()
            .uri("/protected")
            .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
            .to_request();
        assert_eq!(request_status(req).await, StatusCode::UNAUTHORIZED);
    }

    #[actix_rt::test]
    async fn test_garbage_token_is_unauthorized() {
        // Rejection happens at signature verification, before any pool access;
        // no database is needed for this path. Same secret as the token tests
        // so parallel test threads never observe a conflicting value.
        std::env::set_var("JWT_SECRET", "unit-test-secret");
        let req = test::TestRequest::get()
            .uri("/protected")
            .insert_header(("Authorization", "Bearer not.a.jwt"))
            .to_request();
        assert_eq!(request_status(req).await, StatusCode::UNAUTHORIZED);
    }
}
