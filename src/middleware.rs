//! Process-wide middleware.
//!
//! Currently holds `PanicRecovery`, the top-level boundary that converts an
//! unwound handler panic into a generic 500 JSON body. A single misbehaving
//! request must never take down the worker serving everyone else.

use actix_web::{
    body::{BoxBody, EitherBody},
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpResponse,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use futures::FutureExt;
use serde_json::json;
use std::panic::AssertUnwindSafe;

pub struct PanicRecovery;

impl<S, B> Transform<S, ServiceRequest> for PanicRecovery
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B, BoxBody>>;
    type Error = Error;
    type Transform = PanicRecoveryService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(PanicRecoveryService { service }))
    }
}

pub struct PanicRecoveryService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for PanicRecoveryService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B, BoxBody>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Keep a handle to the request so a response can still be built
        // after the inner future has been consumed by the panic.
        let (http_req, payload) = req.into_parts();
        let req = ServiceRequest::from_parts(http_req.clone(), payload);

        let fut = self.service.call(req);

        Box::pin(async move {
            match AssertUnwindSafe(fut).catch_unwind().await {
                Ok(result) => result.map(|res| res.map_into_left_body()),
                Err(panic) => {
                    let detail = panic
                        .downcast_ref::<&str>()
                        .map(|s| s.to_string())
                        .or_else(|| panic.downcast_ref::<String>().cloned())
                        .unwrap_or_else(|| "unknown panic".to_string());
                    log::error!("request handler panicked: {}", detail);

                    let response = HttpResponse::InternalServerError().json(json!({
                        "error": "internal server error"
                    }));
                    Ok(ServiceResponse::new(http_req, response).map_into_right_body())
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};

    async fn panicking() -> HttpResponse {
        panic!("handler exploded");
    }

    async fn healthy() -> HttpResponse {
        HttpResponse::Ok().json(json!({ "message": "fine" }))
    }

    #[actix_rt::test]
    async fn test_panic_becomes_500_json() {
        let app = test::init_service(
            App::new()
                .wrap(PanicRecovery)
                .route("/boom", web::get().to(panicking)),
        )
        .await;

        let req = test::TestRequest::get().uri("/boom").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = test::read_body(resp).await;
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "internal server error");
    }

    #[actix_rt::test]
    async fn test_normal_responses_pass_through() {
        let app = test::init_service(
            App::new()
                .wrap(PanicRecovery)
                .route("/ok", web::get().to(healthy)),
        )
        .await;

        let req = test::TestRequest::get().uri("/ok").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
