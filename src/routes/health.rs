use actix_web::{get, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;

/// Unauthenticated liveness check. Reports the service name and server time
/// without touching the database, so it stays green while the pool is down.
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "server is running",
        "service": "todoserve",
        "timestamp": Utc::now()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;

    #[actix_web::test]
    async fn test_health_reports_service_liveness() {
        // No pool in app data: the handler must not need one.
        let app = test::init_service(actix_web::App::new().service(health)).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let body = test::read_body(resp).await;
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "server is running");
        assert_eq!(json["service"], "todoserve");
        assert!(json["timestamp"].is_string());
    }
}
