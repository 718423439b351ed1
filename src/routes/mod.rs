pub mod auth;
pub mod health;
pub mod todos;
pub mod user;

use crate::auth::AuthMiddleware;
use crate::error::AppError;
use actix_web::web;

/// Builds the JSON extractor config so body parse failures (missing fields,
/// malformed JSON) come back as the API's standard 400 error shape.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(
            web::scope("/auth")
                .service(auth::register)
                .service(auth::login),
        )
        .service(
            web::scope("/user")
                .wrap(AuthMiddleware)
                .service(user::profile)
                .service(user::logout)
                .service(user::delete_account),
        )
        .service(
            web::scope("/todos")
                .wrap(AuthMiddleware)
                .service(todos::create_todo)
                .service(todos::search_todos)
                .service(todos::all_todos)
                .service(todos::incomplete_todos)
                .service(todos::completed_todos)
                .service(todos::mark_completed)
                .service(todos::delete_todo)
                .service(todos::delete_all_todos),
        );
}
