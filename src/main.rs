use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use sqlx::postgres::PgPoolOptions;

use todoserve::config::Config;
use todoserve::middleware::PanicRecovery;
use todoserve::routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    log::info!("Starting todoserve server at {}", config.server_url());

    let server_pool = pool.clone();
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(server_pool.clone()))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            // Registered last so it is the outermost layer and catches
            // panics from everything beneath it.
            .wrap(PanicRecovery)
            .service(routes::health::health)
            .service(web::scope("/api").configure(routes::config))
    })
    .bind((config.server_host.clone(), config.server_port))?
    .run()
    .await?;

    // run() returns once shutdown has drained in-flight requests;
    // release the storage handle last.
    pool.close().await;
    Ok(())
}
