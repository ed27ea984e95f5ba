mod api;
mod config;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{
    middleware::{Compress, Logger},
    web, App, HttpServer,
};
use dotenv::dotenv;
use services::{TokenService, UserDirectory};
use std::sync::Arc;
use utils::AppError;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = config::AppConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;

    log::info!("🚀 Starting Enrollment Service...");
    log::info!(
        "📊 Database: {} ({})",
        config.redacted_database_url(),
        config.database_name
    );

    let db = database::MongoDB::new(&config.database_url, &config.database_name)
        .await
        .map_err(|e| std::io::Error::other(format!("Failed to connect to MongoDB: {}", e)))?;

    log::info!("✅ MongoDB connected successfully");

    let db_data = web::Data::new(db.clone());
    let directory: Arc<dyn UserDirectory> = Arc::new(db.clone());
    let directory_data = web::Data::from(directory);
    let token_data = web::Data::new(TokenService::new(
        &config.access_secret,
        config.token_ttl_hours,
    ));
    let json_limit = config.json_body_limit;

    log::info!("🌐 Server starting on {}:{}", config.host, config.port);
    log::info!(
        "📚 Swagger UI available at: http://{}:{}/swagger-ui/",
        config.host,
        config.port
    );

    HttpServer::new(move || {
        let json_config = web::JsonConfig::default()
            .limit(json_limit)
            .error_handler(|err, _req| AppError::InvalidRequest(err.to_string()).into());

        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(db_data.clone())
            .app_data(directory_data.clone())
            .app_data(token_data.clone())
            .app_data(json_config)
            .wrap(Cors::permissive())
            .wrap(Compress::default())
            .wrap(Logger::default())
            .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi))
            .configure(api::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .shutdown_timeout(config.shutdown_timeout_secs)
    .run()
    .await?;

    // Server returns after SIGINT/SIGTERM
    log::info!("🛑 Shutting down gracefully...");
    db.shutdown().await;

    Ok(())
}
