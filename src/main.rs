mod api;
mod config;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use config::{AppConfig, StorageBackend};
use database::{MemoryStore, MongoDB, ShopStore};
use dotenv::dotenv;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(|e| {
        log::error!("❌ {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    log::info!("🚀 Starting Medical Shop API...");

    let store: Arc<dyn ShopStore> = match config.storage {
        StorageBackend::MongoDB => Arc::new(connect_mongodb(&config).await?),
        StorageBackend::Memory => {
            log::warn!("⚠️  Using in-memory store - data is lost on restart");
            Arc::new(MemoryStore::new())
        }
    };
    let store_data: web::Data<dyn ShopStore> = web::Data::from(store);

    let bind_address = config.bind_address();
    let cors_origins = config.cors_allowed_origins.clone();

    log::info!("🌐 Server starting on http://{}", bind_address);
    log::info!("📚 Swagger UI available at: http://{}/swagger-ui/", bind_address);
    log::info!("📄 OpenAPI spec at: http://{}/api-docs/openapi.json", bind_address);

    // Start HTTP server
    HttpServer::new(move || {
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(store_data.clone())
            .wrap(cors(&cors_origins))
            .wrap(middleware::RequestMetrics)
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi),
            )
            .configure(api::configure)
    })
    .bind(&bind_address)?
    .run()
    .await
}

/// Opens the MongoDB pool. An unreachable server is logged and the API still
/// starts; requests then fail with 500 until the database comes back.
async fn connect_mongodb(config: &AppConfig) -> std::io::Result<MongoDB> {
    log::info!(
        "📊 Database: {} ({})",
        config.database_name,
        config::redact_uri(&config.database_url)
    );

    let db = MongoDB::new(&config.database_url, &config.database_name)
        .await
        .map_err(|e| {
            log::error!("❌ Invalid MongoDB configuration: {}", e);
            std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
        })?;

    match db.ping().await {
        Ok(()) => {
            log::info!("✅ MongoDB connected successfully");
            if let Err(e) = db.ensure_indexes().await {
                log::error!("❌ Index setup failed: {}", e);
            }
        }
        Err(e) => log::error!("❌ MongoDB unreachable, serving anyway: {}", e),
    }

    Ok(db)
}

/// Any origin unless `CORS_ALLOWED_ORIGINS` narrows it.
fn cors(allowed_origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            actix_web::http::header::AUTHORIZATION,
            actix_web::http::header::CONTENT_TYPE,
            actix_web::http::header::ACCEPT,
        ])
        .max_age(3600);

    if allowed_origins.is_empty() {
        return cors.allow_any_origin().allow_any_header();
    }

    allowed_origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}
