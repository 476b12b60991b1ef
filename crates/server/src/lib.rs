//! AI Engine HTTP Server
//!
//! Actix-web REST API for entity extraction, keyword extraction and summarization

pub mod error;
pub mod response;
pub mod routes;
pub mod state;
pub mod types;

use actix_cors::Cors;
use actix_web::middleware::{NormalizePath, TrailingSlash};
use actix_web::{error::InternalError, web, App, HttpResponse, HttpServer};
use aiengine_common::{AiEngineError, AppConfig, Result};
use tracing::info;
use tracing_actix_web::TracingLogger;

pub use error::ApiError;
pub use state::AppState;

use crate::types::ErrorResponse;

/// Register routes and extractor configuration
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Malformed bodies and query strings are validation errors, like any
    // other unprocessable request
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let detail = err.to_string();
        InternalError::from_response(err, HttpResponse::UnprocessableEntity().json(ErrorResponse { detail }))
            .into()
    });
    let query_config = web::QueryConfig::default().error_handler(|err, _req| {
        let detail = err.to_string();
        InternalError::from_response(err, HttpResponse::UnprocessableEntity().json(ErrorResponse { detail }))
            .into()
    });

    cfg.app_data(json_config)
        .app_data(query_config)
        .service(routes::entities::extract_entities)
        .service(routes::keywords::extract_keywords)
        .service(routes::summarize::summarize)
        .service(routes::system::health);
}

/// CORS policy for the configured front-end origins
fn cors_policy(origins: &[String]) -> Cors {
    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
        .max_age(3600)
}

/// Load models and serve until shutdown
pub async fn start_server(config: AppConfig) -> Result<()> {
    config.validate()?;

    let state = AppState::from_config(&config)?;
    state.probe_models().await;

    let data = web::Data::new(state);
    let origins = config.cors_origins.clone();
    let bind_addr = config.server_bind_address();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(NormalizePath::new(TrailingSlash::Always))
            .wrap(cors_policy(&origins))
            .wrap(TracingLogger::default())
            .configure(configure)
    })
    .bind(&bind_addr)
    .map_err(|e| AiEngineError::config(format!("Failed to bind {}: {}", bind_addr, e)))?
    .run();

    info!("AI engine has started on http://{}", bind_addr);

    server.await?;

    info!("AI engine is shutting down");
    Ok(())
}
