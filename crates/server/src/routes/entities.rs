use actix_web::{post, web, HttpResponse};
use aiengine_nlp::{EntityExtractor, EntityOptions};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::response::export_response;
use crate::state::AppState;
use crate::types::{EntityQuery, EntityRequest};

/// Extract named entities grouped by category
#[post("/entities/")]
pub async fn extract_entities(
    req: web::Json<EntityRequest>,
    query: web::Query<EntityQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    info!("Received NER request");
    let req = req.into_inner();
    debug!("Requested format: {:?}", query.format);

    let options = EntityOptions {
        labels: req.labels,
        unique: req.unique.unwrap_or(false),
    };

    let grouped = state
        .entities
        .extract(&req.text, &options)
        .await
        .map_err(|e| ApiError::logged("entities", e))?;

    let export = EntityExtractor::render(&grouped, query.format)
        .map_err(|e| ApiError::logged("entities", e))?;

    Ok(export_response(export))
}
