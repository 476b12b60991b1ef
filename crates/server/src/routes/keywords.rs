use actix_web::{post, web, HttpResponse};
use aiengine_nlp::{KeywordExport, KeywordExtractor};
use tracing::info;

use crate::error::ApiError;
use crate::response::export_response;
use crate::state::AppState;
use crate::types::{ExportQuery, KeywordRequest};

/// Rank keywords by TF-IDF score
#[post("/keywords/")]
pub async fn extract_keywords(
    req: web::Json<KeywordRequest>,
    query: web::Query<ExportQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    info!("Received keyword extraction request");

    let keywords = state
        .keywords
        .extract(&req.text, req.top_k)
        .map_err(|e| ApiError::logged("keywords", e))?;

    let format = KeywordExport::from_query(query.export.as_deref());
    info!("Export format requested: {:?}", format);

    let export = KeywordExtractor::render(&keywords, format)
        .map_err(|e| ApiError::logged("keywords", e))?;

    Ok(export_response(export))
}
