use actix_web::{post, web, HttpResponse};
use aiengine_nlp::{SummaryExport, Summarizer};
use tracing::info;

use crate::error::ApiError;
use crate::response::export_response;
use crate::state::AppState;
use crate::types::{ExportQuery, SummarizeRequest};

/// Summarize text with input-adaptive length bounds
#[post("/summarize/")]
pub async fn summarize(
    req: web::Json<SummarizeRequest>,
    query: web::Query<ExportQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    info!("Received summarization request");

    let result = state
        .summarizer
        .summarize(&req.text)
        .await
        .map_err(|e| ApiError::logged("summarize", e))?;

    let format = SummaryExport::from_query(query.export.as_deref());
    info!("Export format requested: {:?}", format);

    let export = Summarizer::render(&result, format)
        .map_err(|e| ApiError::logged("summarize", e))?;

    Ok(export_response(export))
}
