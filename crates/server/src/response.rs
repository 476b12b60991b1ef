use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::HttpResponse;
use aiengine_nlp::Export;

/// Turn a rendered result into an HTTP response
pub fn export_response(export: Export) -> HttpResponse {
    match export {
        Export::Json(value) => HttpResponse::Ok().json(value),
        Export::Text(text) => HttpResponse::Ok()
            .content_type("text/plain; charset=utf-8")
            .body(text),
        Export::Attachment {
            filename,
            content_type,
            body,
        } => HttpResponse::Ok()
            .content_type(content_type)
            .insert_header(ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::Filename(filename.to_string())],
            })
            .body(body),
    }
}
