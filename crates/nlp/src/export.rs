//! Presentation-neutral rendering results
//!
//! Handlers render their results into an [`Export`]; the HTTP layer decides
//! how to put it on the wire.

use aiengine_common::Result;
use serde::Serialize;

/// MIME type used for CSV attachments
pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// A rendered handler result
#[derive(Debug, Clone, PartialEq)]
pub enum Export {
    /// JSON document
    Json(serde_json::Value),

    /// Plain text body
    Text(String),

    /// Downloadable file
    Attachment {
        filename: &'static str,
        content_type: &'static str,
        body: String,
    },
}

impl Export {
    /// Serialize any value as a JSON export
    pub fn json<T: Serialize>(value: &T) -> Result<Self> {
        Ok(Self::Json(serde_json::to_value(value)?))
    }

    /// Build a CSV attachment from a header and rows
    pub fn csv<I, R>(filename: &'static str, header: &[&str], rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator,
        R::Item: AsRef<[u8]>,
    {
        Ok(Self::Attachment {
            filename,
            content_type: CSV_CONTENT_TYPE,
            body: write_csv(header, rows)?,
        })
    }
}

/// Write header + rows as RFC 4180 CSV with CRLF terminators
pub fn write_csv<I, R>(header: &[&str], rows: I) -> Result<String>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator,
    R::Item: AsRef<[u8]>,
{
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());

    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| aiengine_common::AiEngineError::serialization(e.to_string()))?;

    String::from_utf8(bytes)
        .map_err(|e| aiengine_common::AiEngineError::serialization(e.to_string()))
}
