//! Error types for the charter-core library.

use thiserror::Error;

/// Main error type for the charter library.
#[derive(Error, Debug)]
pub enum CharterError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Schema configuration error.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Raw record intake error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors raised while building or loading a field schema.
///
/// These are configuration mistakes, not data problems: a schema that fails
/// here is rejected before any record is standardized.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The same field name was declared twice.
    #[error("duplicate field in schema: {0}")]
    DuplicateField(String),

    /// A schema must declare at least one field.
    #[error("schema has no fields")]
    Empty,

    /// The search or sort field is not declared in the schema.
    #[error("{role} field {field:?} is not declared in the schema")]
    UndeclaredField { role: &'static str, field: String },

    /// The schema file could not be parsed (includes unknown field kinds).
    #[error("invalid schema definition: {0}")]
    Invalid(String),
}

/// Errors related to turning an extraction response into a raw record.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The response was not valid JSON.
    #[error("failed to parse JSON response: {0}")]
    InvalidJson(String),

    /// The response parsed, but was not a JSON object.
    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),

    /// The response was an empty object.
    #[error("no contract data found")]
    NoData,
}

/// Result type for the charter library.
pub type Result<T> = std::result::Result<T, CharterError>;
