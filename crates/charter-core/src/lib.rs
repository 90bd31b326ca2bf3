//! Core library for Time Charter Party contract processing.
//!
//! This crate provides:
//! - PDF text extraction for charter party documents
//! - Schema-driven standardization of extracted contract fields
//!   (dates, vessel names, amounts, emails, yes/no flags)
//! - Contract tables and a searchable in-memory contract repository
//! - Prompt building and reply parsing for the field-extraction step

pub mod error;
pub mod extraction;
pub mod models;
pub mod pdf;
pub mod repository;
pub mod standardize;

pub use error::{CharterError, ExtractionError, PdfError, Result, SchemaError};
pub use extraction::{estimate_tokens, parse_raw_record};
pub use models::{CanonicalRecord, CharterConfig, FieldValue, RawRecord, RawValue, Record};
pub use pdf::{PdfContent, PdfExtractor, PdfProcessor};
pub use repository::{ContractRepository, RepositoryStats};
pub use standardize::{
    standardize, ContractTable, FieldKind, FieldSchema, FieldSpec, IdentifierStyle,
    SchemaVariant, StandardizeReport, Standardizer,
};
