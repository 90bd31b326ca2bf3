//! Contract data models and configuration.

pub mod config;
pub mod record;

pub use config::CharterConfig;
pub use record::{CanonicalRecord, FieldValue, RawRecord, RawValue, Record};
