//! Contract field standardization.
//!
//! Raw records coming out of field extraction are messy: dates in a dozen
//! shapes, amounts with currency symbols, vessel names with or without a
//! prefix. A [`Standardizer`] applies the normalizer declared for each field
//! in a [`FieldSchema`] and yields a [`CanonicalRecord`](crate::models::CanonicalRecord).
//! [`ContractTable`] lays a set of canonical records out as rows and columns.

mod builder;
pub mod rules;
mod schema;
mod table;

pub use builder::{standardize, StandardizeReport, Standardizer, DEFAULT_DECIMAL_PLACES};
pub use schema::{FieldKind, FieldSchema, FieldSpec, IdentifierStyle, SchemaVariant};
pub use table::ContractTable;
