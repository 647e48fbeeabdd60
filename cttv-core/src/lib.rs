//! # Core models for ClinVar evidence generation
//!
//! Shared building blocks for the `cttv-*` crates: the flattened ClinVar record,
//! gene consequence types, allele origins, identifier helpers and gzip-aware
//! readers.
//!
pub mod consts;
pub mod errors;
pub mod frequency;
pub mod models;
pub mod utils;

// re-expose the most used types
pub use errors::RecordError;
pub use frequency::FrequencyTable;
pub use models::{AlleleOrigin, ClinvarRecord, ConsequenceType, SoTerm};
