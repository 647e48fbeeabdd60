//! # Trait to ontology mapping
//!
//! Builds the lookup from ClinVar trait names to EFO terms out of the manually
//! curated mapping table, applying the "ignore" and "adapt" term overrides and
//! keeping count of the adapted terms that EFO does not carry yet.
//!
pub mod errors;
pub mod mapping;
pub mod overrides;
pub mod table;

// re-exports
pub use errors::*;
pub use mapping::*;
pub use overrides::*;
pub use table::*;
