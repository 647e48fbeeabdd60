//! # Input sources for ClinVar evidence generation
//!
//! Thin readers around the external inputs of the pipeline: the paginated
//! stream of Cellbase ClinVar documents (from the REST service or a JSON-lines
//! dump), the ClinVar variant summary that links RCV accessions to rs and nsv
//! identifiers, and the rs to gene consequence table.
//!
pub mod consequences;
pub mod consts;
pub mod error;
#[cfg(feature = "http")]
pub mod http;
pub mod source;
pub mod variant_summary;

// re-expose core functions
pub use consequences::*;
pub use consts::*;
pub use error::*;
#[cfg(feature = "http")]
pub use http::*;
pub use source::*;
pub use variant_summary::*;
