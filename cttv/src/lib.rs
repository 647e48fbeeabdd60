//! # cttv
//!
//! Turns ClinVar records into Open Targets evidence strings. Each concern
//! lives in its own crate; enable the matching feature to pull it in.
//!
//! | feature | crate |
//! |---|---|
//! | `core` | record model and identifier helpers |
//! | `efo` | trait to ontology term mapping |
//! | `io` | record sources and lookup tables (`http` adds the Cellbase client) |
//! | `evidence` | filtering, evidence generation, validation and reporting |
//!
#[cfg(feature = "core")]
#[doc(inline)]
pub use cttv_core as core;

#[cfg(feature = "efo")]
#[doc(inline)]
pub use cttv_efo as efo;

#[cfg(feature = "io")]
#[doc(inline)]
pub use cttv_io as io;

#[cfg(feature = "evidence")]
#[doc(inline)]
pub use cttv_evidence as evidence;
