//! # ClinVar evidence generation
//!
//! Filters ClinVar records, expands the eligible ones into schema-validated
//! evidence strings and reports on everything that was skipped along the way.
//!
//! ```no_run
//! use std::path::PathBuf;
//! use cttv_evidence::{PipelineConfig, generate_evidence};
//!
//! let config = PipelineConfig::try_from(PathBuf::from("pipeline.toml").as_path()).unwrap();
//! let report = generate_evidence(&config).unwrap();
//! println!("{} evidence strings", report.evidence().len());
//! ```
//!
pub mod config;
pub mod consts;
pub mod context;
pub mod errors;
pub mod evidence;
pub mod expander;
pub mod filter;
pub mod pipeline;
pub mod report;
pub mod validate;

// re-exports
pub use config::PipelineConfig;
pub use context::EligibleRecordContext;
pub use errors::*;
pub use evidence::{Evidence, EvidenceInputs, EvidenceKey, Provenance};
pub use expander::EvidenceExpander;
pub use filter::{RecordFilter, SkipReason};
pub use pipeline::{PipelineInputs, generate_evidence, process_record, run};
pub use report::{Counter, EvidenceRecordLine, RunReport};
pub use validate::{EvidenceValidator, SchemaValidator};
