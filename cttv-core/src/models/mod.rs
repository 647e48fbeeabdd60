pub mod allele_origin;
pub mod clinvar_record;
pub mod consequence;

// re-export
pub use self::allele_origin::AlleleOrigin;
pub use self::clinvar_record::ClinvarRecord;
pub use self::consequence::{ConsequenceType, SoTerm};
