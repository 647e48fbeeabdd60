use std::fs::read_to_string;
use std::path::Path;

use anyhow::Context;
use jsonschema::Validator;
use log::info;
use serde_json::Value;

use cttv_efo::{TermLookup, TermSet};

use crate::consts::BUNDLED_SCHEMA;
use crate::errors::EvidenceError;
use crate::evidence::Evidence;

///
/// Accepts or rejects evidence units before they are kept.
///
pub trait EvidenceValidator {
    fn validate(&self, evidence: &Evidence) -> Result<(), EvidenceError>;
}

///
/// Validates evidence against a JSON schema and rejects evidence that
/// refers to an obsolete ontology term.
///
pub struct SchemaValidator {
    validator: Validator,
    obsolete_terms: TermSet,
}

impl SchemaValidator {
    ///
    /// # Arguments
    ///
    /// - schema: the evidence JSON schema
    /// - obsolete_terms: ontology terms no longer allowed in evidence
    ///
    pub fn new(schema: &Value, obsolete_terms: TermSet) -> Result<Self, EvidenceError> {
        let validator = jsonschema::validator_for(schema)
            .map_err(|e| EvidenceError::InvalidSchema(e.to_string()))?;

        Ok(SchemaValidator {
            validator,
            obsolete_terms,
        })
    }

    /// Validator for the schema shipped with this crate.
    pub fn bundled(obsolete_terms: TermSet) -> Result<Self, EvidenceError> {
        let schema: Value = serde_json::from_str(BUNDLED_SCHEMA)?;
        SchemaValidator::new(&schema, obsolete_terms)
    }

    ///
    /// Build a validator from an optional schema file, falling back to the
    /// bundled schema.
    ///
    /// # Arguments
    ///
    /// - schema_file: path to a JSON schema
    /// - obsolete_terms: ontology terms no longer allowed in evidence
    ///
    pub fn from_file(
        schema_file: Option<&Path>,
        obsolete_terms: TermSet,
    ) -> anyhow::Result<Self> {
        let Some(path) = schema_file else {
            info!("Using bundled evidence schema");
            return Ok(SchemaValidator::bundled(obsolete_terms)?);
        };

        let raw = read_to_string(path)
            .with_context(|| format!("Failed to read evidence schema: {:?}", path))?;
        let schema: Value = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse evidence schema: {:?}", path))?;

        info!("Using evidence schema at {:?}", path);

        Ok(SchemaValidator::new(&schema, obsolete_terms)?)
    }
}

impl EvidenceValidator for SchemaValidator {
    fn validate(&self, evidence: &Evidence) -> Result<(), EvidenceError> {
        let instance = serde_json::to_value(evidence)?;

        let errors: Vec<String> = self
            .validator
            .iter_errors(&instance)
            .map(|e| format!("{}: {}", e.instance_path, e))
            .collect();

        if !errors.is_empty() {
            return Err(EvidenceError::SchemaValidation {
                accession: evidence.accession().to_string(),
                errors,
                evidence: instance.to_string(),
            });
        }

        if let Some(term) = evidence
            .efo_terms()
            .iter()
            .find(|term| self.obsolete_terms.contains_term(term))
        {
            return Err(EvidenceError::ObsoleteTerm {
                accession: evidence.accession().to_string(),
                term: term.clone(),
                evidence: instance.to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use serde_json::json;

    use cttv_core::{AlleleOrigin, SoTerm};

    use crate::evidence::{EvidenceInputs, Provenance};

    const TERM: &str = "http://www.orpha.net/ORDO/Orphanet_524";

    fn evidence(origin: AlleleOrigin) -> Evidence {
        let so_term = SoTerm::new("missense_variant");
        let efo_terms = vec![TERM.to_string()];
        let inputs = EvidenceInputs {
            accession: "RCV000128628",
            ensembl_gene_id: "ENSG00000141510",
            trait_index: 0,
            rs_id: "rs28934578",
            clinical_significance: "pathogenic",
            efo_terms: &efo_terms,
            so_term: &so_term,
            provenance: Provenance::new(
                "http://identifiers.org/clinvar.record/RCV000128628".to_string(),
                "http://www.ncbi.nlm.nih.gov/clinvar/RCV000128628".to_string(),
                vec!["http://europepmc.org/abstract/MED/1".to_string()],
                Some(1_420_070_400_000),
            ),
        };
        Evidence::new(origin, &inputs)
    }

    #[rstest]
    #[case(AlleleOrigin::Germline)]
    #[case(AlleleOrigin::Somatic)]
    fn test_bundled_schema_accepts_generated_evidence(#[case] origin: AlleleOrigin) {
        let validator = SchemaValidator::bundled(TermSet::new()).unwrap();
        let result = validator.validate(&evidence(origin));
        assert_eq!(result.is_ok(), true);
    }

    #[rstest]
    fn test_schema_failure_carries_accession() {
        let schema = json!({
            "type": "object",
            "required": ["not_there"]
        });
        let validator = SchemaValidator::new(&schema, TermSet::new()).unwrap();

        let result = validator.validate(&evidence(AlleleOrigin::Germline));

        match result {
            Err(EvidenceError::SchemaValidation {
                accession,
                errors,
                evidence,
            }) => {
                assert_eq!(accession, "RCV000128628");
                assert_eq!(errors.len(), 1);
                assert_eq!(evidence.contains("RCV000128628"), true);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[rstest]
    fn test_obsolete_term_is_rejected() {
        let obsolete: TermSet = [TERM].into_iter().collect();
        let validator = SchemaValidator::bundled(obsolete).unwrap();

        let result = validator.validate(&evidence(AlleleOrigin::Somatic));

        assert_eq!(
            matches!(result, Err(EvidenceError::ObsoleteTerm { ref term, .. }) if term == TERM),
            true
        );
    }

    #[rstest]
    fn test_invalid_schema() {
        let schema = json!({"type": 12});
        let result = SchemaValidator::new(&schema, TermSet::new());
        assert_eq!(matches!(result, Err(EvidenceError::InvalidSchema(_))), true);
    }
}
