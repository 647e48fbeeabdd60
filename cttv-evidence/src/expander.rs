//! Turns eligible records into evidence units.
//!
//! One record fans out over every gene it affects, every trait it reports and
//! every allele origin it declares. A trait contributes only when one of its
//! names resolves to ontology terms, and an origin only when it is `germline`
//! or `somatic`.

use std::str::FromStr;

use log::debug;

use cttv_core::AlleleOrigin;
use cttv_core::utils::{clinvar_dbxref_url, clinvar_record_url};
use cttv_efo::{ResolvedTrait, TraitToEfo};

use crate::context::EligibleRecordContext;
use crate::errors::EvidenceError;
use crate::evidence::{Evidence, EvidenceInputs, Provenance};
use crate::report::{Counter, EvidenceRecordLine, RunReport};
use crate::validate::EvidenceValidator;

pub struct EvidenceExpander<'a, V: EvidenceValidator> {
    trait_to_efo: &'a TraitToEfo,
    validator: &'a V,
}

impl<'a, V: EvidenceValidator> EvidenceExpander<'a, V> {
    pub fn new(trait_to_efo: &'a TraitToEfo, validator: &'a V) -> Self {
        EvidenceExpander {
            trait_to_efo,
            validator,
        }
    }

    ///
    /// Generate, validate and keep every evidence unit of an eligible record.
    ///
    /// Returns the number of units kept. A unit that fails validation ends
    /// expansion with the validation error.
    ///
    /// # Arguments
    ///
    /// - context: the eligible record
    /// - report: run report collecting counters and evidence
    ///
    pub fn expand(
        &self,
        context: &EligibleRecordContext,
        report: &mut RunReport,
    ) -> Result<usize, EvidenceError> {
        let mut n_evidence = 0;

        for ensembl_gene_id in &context.consequence_type.ensembl_gene_ids {
            for (trait_index, names) in context.record.traits.iter().enumerate() {
                n_evidence +=
                    self.expand_trait(context, ensembl_gene_id, trait_index, names, report)?;
            }
        }

        if n_evidence > 0 {
            report.record_event(Counter::ProcessedRecords);
        }
        if n_evidence > 1 {
            report.record_event(Counter::MultipleEvidenceRecords);
        }

        Ok(n_evidence)
    }

    fn expand_trait(
        &self,
        context: &EligibleRecordContext,
        ensembl_gene_id: &str,
        trait_index: usize,
        names: &[String],
        report: &mut RunReport,
    ) -> Result<usize, EvidenceError> {
        let Some(resolved) = self.trait_to_efo.resolve(names) else {
            let preferred = names.first().map(String::as_str).unwrap_or_default();
            debug!(
                "{}: no EFO mapping for trait '{}'",
                context.record.accession, preferred
            );
            report.record_unmapped_trait(preferred);
            return Ok(0);
        };

        let origins = &context.record.allele_origins;
        let has_germline = origins.iter().any(|o| o == AlleleOrigin::Germline.as_str());
        let has_somatic = origins.iter().any(|o| o == AlleleOrigin::Somatic.as_str());
        if origins.len() > 1 {
            report.record_event(Counter::MultipleAlleleOrigins);
        }
        if has_germline && has_somatic {
            report.record_event(Counter::GermlineSomatic);
        }
        if !has_germline && !has_somatic {
            report.record_event(Counter::NoRecognisedAlleleOrigin);
        }

        let mut n_evidence = 0;
        for origin in origins {
            match AlleleOrigin::from_str(origin) {
                Ok(origin) => {
                    self.emit(context, ensembl_gene_id, trait_index, &resolved, origin, report)?;
                    n_evidence += 1;
                }
                Err(_) => report.record_unrecognised_allele_origin(origin),
            }
        }

        Ok(n_evidence)
    }

    fn emit(
        &self,
        context: &EligibleRecordContext,
        ensembl_gene_id: &str,
        trait_index: usize,
        resolved: &ResolvedTrait,
        origin: AlleleOrigin,
        report: &mut RunReport,
    ) -> Result<(), EvidenceError> {
        let accession = context.record.accession.as_str();
        let inputs = EvidenceInputs {
            accession,
            ensembl_gene_id,
            trait_index,
            rs_id: &context.rs_id,
            clinical_significance: &context.clin_sig,
            efo_terms: &resolved.efo_terms,
            so_term: &context.consequence_type.so_term,
            provenance: Provenance::new(
                clinvar_dbxref_url(accession),
                clinvar_record_url(accession),
                context.literature_for_trait(trait_index),
                context.record.date_last_updated,
            ),
        };

        let evidence = Evidence::new(origin, &inputs);
        self.validator.validate(&evidence)?;

        if context.has_nsv() {
            report.record_event(Counter::ValidRsAndNsv);
        }
        if resolved.efo_terms.len() > 1 {
            report.record_event(Counter::MultiTermTraits);
        }

        let line = EvidenceRecordLine {
            accession: accession.to_string(),
            rs_id: context.rs_id.clone(),
            trait_names: resolved
                .trait_names()
                .into_iter()
                .map(str::to_string)
                .collect(),
            efo_terms: resolved.efo_terms.clone(),
        };
        report.add_evidence(evidence, line);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use serde_json::json;

    use cttv_core::{ClinvarRecord, ConsequenceType, SoTerm};
    use cttv_efo::{MappingRow, TermSet};

    const LFS_TERM: &str = "http://www.orpha.net/ORDO/Orphanet_524";

    /// Accepts everything.
    struct AcceptAll;

    impl EvidenceValidator for AcceptAll {
        fn validate(&self, _evidence: &Evidence) -> Result<(), EvidenceError> {
            Ok(())
        }
    }

    /// Rejects everything.
    struct RejectAll;

    impl EvidenceValidator for RejectAll {
        fn validate(&self, evidence: &Evidence) -> Result<(), EvidenceError> {
            Err(EvidenceError::SchemaValidation {
                accession: evidence.accession().to_string(),
                errors: vec!["rejected".to_string()],
                evidence: String::new(),
            })
        }
    }

    #[fixture]
    fn trait_to_efo() -> TraitToEfo {
        let rows = vec![
            MappingRow::new("Li-Fraumeni syndrome", LFS_TERM),
            MappingRow::new(
                "Alt Name",
                "http://www.ebi.ac.uk/efo/EFO_0000001,http://www.ebi.ac.uk/efo/EFO_0000002",
            ),
        ];
        let (index, _) = TraitToEfo::build(rows, &TermSet::new(), &TermSet::new()).unwrap();
        index
    }

    fn record(traits: serde_json::Value, origins: &[&str]) -> ClinvarRecord {
        let observed: Vec<serde_json::Value> = origins
            .iter()
            .map(|o| json!({"sample": {"origin": o}}))
            .collect();
        let document = json!({
            "reference": "A",
            "alternate": "G",
            "clinvarSet": {
                "referenceClinVarAssertion": {
                    "clinVarAccession": {"acc": "RCV000128628"},
                    "clinicalSignificance": {"description": "Pathogenic"},
                    "observedIn": observed,
                    "traitSet": {"trait": traits}
                }
            }
        });
        ClinvarRecord::try_from(&document).unwrap()
    }

    fn single_trait(name: &str) -> serde_json::Value {
        json!([{"name": [{"elementValue": {"type": "Preferred", "value": name}}]}])
    }

    #[fixture]
    fn consequence_type() -> ConsequenceType {
        ConsequenceType::new("ENSG00000141510", SoTerm::new("missense_variant"))
    }

    #[rstest]
    fn test_origin_partition(trait_to_efo: TraitToEfo, consequence_type: ConsequenceType) {
        let record = record(
            single_trait("Li-Fraumeni syndrome"),
            &["germline", "somatic", "unknown"],
        );
        let context = EligibleRecordContext::new(&record, "rs28934578", None, &consequence_type);
        let expander = EvidenceExpander::new(&trait_to_efo, &AcceptAll);
        let mut report = RunReport::new();

        let n = expander.expand(&context, &mut report).unwrap();

        assert_eq!(n, 2);
        let origins: Vec<AlleleOrigin> = report
            .evidence()
            .iter()
            .map(|e| e.allele_origin())
            .collect();
        assert_eq!(origins, vec![AlleleOrigin::Germline, AlleleOrigin::Somatic]);
        assert_eq!(report.unrecognised_allele_origins().get("unknown"), 1);
        assert_eq!(report.count(Counter::MultipleAlleleOrigins), 1);
        assert_eq!(report.count(Counter::GermlineSomatic), 1);
        assert_eq!(report.count(Counter::NoRecognisedAlleleOrigin), 0);
        assert_eq!(report.count(Counter::ProcessedRecords), 1);
        assert_eq!(report.count(Counter::MultipleEvidenceRecords), 1);
    }

    #[rstest]
    fn test_alternate_name_is_attributed(
        trait_to_efo: TraitToEfo,
        consequence_type: ConsequenceType,
    ) {
        let traits = json!([{"name": [
            {"elementValue": {"type": "Preferred", "value": "Preferred Name"}},
            {"elementValue": {"type": "Alternate", "value": "Alt Name"}}
        ]}]);
        let record = record(traits, &["germline"]);
        let context = EligibleRecordContext::new(&record, "rs1", Some("nsv1"), &consequence_type);
        let expander = EvidenceExpander::new(&trait_to_efo, &AcceptAll);
        let mut report = RunReport::new();

        expander.expand(&context, &mut report).unwrap();

        let line = &report.evidence_records()[0];
        assert_eq!(line.trait_names, vec!["Alt Name", "Alt Name"]);
        assert_eq!(line.efo_terms.len(), 2);
        assert_eq!(report.count(Counter::MultiTermTraits), 1);
        assert_eq!(report.count(Counter::ValidRsAndNsv), 1);
        assert_eq!(report.n_distinct_efo_terms(), 2);
        assert_eq!(report.n_distinct_genes(), 1);
        assert_eq!(report.count(Counter::MultipleEvidenceRecords), 0);
    }

    #[rstest]
    fn test_unmapped_trait(trait_to_efo: TraitToEfo, consequence_type: ConsequenceType) {
        let record = record(single_trait("Never curated"), &["germline"]);
        let context = EligibleRecordContext::new(&record, "rs1", None, &consequence_type);
        let expander = EvidenceExpander::new(&trait_to_efo, &AcceptAll);
        let mut report = RunReport::new();

        let n = expander.expand(&context, &mut report).unwrap();

        assert_eq!(n, 0);
        assert_eq!(report.count(Counter::UnmappedTraits), 1);
        assert_eq!(report.unmapped_traits().get("Never curated"), 1);
        assert_eq!(report.count(Counter::ProcessedRecords), 0);
        // origin tallies only happen for resolved traits
        assert_eq!(report.count(Counter::NoRecognisedAlleleOrigin), 0);
    }

    #[rstest]
    fn test_no_recognised_origin(trait_to_efo: TraitToEfo, consequence_type: ConsequenceType) {
        let record = record(single_trait("Li-Fraumeni syndrome"), &["inherited"]);
        let context = EligibleRecordContext::new(&record, "rs1", None, &consequence_type);
        let expander = EvidenceExpander::new(&trait_to_efo, &AcceptAll);
        let mut report = RunReport::new();

        assert_eq!(expander.expand(&context, &mut report).unwrap(), 0);
        assert_eq!(report.count(Counter::NoRecognisedAlleleOrigin), 1);
        assert_eq!(report.unrecognised_allele_origins().get("inherited"), 1);
    }

    #[rstest]
    fn test_every_gene_gets_evidence(trait_to_efo: TraitToEfo) {
        let mut consequence_type =
            ConsequenceType::new("ENSG00000141510", SoTerm::new("missense_variant"));
        consequence_type.add_ensembl_gene_id("ENSG00000012048");
        let record = record(single_trait("Li-Fraumeni syndrome"), &["germline"]);
        let context = EligibleRecordContext::new(&record, "rs1", None, &consequence_type);
        let expander = EvidenceExpander::new(&trait_to_efo, &AcceptAll);
        let mut report = RunReport::new();

        assert_eq!(expander.expand(&context, &mut report).unwrap(), 2);
        assert_eq!(report.n_distinct_genes(), 2);
        assert_eq!(report.count(Counter::ProcessedRecords), 1);
        assert_eq!(report.count(Counter::MultipleEvidenceRecords), 1);
    }

    #[rstest]
    fn test_validation_failure_stops_expansion(
        trait_to_efo: TraitToEfo,
        consequence_type: ConsequenceType,
    ) {
        let record = record(single_trait("Li-Fraumeni syndrome"), &["germline"]);
        let context = EligibleRecordContext::new(&record, "rs1", None, &consequence_type);
        let expander = EvidenceExpander::new(&trait_to_efo, &RejectAll);
        let mut report = RunReport::new();

        let result = expander.expand(&context, &mut report);

        assert_eq!(result.is_err(), true);
        assert_eq!(report.evidence().len(), 0);
    }
}
