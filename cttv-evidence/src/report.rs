//! Run-wide accumulation of counters, frequency tables and generated evidence.
//!
//! A single [`RunReport`] is created at the start of a run, handed down to
//! every stage by mutable reference and turned into output files and a
//! textual summary at the end.

use std::fmt;
use std::fs::{File, create_dir_all};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use fxhash::{FxHashMap, FxHashSet};

use cttv_core::FrequencyTable;
use cttv_core::consts::{
    EVIDENCE_RECORDS_FILE_NAME, EVIDENCE_STRINGS_FILE_NAME, NSV_LIST_FILE_NAME,
    SUMMARY_FILE_NAME, UNAVAILABLE_EFO_FILE_NAME, UNMAPPED_TRAITS_FILE_NAME,
};

use crate::evidence::Evidence;

/// Named events counted during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Counter {
    /// Documents returned by the record source.
    TotalRecords,
    /// Documents handed to the filter.
    RecordsSeen,
    /// Records that produced at least one evidence unit.
    ProcessedRecords,
    /// Records that produced more than one evidence unit.
    MultipleEvidenceRecords,
    SkippedClinSig,
    NsvSkippedClinSig,
    SameRefAlt,
    NsvSkippedSameRefAlt,
    NoRsId,
    NoConsequenceMapping,
    UnmappedTraits,
    NoRecognisedAlleleOrigin,
    MultipleAlleleOrigins,
    GermlineSomatic,
    MultiTermTraits,
    ValidRsAndNsv,
    Nsvs,
}

impl Counter {
    pub const ALL: [Counter; 17] = [
        Counter::TotalRecords,
        Counter::RecordsSeen,
        Counter::ProcessedRecords,
        Counter::MultipleEvidenceRecords,
        Counter::SkippedClinSig,
        Counter::NsvSkippedClinSig,
        Counter::SameRefAlt,
        Counter::NsvSkippedSameRefAlt,
        Counter::NoRsId,
        Counter::NoConsequenceMapping,
        Counter::UnmappedTraits,
        Counter::NoRecognisedAlleleOrigin,
        Counter::MultipleAlleleOrigins,
        Counter::GermlineSomatic,
        Counter::MultiTermTraits,
        Counter::ValidRsAndNsv,
        Counter::Nsvs,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Counter::TotalRecords => "n_total_clinvar_records",
            Counter::RecordsSeen => "record_counter",
            Counter::ProcessedRecords => "n_processed_clinvar_records",
            Counter::MultipleEvidenceRecords => "n_multiple_evidence_strings",
            Counter::SkippedClinSig => "n_skipped_clin_sig",
            Counter::NsvSkippedClinSig => "n_nsv_skipped_clin_sig",
            Counter::SameRefAlt => "n_same_ref_alt",
            Counter::NsvSkippedSameRefAlt => "n_nsv_skipped_wrong_ref_alt",
            Counter::NoRsId => "n_pathogenic_no_rs",
            Counter::NoConsequenceMapping => "no_variant_to_ensg_mapping",
            Counter::UnmappedTraits => "n_missed_strings_unmapped_traits",
            Counter::NoRecognisedAlleleOrigin => "n_records_no_recognised_allele_origin",
            Counter::MultipleAlleleOrigins => "n_multiple_allele_origin",
            Counter::GermlineSomatic => "n_germline_somatic",
            Counter::MultiTermTraits => "n_more_than_one_efo_term",
            Counter::ValidRsAndNsv => "n_valid_rs_and_nsv",
            Counter::Nsvs => "n_nsvs",
        }
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One line of `evidence_records.tsv`.
#[derive(Debug, Clone, PartialEq)]
pub struct EvidenceRecordLine {
    pub accession: String,
    pub rs_id: String,
    pub trait_names: Vec<String>,
    pub efo_terms: Vec<String>,
}

impl EvidenceRecordLine {
    pub fn to_tsv(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}",
            self.accession,
            self.rs_id,
            self.trait_names.join(","),
            self.efo_terms.join(",")
        )
    }
}

///
/// Everything a run counts and collects.
///
#[derive(Debug, Default)]
pub struct RunReport {
    counters: FxHashMap<Counter, u64>,
    evidence: Vec<Evidence>,
    evidence_records: Vec<EvidenceRecordLine>,
    unmapped_traits: FrequencyTable,
    unavailable_efo: FrequencyTable,
    n_efo_mappings: usize,
    unrecognised_allele_origins: FrequencyTable,
    unrecognised_clin_sigs: Vec<String>,
    nsv_list: Vec<String>,
    nsv_seen: FxHashSet<String>,
    efo_terms: FxHashSet<String>,
    ensembl_gene_id_uris: FxHashSet<String>,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_event(&mut self, counter: Counter) {
        self.record_events(counter, 1);
    }

    pub fn record_events(&mut self, counter: Counter, n: u64) {
        *self.counters.entry(counter).or_insert(0) += n;
    }

    pub fn count(&self, counter: Counter) -> u64 {
        self.counters.get(&counter).copied().unwrap_or(0)
    }

    pub fn record_unmapped_trait(&mut self, trait_name: &str) {
        self.record_event(Counter::UnmappedTraits);
        self.unmapped_traits.increment(trait_name);
    }

    pub fn record_unrecognised_allele_origin(&mut self, origin: &str) {
        self.unrecognised_allele_origins.increment(origin);
    }

    pub fn record_unrecognised_clin_sig(&mut self, clin_sig: &str) {
        if !self.unrecognised_clin_sigs.iter().any(|c| c == clin_sig) {
            self.unrecognised_clin_sigs.push(clin_sig.to_string());
        }
    }

    /// Keep a structural variant id, once, in first-seen order.
    pub fn record_nsv(&mut self, nsv: &str) {
        if self.nsv_seen.insert(nsv.to_string()) {
            self.nsv_list.push(nsv.to_string());
        }
    }

    /// Adapted URL counts produced while building the mapping index.
    pub fn set_unavailable_efo(&mut self, unavailable_efo: FrequencyTable) {
        self.unavailable_efo = unavailable_efo;
    }

    /// Number of trait names in the mapping index the run resolves against.
    pub fn set_n_efo_mappings(&mut self, n_efo_mappings: usize) {
        self.n_efo_mappings = n_efo_mappings;
    }

    /// Keep an accepted evidence unit together with its summary line.
    pub fn add_evidence(&mut self, evidence: Evidence, line: EvidenceRecordLine) {
        for term in evidence.efo_terms() {
            self.efo_terms.insert(term.clone());
        }
        self.ensembl_gene_id_uris
            .insert(evidence.target_id().to_string());
        self.evidence.push(evidence);
        self.evidence_records.push(line);
    }

    pub fn evidence(&self) -> &[Evidence] {
        &self.evidence
    }

    pub fn evidence_records(&self) -> &[EvidenceRecordLine] {
        &self.evidence_records
    }

    pub fn unmapped_traits(&self) -> &FrequencyTable {
        &self.unmapped_traits
    }

    pub fn unavailable_efo(&self) -> &FrequencyTable {
        &self.unavailable_efo
    }

    pub fn n_efo_mappings(&self) -> usize {
        self.n_efo_mappings
    }

    pub fn unrecognised_allele_origins(&self) -> &FrequencyTable {
        &self.unrecognised_allele_origins
    }

    pub fn unrecognised_clin_sigs(&self) -> &[String] {
        &self.unrecognised_clin_sigs
    }

    pub fn nsv_list(&self) -> &[String] {
        &self.nsv_list
    }

    pub fn n_distinct_efo_terms(&self) -> usize {
        self.efo_terms.len()
    }

    pub fn n_distinct_genes(&self) -> usize {
        self.ensembl_gene_id_uris.len()
    }

    ///
    /// Write every output file of the run into `dir_out`, creating it if needed.
    ///
    /// # Arguments
    ///
    /// - dir_out: output directory
    ///
    pub fn write_output(&self, dir_out: &Path) -> Result<()> {
        create_dir_all(dir_out)
            .with_context(|| format!("Failed to create output directory: {:?}", dir_out))?;

        let mut nsv_writer = create_writer(&dir_out.join(NSV_LIST_FILE_NAME))?;
        for nsv in &self.nsv_list {
            writeln!(nsv_writer, "{}", nsv)?;
        }
        nsv_writer.flush()?;

        let mut unmapped_writer = create_writer(&dir_out.join(UNMAPPED_TRAITS_FILE_NAME))?;
        self.unmapped_traits
            .write_tsv(&mut unmapped_writer, ("Trait", "Count"))?;
        unmapped_writer.flush()?;

        let mut unavailable_writer = create_writer(&dir_out.join(UNAVAILABLE_EFO_FILE_NAME))?;
        self.unavailable_efo
            .write_tsv(&mut unavailable_writer, ("Trait", "Count"))?;
        unavailable_writer.flush()?;

        let mut evidence_writer = create_writer(&dir_out.join(EVIDENCE_STRINGS_FILE_NAME))?;
        for evidence in &self.evidence {
            writeln!(evidence_writer, "{}", evidence.to_json_string()?)?;
        }
        evidence_writer.flush()?;

        let mut records_writer = create_writer(&dir_out.join(EVIDENCE_RECORDS_FILE_NAME))?;
        for line in &self.evidence_records {
            writeln!(records_writer, "{}", line.to_tsv())?;
        }
        records_writer.flush()?;

        let mut summary_writer = create_writer(&dir_out.join(SUMMARY_FILE_NAME))?;
        writeln!(summary_writer, "{}", self)?;
        summary_writer.flush()?;

        Ok(())
    }
}

fn create_writer(path: &Path) -> Result<BufWriter<File>> {
    let file =
        File::create(path).with_context(|| format!("Failed to create output file: {:?}", path))?;
    Ok(BufWriter::new(file))
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ClinVar records in total", self.count(Counter::TotalRecords))?;
        writeln!(f, "{} ClinVar records read", self.count(Counter::RecordsSeen))?;
        writeln!(f, "{} EFO mappings loaded", self.n_efo_mappings)?;
        writeln!(f, "{} evidence string jsons generated", self.evidence.len())?;
        writeln!(
            f,
            "{} ClinVar records generated at least one evidence string",
            self.count(Counter::ProcessedRecords)
        )?;
        writeln!(
            f,
            "{} Clinical significance string(s) not found among those described in ClinVar documentation:",
            self.unrecognised_clin_sigs.len()
        )?;
        writeln!(f, "{{{}}}", self.unrecognised_clin_sigs.join(", "))?;
        writeln!(
            f,
            "{} ClinVar records were skipped because of a clinical significance outside the allowed list",
            self.count(Counter::SkippedClinSig)
        )?;
        writeln!(
            f,
            "{} ClinVar records with allowed clinical significance did present the same reference and alternate and were skipped",
            self.count(Counter::SameRefAlt)
        )?;
        writeln!(
            f,
            "Activities of those ClinVar records with unrecognized clinical significances were set to \"unknown\"."
        )?;
        writeln!(
            f,
            "{} distinct ensembl gene ids appear in generated evidence string json objects",
            self.n_distinct_genes()
        )?;
        writeln!(
            f,
            "{} distinct trait names found to include in generated evidence string json objects",
            self.n_distinct_efo_terms()
        )?;
        writeln!(
            f,
            "{} ClinVar records with allowed clinical significance DO NOT have an rs id",
            self.count(Counter::NoRsId)
        )?;
        writeln!(
            f,
            "{} ClinVar records generated more than one evidence_string",
            self.count(Counter::MultipleEvidenceRecords)
        )?;
        writeln!(
            f,
            "{} ClinVar records with germline and somatic origins",
            self.count(Counter::GermlineSomatic)
        )?;
        writeln!(
            f,
            "{} ClinVar records with more than one allele origin",
            self.count(Counter::MultipleAlleleOrigins)
        )?;
        writeln!(f, "Number valid ClinVar records with unprocessed allele origins:")?;
        for (origin, count) in self.unrecognised_allele_origins.iter() {
            writeln!(f, " {}: {}", origin, count)?;
        }
        writeln!(
            f,
            "{} ClinVar records with allowed clinical significance and valid rs id were skipped due to a lack of Variant->ENSG mapping.",
            self.count(Counter::NoConsequenceMapping)
        )?;
        writeln!(
            f,
            "{} ClinVar records with allowed clinical significance, valid rs id and Variant->ENSG mapping were skipped due to a lack of EFO mapping (see {}).",
            self.count(Counter::UnmappedTraits),
            UNMAPPED_TRAITS_FILE_NAME
        )?;
        writeln!(
            f,
            "{} ClinVar records with allowed clinical significance, valid rs id, valid Variant->ENSG mapping and valid EFO mapping were skipped due to a lack of a valid alleleOrigin.",
            self.count(Counter::NoRecognisedAlleleOrigin)
        )?;
        writeln!(
            f,
            "{} evidence strings with more than one trait mapped to EFO terms",
            self.count(Counter::MultiTermTraits)
        )?;
        writeln!(
            f,
            "{} evidence strings were generated with traits without EFO correspondence",
            self.unavailable_efo.len()
        )?;
        writeln!(
            f,
            "{} evidence strings were generated from ClinVar records with rs and nsv ids",
            self.count(Counter::ValidRsAndNsv)
        )?;
        writeln!(f, "{} total nsvs found", self.count(Counter::Nsvs))?;
        writeln!(
            f,
            "{} ClinVar nsvs were skipped because of a different clinical significance",
            self.count(Counter::NsvSkippedClinSig)
        )?;
        write!(
            f,
            "{} ClinVar nsvs were skipped because of same ref and alt",
            self.count(Counter::NsvSkippedSameRefAlt)
        )
    }
}
