//! The evidence generation run: load the lookups, stream every ClinVar
//! record through the filter and the expander, then write the outputs.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use cttv_core::ClinvarRecord;
use cttv_efo::{TermSet, TraitToEfo};
use cttv_io::{
    ConsequenceTypeIndex, JsonLinesFetcher, PagedRecords, RawPage, VariantIdLookup,
    VariantSummary,
};

use crate::config::PipelineConfig;
use crate::consts::DOCUMENTED_CLINICAL_SIGNIFICANCE;
use crate::errors::EvidenceError;
use crate::expander::EvidenceExpander;
use crate::filter::RecordFilter;
use crate::report::{Counter, RunReport};
use crate::validate::{EvidenceValidator, SchemaValidator};

type Pages = Box<dyn Iterator<Item = cttv_io::Result<RawPage>>>;

///
/// The lookups a run reads from. All of them are built before the first
/// record is read and never change afterwards.
///
pub struct PipelineInputs<'a> {
    pub trait_to_efo: &'a TraitToEfo,
    pub variant_ids: &'a VariantSummary,
    pub consequence_types: &'a ConsequenceTypeIndex,
    pub allowed_clinical_significance: &'a [String],
}

///
/// Push a single record through filtering and expansion.
///
/// Returns the number of evidence units kept for the record.
///
pub fn process_record<V: EvidenceValidator>(
    record: &ClinvarRecord,
    filter: &RecordFilter<VariantSummary, ConsequenceTypeIndex>,
    expander: &EvidenceExpander<V>,
    variant_ids: &VariantSummary,
    report: &mut RunReport,
) -> Result<usize, EvidenceError> {
    report.record_event(Counter::RecordsSeen);

    if let Some(nsv) = variant_ids.get_nsv(&record.accession) {
        report.record_event(Counter::Nsvs);
        report.record_nsv(nsv);
    }

    let clin_sig = record.clin_sig();
    if !DOCUMENTED_CLINICAL_SIGNIFICANCE.contains(&clin_sig.as_str()) {
        report.record_unrecognised_clin_sig(&clin_sig);
    }

    match filter.filter(record, report) {
        Some(context) => expander.expand(&context, report),
        None => Ok(0),
    }
}

///
/// Consume every page of records, filling `report`.
///
/// Stops at the first source error, malformed record or evidence that does
/// not validate.
///
/// # Arguments
///
/// - pages: the record source
/// - inputs: lookups shared by every record
/// - validator: gate every evidence unit must pass
/// - report: run report
/// - progress: optional spinner ticked once per record
///
pub fn run<I, V>(
    pages: I,
    inputs: &PipelineInputs,
    validator: &V,
    report: &mut RunReport,
    progress: Option<&ProgressBar>,
) -> Result<()>
where
    I: IntoIterator<Item = cttv_io::Result<RawPage>>,
    V: EvidenceValidator,
{
    let filter = RecordFilter::new(
        inputs.allowed_clinical_significance,
        inputs.variant_ids,
        inputs.consequence_types,
    );
    let expander = EvidenceExpander::new(inputs.trait_to_efo, validator);

    for page in pages {
        let page = page.context("Failed to fetch ClinVar records")?;
        report.record_events(Counter::TotalRecords, page.len() as u64);

        for document in &page.records {
            let record = ClinvarRecord::try_from(document).with_context(|| {
                format!(
                    "Malformed ClinVar record after {} records",
                    report.count(Counter::RecordsSeen)
                )
            })?;

            process_record(&record, &filter, &expander, inputs.variant_ids, report)?;

            if let Some(pb) = progress {
                pb.inc(1);
            }
        }
    }

    Ok(())
}

fn open_pages(config: &PipelineConfig) -> Result<Pages> {
    let page_size = config.page_size()?;

    if let Some(json_file) = &config.json_file {
        info!("Reading ClinVar records from {:?}", json_file);
        let fetcher = JsonLinesFetcher::from_path(json_file)?;
        return Ok(Box::new(PagedRecords::with_page_size(fetcher, page_size)));
    }

    open_remote_pages(config, page_size)
}

#[cfg(feature = "http")]
fn open_remote_pages(config: &PipelineConfig, page_size: usize) -> Result<Pages> {
    info!("Fetching ClinVar records from {}", config.cellbase_host());
    let fetcher = cttv_io::CellbaseFetcher::new(config.cellbase_host());
    Ok(Box::new(PagedRecords::with_page_size(fetcher, page_size)))
}

#[cfg(not(feature = "http"))]
fn open_remote_pages(_config: &PipelineConfig, _page_size: usize) -> Result<Pages> {
    anyhow::bail!("No JSON-lines record file given and HTTP support is not compiled in")
}

fn spinner() -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg} ({pos} records, {per_sec})")?,
    );
    pb.set_message("Generating evidence");
    Ok(pb)
}

///
/// Run the whole pipeline described by `config` and write every output file.
///
/// # Arguments
///
/// - config: a complete run configuration
///
pub fn generate_evidence(config: &PipelineConfig) -> Result<RunReport> {
    config.validate()?;
    let out_dir = config.out_dir()?;

    let (trait_to_efo, unavailable_efo) = TraitToEfo::from_files(
        config.efo_mapping_file()?,
        config.ignore_terms_file.as_deref(),
        config.adapt_terms_file.as_deref(),
    )?;
    let consequence_types = ConsequenceTypeIndex::from_file(config.snp_to_gene_file()?)?;
    let variant_ids = VariantSummary::from_file(config.variant_summary_file()?)?;

    let obsolete_terms = TermSet::load(config.obsolete_terms_file.as_deref())?;
    let validator = SchemaValidator::from_file(config.schema_file.as_deref(), obsolete_terms)?;

    let allowed_clinical_significance = config.allowed_clinical_significance();
    let inputs = PipelineInputs {
        trait_to_efo: &trait_to_efo,
        variant_ids: &variant_ids,
        consequence_types: &consequence_types,
        allowed_clinical_significance: &allowed_clinical_significance,
    };

    let mut report = RunReport::new();
    report.set_n_efo_mappings(trait_to_efo.len());
    report.set_unavailable_efo(unavailable_efo);

    let pages = open_pages(config)?;
    let pb = spinner()?;
    let result = run(pages, &inputs, &validator, &mut report, Some(&pb));
    pb.finish_with_message(format!(
        "{} records read, {} evidence strings generated",
        report.count(Counter::RecordsSeen),
        report.evidence().len()
    ));
    result?;

    report.write_output(out_dir)?;
    info!("Outputs written to {:?}", out_dir);

    println!("{}", report);

    Ok(report)
}
