//! End-to-end runs: fixture lookups + JSON-lines records → output directory

use std::fs::{read_to_string, write};
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use rstest::*;
use serde_json::{Value, json};
use tempfile::{TempDir, tempdir};

use cttv_evidence::{Counter, EvidenceError, PipelineConfig, generate_evidence};

const DATA: &str = "../tests/data";
const TP53_URI: &str = "http://identifiers.org/ensembl/ENSG00000141510";

fn data(name: &str) -> PathBuf {
    Path::new(DATA).join(name)
}

/// Config over the fixture lookups, writing into `out`.
fn config(records: &Path, out: &Path) -> PipelineConfig {
    PipelineConfig {
        efo_mapping_file: Some(data("efo_mapping.tsv")),
        ignore_terms_file: Some(data("ignore.txt")),
        adapt_terms_file: Some(data("adapt.txt")),
        snp_to_gene_file: Some(data("consequences.tsv")),
        variant_summary_file: Some(data("variant_summary.tsv")),
        json_file: Some(records.to_path_buf()),
        out_dir: Some(out.to_path_buf()),
        ..Default::default()
    }
}

fn document(clin_sig: &str, reference: &str, alternate: &str, origins: &[&str]) -> Value {
    let observed: Vec<Value> = origins
        .iter()
        .map(|o| json!({"sample": {"origin": o}}))
        .collect();
    json!({
        "reference": reference,
        "alternate": alternate,
        "clinvarSet": {
            "referenceClinVarAssertion": {
                "clinVarAccession": {"acc": "RCV000000001"},
                "clinicalSignificance": {"description": clin_sig},
                "observedIn": observed,
                "traitSet": {"trait": [
                    {"name": [{"elementValue": {"type": "Preferred", "value": "Li-Fraumeni syndrome"}}]}
                ]}
            }
        }
    })
}

/// Write documents as JSON lines and return the directory and file.
fn records_file(documents: &[Value]) -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("records.jsonl");
    let lines: Vec<String> = documents.iter().map(|d| d.to_string()).collect();
    write(&path, lines.join("\n")).unwrap();
    (dir, path)
}

fn evidence_lines(out: &Path) -> Vec<Value> {
    read_to_string(out.join("evidence_strings.json"))
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[rstest]
fn test_single_germline_record() {
    let (dir, records) = records_file(&[document("pathogenic", "A", "G", &["germline"])]);
    let out = dir.path().join("out");

    let report = generate_evidence(&config(&records, &out)).unwrap();

    assert_eq!(report.evidence().len(), 1);
    assert_eq!(report.count(Counter::ProcessedRecords), 1);
    assert_eq!(report.count(Counter::UnmappedTraits), 0);

    let evidence = evidence_lines(&out);
    assert_eq!(evidence.len(), 1);
    assert_eq!(evidence[0]["type"], "genetic_association");
    assert_eq!(evidence[0]["target"]["id"], TP53_URI);
    assert_eq!(
        evidence[0]["disease"]["id"],
        json!(["http://www.orpha.net/ORDO/Orphanet_524"])
    );
    assert_eq!(
        read_to_string(out.join("evidence_records.tsv")).unwrap(),
        "RCV000000001\trs121912651\tLi-Fraumeni syndrome\thttp://www.orpha.net/ORDO/Orphanet_524\n"
    );
}

#[rstest]
fn test_same_ref_alt_is_skipped() {
    let (dir, records) = records_file(&[document("pathogenic", "A", "A", &["germline"])]);
    let out = dir.path().join("out");

    let report = generate_evidence(&config(&records, &out)).unwrap();

    assert_eq!(report.evidence().len(), 0);
    assert_eq!(report.count(Counter::SameRefAlt), 1);
    assert_eq!(report.count(Counter::UnmappedTraits), 0);
    assert_eq!(report.unmapped_traits().is_empty(), true);
    assert_eq!(evidence_lines(&out).len(), 0);
}

#[rstest]
fn test_uncertain_significance_is_filtered_by_default() {
    let mut doc = document("uncertain significance", "A", "G", &["germline"]);
    doc["clinvarSet"]["referenceClinVarAssertion"]["traitSet"]["trait"][0]["name"][0]
        ["elementValue"]["value"] = json!("Unmapped disease");
    let (dir, records) = records_file(&[doc]);
    let out = dir.path().join("out");

    let report = generate_evidence(&config(&records, &out)).unwrap();

    assert_eq!(report.evidence().len(), 0);
    assert_eq!(report.count(Counter::SkippedClinSig), 1);
    assert_eq!(report.count(Counter::UnmappedTraits), 0);
}

#[rstest]
fn test_allele_origins_are_partitioned() {
    let (dir, records) = records_file(&[document(
        "pathogenic",
        "A",
        "G",
        &["germline", "somatic", "unknown"],
    )]);
    let out = dir.path().join("out");

    let report = generate_evidence(&config(&records, &out)).unwrap();

    let types: Vec<Value> = evidence_lines(&out)
        .into_iter()
        .map(|e| e["type"].clone())
        .collect();
    assert_eq!(types, vec![json!("genetic_association"), json!("somatic_mutation")]);
    assert_eq!(report.unrecognised_allele_origins().get("unknown"), 1);
    assert_eq!(report.count(Counter::MultipleAlleleOrigins), 1);
    assert_eq!(report.count(Counter::GermlineSomatic), 1);
    assert_eq!(report.count(Counter::MultipleEvidenceRecords), 1);
}

#[rstest]
fn test_fixture_run() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("out");
    let config = config(&data("clinvar_records.jsonl"), &out).merge(PipelineConfig {
        page_size: Some(3),
        ..Default::default()
    });

    let report = generate_evidence(&config).unwrap();

    assert_eq!(report.count(Counter::TotalRecords), 8);
    assert_eq!(report.count(Counter::RecordsSeen), 8);
    assert_eq!(report.evidence().len(), 4);
    assert_eq!(report.count(Counter::ProcessedRecords), 3);
    assert_eq!(report.count(Counter::MultipleEvidenceRecords), 1);
    assert_eq!(report.count(Counter::SkippedClinSig), 2);
    assert_eq!(report.count(Counter::SameRefAlt), 1);
    assert_eq!(report.count(Counter::NoRsId), 1);
    assert_eq!(report.count(Counter::NoConsequenceMapping), 1);
    assert_eq!(report.count(Counter::UnmappedTraits), 1);
    assert_eq!(report.count(Counter::Nsvs), 2);
    assert_eq!(report.count(Counter::ValidRsAndNsv), 2);
    assert_eq!(report.count(Counter::MultiTermTraits), 2);
    assert_eq!(report.n_distinct_genes(), 3);
    assert_eq!(report.n_distinct_efo_terms(), 4);
    assert_eq!(
        report.unrecognised_clin_sigs(),
        &["conflicting interpretations of pathogenicity".to_string()]
    );

    assert_eq!(
        read_to_string(out.join("nsvlist.txt")).unwrap(),
        "nsv1067853\nnsv1067916\n"
    );
    assert_eq!(
        read_to_string(out.join("unmappedTraits.tsv")).unwrap(),
        "Trait\tCount\nNever curated trait\t1\n"
    );
    assert_eq!(
        read_to_string(out.join("unavailableefo.tsv")).unwrap(),
        "Trait\tCount\nhttp://www.orpha.net/ORDO/Orphanet_99999\t1\n"
    );

    // the alternate name resolved, and the adapted fallback term is used
    let records = read_to_string(out.join("evidence_records.tsv")).unwrap();
    assert_eq!(
        records.contains("RCV000000004\trs28934578\tHereditary breast and ovarian cancer syndrome,Hereditary breast and ovarian cancer syndrome\t"),
        true
    );
    assert_eq!(
        records.contains("http://purl.bioontology.org/ORDO/Orphanet_99999"),
        true
    );

    let summary = read_to_string(out.join("summary.txt")).unwrap();
    assert_eq!(
        summary.starts_with(
            "8 ClinVar records in total\n8 ClinVar records read\n4 EFO mappings loaded\n4 evidence string jsons generated"
        ),
        true
    );
    assert_eq!(report.n_efo_mappings(), 4);
}

#[rstest]
fn test_obsolete_term_aborts_the_run() {
    let (dir, records) = records_file(&[document("pathogenic", "A", "G", &["germline"])]);
    let out = dir.path().join("out");
    let config = config(&records, &out).merge(PipelineConfig {
        obsolete_terms_file: Some(data("obsolete.txt")),
        ..Default::default()
    });

    let err = generate_evidence(&config).unwrap_err();

    assert_eq!(
        matches!(
            err.downcast_ref::<EvidenceError>(),
            Some(EvidenceError::ObsoleteTerm { accession, .. }) if accession == "RCV000000001"
        ),
        true
    );
    assert_eq!(out.join("evidence_strings.json").exists(), false);
}

#[rstest]
fn test_schema_failure_aborts_the_run() {
    let (dir, records) = records_file(&[document("pathogenic", "A", "G", &["germline"])]);
    let schema = dir.path().join("schema.json");
    write(&schema, r#"{"type": "object", "required": ["never_generated"]}"#).unwrap();
    let config = config(&records, &dir.path().join("out")).merge(PipelineConfig {
        schema_file: Some(schema),
        ..Default::default()
    });

    let err = generate_evidence(&config).unwrap_err();

    assert_eq!(
        matches!(
            err.downcast_ref::<EvidenceError>(),
            Some(EvidenceError::SchemaValidation { .. })
        ),
        true
    );
}

#[rstest]
fn test_unhandled_adapt_term_stops_before_records() {
    let dir = tempdir().unwrap();
    let mapping = dir.path().join("mapping.tsv");
    write(
        &mapping,
        "ClinVar Name\tMapped EFO URLs\nBroken trait\thttp://www.orpha.net/ORDO/orphanet_999999\n",
    )
    .unwrap();
    let adapt = dir.path().join("adapt.txt");
    write(&adapt, "http://www.orpha.net/ORDO/orphanet_999999\n").unwrap();
    // never opened: the mapping build fails first
    let records = dir.path().join("missing.jsonl");
    let out = dir.path().join("out");

    let config = config(&records, &out).merge(PipelineConfig {
        efo_mapping_file: Some(mapping),
        adapt_terms_file: Some(adapt),
        ..Default::default()
    });

    let err = generate_evidence(&config).unwrap_err();

    assert_eq!(
        err.chain()
            .any(|e| e.to_string().contains("Unhandled url type")),
        true
    );
    assert_eq!(out.exists(), false);
}
