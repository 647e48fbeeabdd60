//! Fixed vocabularies and evidence string constants.

/// Clinical significances allowed to generate evidence unless configured otherwise.
pub const DEFAULT_ALLOWED_CLINICAL_SIGNIFICANCE: &[&str] = &[
    "pathogenic",
    "likely pathogenic",
    "protective",
    "association",
    "risk_factor",
    "affects",
    "drug response",
];

/// Clinical significance values described in the ClinVar documentation.
pub const DOCUMENTED_CLINICAL_SIGNIFICANCE: &[&str] = &[
    "unknown",
    "untested",
    "non-pathogenic",
    "probable-non-pathogenic",
    "probable-pathogenic",
    "pathogenic",
    "drug-response",
    "drug response",
    "histocompatibility",
    "other",
    "benign",
    "protective",
    "not provided",
    "likely benign",
    "confers sensitivity",
    "uncertain significance",
    "likely pathogenic",
    "conflicting data from submitters",
    "risk factor",
    "association",
];

pub const SCHEMA_VERSION: &str = "1.2.8";
pub const GENETICS_SOURCE_ID: &str = "eva";
pub const SOMATIC_SOURCE_ID: &str = "eva_somatic";
pub const GENETICS_TYPE: &str = "genetic_association";
pub const SOMATIC_TYPE: &str = "somatic_mutation";
pub const ACCESS_LEVEL: &str = "public";

pub const TARGET_TYPE: &str = "http://identifiers.org/cttv.target/gene_variant";
pub const ACTIVITY_PREFIX: &str = "http://identifiers.org/cttv.activity/";
pub const VARIANT_TYPE: &str = "snp single";

pub const DATABASE_ID: &str = "EVA";
pub const DATABASE_VERSION: &str = "1.0";
pub const DBXREF_ID: &str = "http://identifiers.org/clinvar";
pub const DBXREF_VERSION: &str = "2017-08";

/// Evidence code of the rs to gene mapping.
pub const GENE_TO_VARIANT_EVIDENCE_CODE: &str = "http://identifiers.org/eco/cttv_mapping_pipeline";
/// "curator inference used in manual assertion".
pub const VARIANT_TO_DISEASE_EVIDENCE_CODE: &str = "http://purl.obolibrary.org/obo/ECO_0000205";

pub const CLINVAR_NICE_NAME: &str = "Further details in ClinVar database";
pub const EXPERT_STATEMENT: &str =
    "Primary submitter of data to ClinVar curated the association of this variant with the disease";
pub const RESOURCE_SCORE_DESCRIPTION: &str = "Not provided by data supplier";
pub const GENETICS_PVALUE: f64 = 1e-07;
pub const SOMATIC_PROBABILITY: f64 = 1.0;

/// Bundled JSON schema used when no schema file is configured.
pub const BUNDLED_SCHEMA: &str = include_str!("../resources/evidence_schema.json");
