//! Identifier prefixes and output file names shared across the workspace.

// Identifier namespaces used when building evidence

/// Prefix for Ensembl gene URIs, e.g. `http://identifiers.org/ensembl/ENSG00000141510`.
pub const ENSEMBL_GENE_URI_PREFIX: &str = "http://identifiers.org/ensembl/";

/// Prefix for dbSNP variant URIs.
pub const DBSNP_URI_PREFIX: &str = "http://identifiers.org/dbsnp/";

/// Prefix for the database cross reference of a ClinVar record.
pub const CLINVAR_DBXREF_PREFIX: &str = "http://identifiers.org/clinvar.record/";

/// Prefix for the human readable ClinVar record page.
pub const CLINVAR_RECORD_URL_PREFIX: &str = "http://www.ncbi.nlm.nih.gov/clinvar/";

/// Prefix for literature references.
pub const EUROPEPMC_PREFIX: &str = "http://europepmc.org/abstract/MED/";

/// Prefix for Sequence Ontology terms.
pub const SO_URI_PREFIX: &str = "http://purl.obolibrary.org/obo/";

// Output files written at the end of a run

pub const EVIDENCE_STRINGS_FILE_NAME: &str = "evidence_strings.json";
pub const EVIDENCE_RECORDS_FILE_NAME: &str = "evidence_records.tsv";
pub const UNMAPPED_TRAITS_FILE_NAME: &str = "unmappedTraits.tsv";
pub const UNAVAILABLE_EFO_FILE_NAME: &str = "unavailableefo.tsv";
pub const NSV_LIST_FILE_NAME: &str = "nsvlist.txt";
pub const SUMMARY_FILE_NAME: &str = "summary.txt";
