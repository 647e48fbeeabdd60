use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Can't read file: {0}")]
    FileReadError(String),

    #[error("Malformed Cellbase ClinVar document: {0}")]
    MalformedRecord(String),

    #[error("ClinVar record has no accession")]
    MissingAccession,

    #[error("Unknown allele origin: {0}")]
    UnknownAlleleOrigin(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
