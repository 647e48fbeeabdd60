use thiserror::Error;

/// Fatal problems found while building evidence.
#[derive(Error, Debug)]
pub enum EvidenceError {
    #[error(
        "Evidence string does not validate against schema.\nClinVar accession: {accession}\n{}\n{evidence}",
        .errors.join("\n")
    )]
    SchemaValidation {
        accession: String,
        errors: Vec<String>,
        evidence: String,
    },

    #[error("Obsolete EFO term.\nClinVar accession: {accession}\nTerm: {term}\n{evidence}")]
    ObsoleteTerm {
        accession: String,
        term: String,
        evidence: String,
    },

    #[error("Invalid evidence schema: {0}")]
    InvalidSchema(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required setting `{0}`")]
    MissingSetting(&'static str),
    #[error("Page size must be at least 1")]
    InvalidPageSize,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
