use thiserror::Error;

#[derive(Error, Debug)]
pub enum EfoMappingError {
    /// An adapt term whose namespace has no fallback rule.
    #[error("Unhandled url type: {0}")]
    UnhandledTermNamespace(String),

    #[error("Error reading mapping table: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type EfoMappingResult<T> = std::result::Result<T, EfoMappingError>;
