use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use cttv_core::utils::get_dynamic_reader;

use crate::errors::EfoMappingResult;

/// Separator between term URLs in the second column of the mapping table.
pub const TERM_SEPARATOR: char = ',';

///
/// One curated row of the mapping table: a ClinVar trait name and the
/// ontology terms it was mapped to.
///
#[derive(Debug, Clone, PartialEq)]
pub struct MappingRow {
    pub trait_name: String,
    pub term_urls: Vec<String>,
}

impl MappingRow {
    pub fn new(trait_name: &str, term_urls: &str) -> Self {
        MappingRow {
            trait_name: trait_name.to_string(),
            term_urls: split_term_urls(term_urls),
        }
    }
}

/// Split a comma separated list of term URLs, dropping empty pieces.
pub fn split_term_urls(raw: &str) -> Vec<String> {
    raw.split(TERM_SEPARATOR)
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(String::from)
        .collect()
}

///
/// Read mapping rows from any tab separated source. The first row is a header.
/// Only the first two columns are read, and rows whose term column is empty
/// are left out.
///
pub fn read_mapping_rows<R: Read>(reader: R) -> EfoMappingResult<Vec<MappingRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;

        let (Some(trait_name), Some(term_urls)) = (record.get(0), record.get(1)) else {
            continue;
        };
        if term_urls.trim().is_empty() {
            continue;
        }

        rows.push(MappingRow::new(trait_name, term_urls));
    }

    Ok(rows)
}

///
/// Read the mapping table from disk (plain or gzipped TSV).
///
/// # Arguments
///
/// - path: path to the mapping table
///
pub fn read_mapping_table(path: &Path) -> Result<Vec<MappingRow>> {
    let reader = get_dynamic_reader(path)?;
    let rows = read_mapping_rows(reader)
        .with_context(|| format!("Failed to parse mapping table: {:?}", path))?;
    Ok(rows)
}
