use std::io::Read;
use std::path::Path;

use anyhow::Context;
use fxhash::FxHashMap;
use log::info;

use cttv_core::utils::get_dynamic_reader;

use crate::consts::{NSV_COLUMN, RCV_COLUMN, RS_COLUMN};
use crate::error::{Result, SourceError};

///
/// RCV accession to dbSNP (rs) and dbVar (nsv) identifiers, built from
/// the ClinVar `variant_summary.txt` table.
///
#[derive(Debug, Clone, Default)]
pub struct VariantSummary {
    rcv_to_rs: FxHashMap<String, String>,
    rcv_to_nsv: FxHashMap<String, String>,
}

pub trait VariantIdLookup {
    fn get_rs(&self, accession: &str) -> Option<&str>;
    fn get_nsv(&self, accession: &str) -> Option<&str>;
}

impl VariantIdLookup for VariantSummary {
    fn get_rs(&self, accession: &str) -> Option<&str> {
        self.rcv_to_rs.get(accession).map(String::as_str)
    }

    fn get_nsv(&self, accession: &str) -> Option<&str> {
        self.rcv_to_nsv.get(accession).map(String::as_str)
    }
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim_start_matches('#') == name)
        .ok_or_else(|| SourceError::MissingColumn(name.to_string()))
}

impl VariantSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, accession: &str, rs: Option<&str>, nsv: Option<&str>) {
        if let Some(rs) = rs {
            self.rcv_to_rs.insert(accession.to_string(), rs.to_string());
        }
        if let Some(nsv) = nsv {
            self.rcv_to_nsv.insert(accession.to_string(), nsv.to_string());
        }
    }

    ///
    /// Parse a variant summary table.
    ///
    /// Columns are found by header name. An RS value of `-1` and an nsv value
    /// of `-` mean the identifier is absent. The RCV column may list several
    /// accessions separated by `;`.
    ///
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .flexible(true)
            .quoting(false)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let rs_idx = column_index(&headers, RS_COLUMN)?;
        let nsv_idx = column_index(&headers, NSV_COLUMN)?;
        let rcv_idx = column_index(&headers, RCV_COLUMN)?;

        let mut summary = VariantSummary::new();
        for record in csv_reader.records() {
            let record = record?;

            let rs = record
                .get(rs_idx)
                .map(str::trim)
                .filter(|rs| !rs.is_empty() && *rs != "-1")
                .map(|rs| format!("rs{}", rs));
            let nsv = record
                .get(nsv_idx)
                .map(str::trim)
                .filter(|nsv| !nsv.is_empty() && *nsv != "-");

            let Some(rcvs) = record.get(rcv_idx) else {
                continue;
            };
            for rcv in rcvs.split(';').map(str::trim).filter(|r| !r.is_empty()) {
                summary.insert(rcv, rs.as_deref(), nsv);
            }
        }

        Ok(summary)
    }

    ///
    /// Load a (possibly gzipped) variant summary file.
    ///
    /// # Arguments
    ///
    /// - path: path to `variant_summary.txt` or `variant_summary.txt.gz`
    ///
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let reader = get_dynamic_reader(path)?;
        let summary = VariantSummary::from_reader(reader)
            .with_context(|| format!("Failed to parse variant summary: {:?}", path))?;

        info!(
            "{} RCV->rs and {} RCV->nsv mappings loaded",
            summary.rcv_to_rs.len(),
            summary.rcv_to_nsv.len()
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn summary_table() -> &'static str {
        "#AlleleID\tType\tName\tRS# (dbSNP)\tnsv/esv (dbVar)\tRCVaccession\n\
         1\tsingle nucleotide variant\tv1\t28934578\t-\tRCV000013711;RCV000013712\n\
         2\tcopy number gain\tv2\t-1\tnsv1067853\tRCV000051102\n\
         3\tsingle nucleotide variant\tv3\t-1\t-\tRCV000000003\n"
    }

    #[rstest]
    fn test_rs_and_nsv_lookup(summary_table: &str) {
        let summary = VariantSummary::from_reader(summary_table.as_bytes()).unwrap();

        assert_eq!(summary.get_rs("RCV000013711"), Some("rs28934578"));
        assert_eq!(summary.get_rs("RCV000013712"), Some("rs28934578"));
        assert_eq!(summary.get_nsv("RCV000013711"), None);

        assert_eq!(summary.get_rs("RCV000051102"), None);
        assert_eq!(summary.get_nsv("RCV000051102"), Some("nsv1067853"));

        assert_eq!(summary.get_rs("RCV000000003"), None);
        assert_eq!(summary.get_nsv("RCV000000003"), None);
    }

    #[rstest]
    fn test_missing_column() {
        let table = "#AlleleID\tRCVaccession\n1\tRCV1\n";
        let result = VariantSummary::from_reader(table.as_bytes());
        assert_eq!(
            matches!(result, Err(SourceError::MissingColumn(ref c)) if c == RS_COLUMN),
            true
        );
    }

    #[rstest]
    fn test_fixture_file() {
        let path = std::path::PathBuf::from("../tests/data/variant_summary.tsv");
        let summary = VariantSummary::from_file(&path).unwrap();
        assert_eq!(summary.get_rs("RCV000000001"), Some("rs121912651"));
    }
}
