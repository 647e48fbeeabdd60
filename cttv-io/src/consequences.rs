use std::io::Read;
use std::path::Path;

use anyhow::Context;
use fxhash::FxHashMap;
use log::info;

use cttv_core::models::{ConsequenceType, SoTerm};
use cttv_core::utils::get_dynamic_reader;

use crate::error::{Result, SourceError};

const RS_ID_COL: usize = 0;
const ENSEMBL_GENE_ID_COL: usize = 2;
const SO_TERM_COL: usize = 4;

///
/// dbSNP id to the genes it affects and the consequence on them.
///
#[derive(Debug, Clone, Default)]
pub struct ConsequenceTypeIndex {
    map: FxHashMap<String, ConsequenceType>,
}

pub trait ConsequenceLookup {
    fn get_consequence_type(&self, rs_id: &str) -> Option<&ConsequenceType>;
}

impl ConsequenceLookup for ConsequenceTypeIndex {
    fn get_consequence_type(&self, rs_id: &str) -> Option<&ConsequenceType> {
        self.map.get(rs_id)
    }
}

impl ConsequenceTypeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    ///
    /// Record that `rs_id` affects `ensembl_gene_id` with consequence `so_term`.
    ///
    /// Genes accumulate in first-seen order. When a variant has several
    /// consequences the most severe one is kept.
    ///
    pub fn insert(&mut self, rs_id: &str, ensembl_gene_id: &str, so_term: SoTerm) {
        match self.map.get_mut(rs_id) {
            Some(con_type) => {
                con_type.add_ensembl_gene_id(ensembl_gene_id);
                let more_severe = match (so_term.rank(), con_type.so_term.rank()) {
                    (Some(new), Some(current)) => new < current,
                    (Some(_), None) => true,
                    _ => false,
                };
                if more_severe {
                    con_type.so_term = so_term;
                }
            }
            None => {
                self.map
                    .insert(rs_id.to_string(), ConsequenceType::new(ensembl_gene_id, so_term));
            }
        }
    }

    ///
    /// Parse a headerless, tab separated consequence file:
    /// rs id, variant, Ensembl gene id, gene symbol, SO term.
    ///
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(reader);

        let mut index = ConsequenceTypeIndex::new();
        for (line, record) in csv_reader.records().enumerate() {
            let record = record?;

            if record.len() == 1 && record[0].trim().is_empty() {
                continue;
            }
            if record.len() <= SO_TERM_COL {
                return Err(SourceError::ShortLine {
                    line: line + 1,
                    found: record.len(),
                    expected: SO_TERM_COL + 1,
                });
            }

            index.insert(
                record[RS_ID_COL].trim(),
                record[ENSEMBL_GENE_ID_COL].trim(),
                SoTerm::new(record[SO_TERM_COL].trim()),
            );
        }

        Ok(index)
    }

    ///
    /// Load a (possibly gzipped) consequence file.
    ///
    /// # Arguments
    ///
    /// - path: path to the rs to gene consequence file
    ///
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let reader = get_dynamic_reader(path)?;
        let index = ConsequenceTypeIndex::from_reader(reader)
            .with_context(|| format!("Failed to parse consequence file: {:?}", path))?;

        info!("{} variants with gene consequences loaded", index.len());

        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
