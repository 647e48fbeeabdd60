use std::ffi::OsStr;
use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;

use crate::consts::{
    CLINVAR_DBXREF_PREFIX, CLINVAR_RECORD_URL_PREFIX, DBSNP_URI_PREFIX, ENSEMBL_GENE_URI_PREFIX,
    EUROPEPMC_PREFIX,
};

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    let reader = BufReader::new(file);

    Ok(reader)
}

///
/// Like [`get_dynamic_reader`], except that `-` reads from stdin, so a
/// record dump can be piped in.
///
pub fn get_dynamic_reader_w_stdin(file_path_str: &str) -> Result<BufReader<Box<dyn Read>>> {
    if file_path_str == "-" {
        Ok(BufReader::new(Box::new(std::io::stdin()) as Box<dyn Read>))
    } else {
        let file_path = Path::new(file_path_str);
        get_dynamic_reader(file_path)
    }
}

pub fn ensembl_gene_uri(ensembl_gene_id: &str) -> String {
    format!("{}{}", ENSEMBL_GENE_URI_PREFIX, ensembl_gene_id)
}

pub fn dbsnp_uri(rs_id: &str) -> String {
    format!("{}{}", DBSNP_URI_PREFIX, rs_id)
}

pub fn clinvar_dbxref_url(accession: &str) -> String {
    format!("{}{}", CLINVAR_DBXREF_PREFIX, accession)
}

pub fn clinvar_record_url(accession: &str) -> String {
    format!("{}{}", CLINVAR_RECORD_URL_PREFIX, accession)
}

/// Turn a PubMed id into a Europe PMC abstract URL.
pub fn europepmc_url(pubmed_id: &str) -> String {
    format!("{}{}", EUROPEPMC_PREFIX, pubmed_id)
}
