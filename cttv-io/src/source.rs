//! Paginated access to ClinVar documents.
//!
//! Every source is exposed the same way: an iterator of [`RawPage`]s that
//! ends at the first empty page. The sequence is lazy, finite and cannot be
//! restarted.

use std::io::{BufRead, Lines, Read};
use std::io::BufReader;
use std::path::Path;

use serde_json::Value;

use cttv_core::utils::{get_dynamic_reader, get_dynamic_reader_w_stdin};

use crate::consts::BATCH_SIZE;
use crate::error::{Result, SourceError};

/// One page of raw Cellbase documents.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPage {
    pub records: Vec<Value>,
    /// Total number of records on the remote side, when the source reports it.
    pub num_total_results: Option<u64>,
}

impl RawPage {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

///
/// Anything that can hand out pages of documents given a skip offset.
///
pub trait PageFetcher {
    fn fetch_page(&mut self, skip: usize, limit: usize) -> Result<RawPage>;
}

///
/// Iterator over the pages of a [`PageFetcher`], stopping at the first
/// empty page or the first error.
///
pub struct PagedRecords<F: PageFetcher> {
    fetcher: F,
    skip: usize,
    page_size: usize,
    done: bool,
}

impl<F: PageFetcher> PagedRecords<F> {
    pub fn new(fetcher: F) -> Self {
        Self::with_page_size(fetcher, BATCH_SIZE)
    }

    pub fn with_page_size(fetcher: F, page_size: usize) -> Self {
        PagedRecords {
            fetcher,
            skip: 0,
            page_size: page_size.max(1),
            done: false,
        }
    }
}

impl<F: PageFetcher> Iterator for PagedRecords<F> {
    type Item = Result<RawPage>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.fetcher.fetch_page(self.skip, self.page_size) {
            Ok(page) if page.is_empty() => {
                self.done = true;
                None
            }
            Ok(page) => {
                self.skip += self.page_size;
                Some(Ok(page))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

///
/// Reads Cellbase documents from a file holding one JSON document per line.
///
/// The file is read front to back, so the skip offset handed in by
/// [`PagedRecords`] always equals the number of documents already returned.
///
pub struct JsonLinesFetcher<R: Read> {
    lines: Lines<BufReader<R>>,
    line_number: usize,
}

impl<R: Read> JsonLinesFetcher<R> {
    pub fn new(reader: BufReader<R>) -> Self {
        JsonLinesFetcher {
            lines: reader.lines(),
            line_number: 0,
        }
    }
}

impl JsonLinesFetcher<Box<dyn Read>> {
    ///
    /// Open a (possibly gzipped) JSON-lines file. A path of `-` reads stdin.
    ///
    /// # Arguments
    ///
    /// - path: path to the file
    ///
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let reader = match path.to_str() {
            Some(path_str) => get_dynamic_reader_w_stdin(path_str)?,
            None => get_dynamic_reader(path)?,
        };
        Ok(JsonLinesFetcher::new(reader))
    }
}

impl<R: Read> PageFetcher for JsonLinesFetcher<R> {
    fn fetch_page(&mut self, _skip: usize, limit: usize) -> Result<RawPage> {
        let mut records = Vec::with_capacity(limit);

        while records.len() < limit {
            let Some(line) = self.lines.next() else {
                break;
            };
            let line = line?;
            self.line_number += 1;

            if line.trim().is_empty() {
                continue;
            }
            let value: Value = serde_json::from_str(&line).map_err(|e| {
                SourceError::MalformedResponse(format!("line {}: {}", self.line_number, e))
            })?;
            records.push(value);
        }

        Ok(RawPage {
            records,
            num_total_results: None,
        })
    }
}
