use std::io::BufRead;
use std::path::Path;

use anyhow::{Context, Result};
use fxhash::FxHashSet;
use log::info;

use cttv_core::utils::get_dynamic_reader;

///
/// A set of ontology term URLs read from a flat file, one URL per line.
///
/// Used for the "ignore", "adapt" and "obsolete" lists. Lookups only;
/// the set never changes once loaded.
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermSet {
    terms: FxHashSet<String>,
}

pub trait TermLookup {
    fn contains_term(&self, term: &str) -> bool;
}

impl TermLookup for TermSet {
    fn contains_term(&self, term: &str) -> bool {
        self.terms.contains(term)
    }
}

impl TermSet {
    pub fn new() -> Self {
        Self::default()
    }

    ///
    /// Load a term set, or return an empty one when no file is configured.
    ///
    /// # Arguments
    ///
    /// - path: optional path to a newline-delimited list of term URLs
    ///
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => TermSet::from_file(path),
            None => Ok(TermSet::new()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let reader = get_dynamic_reader(path)?;

        let mut terms = FxHashSet::default();
        for (index, line) in reader.lines().enumerate() {
            let line = line.with_context(|| {
                format!("There was an error reading line {} of {:?}", index + 1, path)
            })?;
            let term = line.trim_end();
            if term.is_empty() {
                continue;
            }
            terms.insert(term.to_string());
        }

        info!("{} terms found at {}", terms.len(), path.display());

        Ok(TermSet { terms })
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.terms.iter()
    }
}

impl<S: Into<String>> FromIterator<S> for TermSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        TermSet {
            terms: iter.into_iter().map(Into::into).collect(),
        }
    }
}
