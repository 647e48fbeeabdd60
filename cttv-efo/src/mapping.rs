use std::path::Path;

use anyhow::{Context, Result};
use fxhash::FxHashMap;
use log::info;

use cttv_core::FrequencyTable;

use crate::errors::{EfoMappingError, EfoMappingResult};
use crate::overrides::{TermLookup, TermSet};
use crate::table::{MappingRow, read_mapping_table};

/// Fallback namespace for Orphanet terms that are not in EFO yet.
pub const ORDO_FALLBACK_PREFIX: &str = "http://purl.bioontology.org/ORDO/";

/// Fallback namespace for HPO terms that are not in EFO yet.
pub const HP_FALLBACK_PREFIX: &str = "http://purl.bioontology.org/obo/";

///
/// Rewrite a term that is not yet imported into EFO to its general fallback URL.
/// The rule is keyed on the prefix of the last path segment of the URL.
///
/// # Arguments
///
/// - url: the term URL flagged for adaptation
///
pub fn adapted_url(url: &str) -> EfoMappingResult<String> {
    let last = url.rsplit('/').next().unwrap_or(url);

    if last.starts_with("Orphanet_") {
        Ok(format!("{}{}", ORDO_FALLBACK_PREFIX, last))
    } else if last.starts_with("HP_") {
        Ok(format!("{}{}", HP_FALLBACK_PREFIX, last))
    } else {
        Err(EfoMappingError::UnhandledTermNamespace(url.to_string()))
    }
}

///
/// Split the terms of one row into those usable as-is and those that need
/// adaptation. Ignored terms are dropped before the adapt check, so a term in
/// both sets is simply ignored.
///
pub fn partition_terms<L: TermLookup>(
    term_urls: &[String],
    ignore_terms: &L,
    adapt_terms: &L,
) -> (Vec<String>, Vec<String>) {
    let mut valid = Vec::new();
    let mut to_adapt = Vec::new();

    for term in term_urls {
        if ignore_terms.contains_term(term) {
            continue;
        }
        if adapt_terms.contains_term(term) {
            to_adapt.push(term.clone());
        } else {
            valid.push(term.clone());
        }
    }

    (valid, to_adapt)
}

///
/// A trait resolved against the mapping: the name that matched and the
/// distinct terms it maps to.
///
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTrait {
    pub trait_name: String,
    pub efo_terms: Vec<String>,
}

impl ResolvedTrait {
    /// Matched name repeated once per term, parallel to `efo_terms`.
    pub fn trait_names(&self) -> Vec<&str> {
        self.efo_terms
            .iter()
            .map(|_| self.trait_name.as_str())
            .collect()
    }
}

///
/// Lower-cased trait name to ontology terms.
///
/// A trait missing from the index was never curated. A trait present with
/// adapted fallback terms was curated to terms that EFO does not carry yet.
///
#[derive(Debug, Clone, Default)]
pub struct TraitToEfo {
    map: FxHashMap<String, Vec<String>>,
    n_valid_mappings: usize,
}

pub trait EfoLookup {
    fn get_efo_terms(&self, trait_name: &str) -> Option<&[String]>;
}

impl EfoLookup for TraitToEfo {
    fn get_efo_terms(&self, trait_name: &str) -> Option<&[String]> {
        self.map
            .get(&trait_name.to_lowercase())
            .map(|terms| terms.as_slice())
    }
}

impl TraitToEfo {
    ///
    /// Build the index from curated rows.
    ///
    /// Returns the index together with the number of times each adapted
    /// (pre-rewrite) URL was seen.
    ///
    /// # Arguments
    ///
    /// - rows: mapping rows in table order; later rows for the same trait win
    /// - ignore_terms: terms to drop silently
    /// - adapt_terms: terms to rewrite to a fallback URL
    ///
    pub fn build<I>(
        rows: I,
        ignore_terms: &TermSet,
        adapt_terms: &TermSet,
    ) -> EfoMappingResult<(Self, FrequencyTable)>
    where
        I: IntoIterator<Item = MappingRow>,
    {
        let mut map: FxHashMap<String, Vec<String>> = FxHashMap::default();
        let mut unavailable = FrequencyTable::new();
        let mut n_valid_mappings = 0;

        for row in rows {
            if row.term_urls.is_empty() {
                continue;
            }

            let (valid, to_adapt) = partition_terms(&row.term_urls, ignore_terms, adapt_terms);
            let trait_name = row.trait_name.to_lowercase();

            if !valid.is_empty() {
                map.insert(trait_name, valid);
                n_valid_mappings += 1;
            } else if !to_adapt.is_empty() {
                let mut fallback_urls = Vec::with_capacity(to_adapt.len());
                for url in &to_adapt {
                    fallback_urls.push(adapted_url(url)?);
                    unavailable.increment(url);
                }
                map.insert(trait_name, fallback_urls);
            }
        }

        info!("{} EFO mappings loaded", n_valid_mappings);
        info!(
            "{} urls without an actual valid EFO mapping",
            unavailable.len()
        );

        Ok((
            TraitToEfo {
                map,
                n_valid_mappings,
            },
            unavailable,
        ))
    }

    ///
    /// Load the mapping table and the override files and build the index.
    ///
    /// # Arguments
    ///
    /// - efo_mapping_file: TSV of trait name to term URLs
    /// - ignore_terms_file: optional list of terms to ignore
    /// - adapt_terms_file: optional list of terms to adapt
    ///
    pub fn from_files(
        efo_mapping_file: &Path,
        ignore_terms_file: Option<&Path>,
        adapt_terms_file: Option<&Path>,
    ) -> Result<(Self, FrequencyTable)> {
        let ignore_terms = TermSet::load(ignore_terms_file)?;
        let adapt_terms = TermSet::load(adapt_terms_file)?;

        info!("Loading phenotypes to EFO mapping...");
        let rows = read_mapping_table(efo_mapping_file)?;

        let built = TraitToEfo::build(rows, &ignore_terms, &adapt_terms)
            .with_context(|| format!("Failed to build EFO mapping from {:?}", efo_mapping_file))?;

        Ok(built)
    }

    ///
    /// Resolve a trait given all its names, preferred name first.
    ///
    /// The preferred name is looked up first. Only when it is absent from the
    /// index are the remaining names tried, in order, and the first one found
    /// is used. A name that is present but maps to nothing resolves to `None`.
    ///
    pub fn resolve(&self, names: &[String]) -> Option<ResolvedTrait> {
        let (preferred, others) = names.split_first()?;

        let (trait_name, terms) = match self.get_efo_terms(preferred) {
            Some(terms) => (preferred, terms),
            None => others
                .iter()
                .find_map(|name| self.get_efo_terms(name).map(|terms| (name, terms)))?,
        };

        let mut efo_terms: Vec<String> = Vec::with_capacity(terms.len());
        for term in terms {
            if !efo_terms.contains(term) {
                efo_terms.push(term.clone());
            }
        }

        if efo_terms.is_empty() {
            return None;
        }

        Some(ResolvedTrait {
            trait_name: trait_name.clone(),
            efo_terms,
        })
    }

    /// Number of indexed trait names.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Number of rows that produced at least one usable term.
    pub fn n_valid_mappings(&self) -> usize {
        self.n_valid_mappings
    }

    pub fn contains(&self, trait_name: &str) -> bool {
        self.map.contains_key(&trait_name.to_lowercase())
    }
}
