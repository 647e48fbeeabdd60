use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use cttv_io::{BATCH_SIZE, DEFAULT_CELLBASE_HOST};

use crate::consts::DEFAULT_ALLOWED_CLINICAL_SIGNIFICANCE;
use crate::errors::{ConfigError, ConfigResult};

///
/// Settings of an evidence generation run. Every field is optional in the
/// TOML file; command line flags override file values through [`PipelineConfig::merge`].
///
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    pub allowed_clinical_significance: Option<Vec<String>>,
    pub efo_mapping_file: Option<PathBuf>,
    pub ignore_terms_file: Option<PathBuf>,
    pub adapt_terms_file: Option<PathBuf>,
    pub obsolete_terms_file: Option<PathBuf>,
    pub snp_to_gene_file: Option<PathBuf>,
    pub variant_summary_file: Option<PathBuf>,
    /// Read records from this JSON-lines file instead of the Cellbase service.
    pub json_file: Option<PathBuf>,
    pub schema_file: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub cellbase_host: Option<String>,
    pub page_size: Option<usize>,
}

impl TryFrom<&Path> for PipelineConfig {
    type Error = ConfigError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let toml_str = read_to_string(path)?;
        let config = toml::from_str(&toml_str)?;
        Ok(config)
    }
}

fn required<'a>(value: &'a Option<PathBuf>, name: &'static str) -> ConfigResult<&'a Path> {
    value
        .as_deref()
        .ok_or(ConfigError::MissingSetting(name))
}

impl PipelineConfig {
    ///
    /// Overlay `other` on top of `self`: every setting present in `other` wins.
    ///
    pub fn merge(self, other: PipelineConfig) -> PipelineConfig {
        PipelineConfig {
            allowed_clinical_significance: other
                .allowed_clinical_significance
                .or(self.allowed_clinical_significance),
            efo_mapping_file: other.efo_mapping_file.or(self.efo_mapping_file),
            ignore_terms_file: other.ignore_terms_file.or(self.ignore_terms_file),
            adapt_terms_file: other.adapt_terms_file.or(self.adapt_terms_file),
            obsolete_terms_file: other.obsolete_terms_file.or(self.obsolete_terms_file),
            snp_to_gene_file: other.snp_to_gene_file.or(self.snp_to_gene_file),
            variant_summary_file: other.variant_summary_file.or(self.variant_summary_file),
            json_file: other.json_file.or(self.json_file),
            schema_file: other.schema_file.or(self.schema_file),
            out_dir: other.out_dir.or(self.out_dir),
            cellbase_host: other.cellbase_host.or(self.cellbase_host),
            page_size: other.page_size.or(self.page_size),
        }
    }

    /// Configured allow-list, or the default one.
    pub fn allowed_clinical_significance(&self) -> Vec<String> {
        match &self.allowed_clinical_significance {
            Some(allowed) => allowed.iter().map(|s| s.trim().to_lowercase()).collect(),
            None => DEFAULT_ALLOWED_CLINICAL_SIGNIFICANCE
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    pub fn efo_mapping_file(&self) -> ConfigResult<&Path> {
        required(&self.efo_mapping_file, "efo_mapping_file")
    }

    pub fn snp_to_gene_file(&self) -> ConfigResult<&Path> {
        required(&self.snp_to_gene_file, "snp_to_gene_file")
    }

    pub fn variant_summary_file(&self) -> ConfigResult<&Path> {
        required(&self.variant_summary_file, "variant_summary_file")
    }

    pub fn out_dir(&self) -> ConfigResult<&Path> {
        required(&self.out_dir, "out_dir")
    }

    pub fn cellbase_host(&self) -> &str {
        self.cellbase_host.as_deref().unwrap_or(DEFAULT_CELLBASE_HOST)
    }

    pub fn page_size(&self) -> ConfigResult<usize> {
        match self.page_size {
            Some(0) => Err(ConfigError::InvalidPageSize),
            Some(n) => Ok(n),
            None => Ok(BATCH_SIZE),
        }
    }

    /// Check every setting a full run needs.
    pub fn validate(&self) -> ConfigResult<()> {
        self.efo_mapping_file()?;
        self.snp_to_gene_file()?;
        self.variant_summary_file()?;
        self.out_dir()?;
        self.page_size()?;
        Ok(())
    }
}
