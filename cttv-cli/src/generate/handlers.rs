use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ArgMatches;

use cttv_evidence::{PipelineConfig, generate_evidence};

fn path_arg(matches: &ArgMatches, name: &str) -> Option<PathBuf> {
    matches.get_one::<String>(name).map(PathBuf::from)
}

///
/// Settings given on the command line. Unset flags stay `None` so they do
/// not override the config file.
///
pub fn config_from_matches(matches: &ArgMatches) -> PipelineConfig {
    PipelineConfig {
        allowed_clinical_significance: matches
            .get_one::<String>("clinSig")
            .map(|raw| raw.split(',').map(|s| s.trim().to_string()).collect()),
        efo_mapping_file: path_arg(matches, "efoMapFile"),
        ignore_terms_file: path_arg(matches, "ignore"),
        adapt_terms_file: path_arg(matches, "adapt"),
        obsolete_terms_file: path_arg(matches, "obsolete"),
        snp_to_gene_file: path_arg(matches, "snp2GeneFile"),
        variant_summary_file: path_arg(matches, "variantSummaryFile"),
        json_file: path_arg(matches, "json"),
        schema_file: path_arg(matches, "ot-schema"),
        out_dir: path_arg(matches, "out"),
        cellbase_host: matches.get_one::<String>("host").cloned(),
        page_size: matches.get_one::<usize>("page-size").copied(),
    }
}

pub fn run_generate(matches: &ArgMatches) -> Result<()> {
    let file_config = match matches.get_one::<String>("config") {
        Some(path) => PipelineConfig::try_from(Path::new(path))
            .with_context(|| format!("Failed to read config file: {}", path))?,
        None => PipelineConfig::default(),
    };

    let config = file_config.merge(config_from_matches(matches));

    generate_evidence(&config)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    use crate::generate::cli::create_generate_cli;

    #[rstest]
    fn test_flags_become_config() {
        let matches = create_generate_cli()
            .try_get_matches_from([
                "generate",
                "--clinSig",
                "pathogenic, likely pathogenic",
                "-e",
                "mapping.tsv",
                "-g",
                "consequences.tsv",
                "-v",
                "variant_summary.txt.gz",
                "-j",
                "records.jsonl",
                "--out",
                "out",
                "--page-size",
                "10",
            ])
            .unwrap();

        let config = config_from_matches(&matches);

        assert_eq!(
            config.allowed_clinical_significance(),
            vec!["pathogenic", "likely pathogenic"]
        );
        assert_eq!(config.efo_mapping_file, Some(PathBuf::from("mapping.tsv")));
        assert_eq!(config.json_file, Some(PathBuf::from("records.jsonl")));
        assert_eq!(config.page_size, Some(10));
        assert_eq!(config.ignore_terms_file, None);
        assert_eq!(config.validate().is_ok(), true);
    }

    #[rstest]
    fn test_generate_from_fixtures() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let matches = create_generate_cli()
            .try_get_matches_from([
                "generate",
                "--config",
                "../tests/data/pipeline.toml",
                "--out",
                out.to_str().unwrap(),
            ])
            .unwrap();

        run_generate(&matches).unwrap();

        assert_eq!(out.join("evidence_strings.json").exists(), true);
        assert_eq!(out.join("summary.txt").exists(), true);
    }
}
