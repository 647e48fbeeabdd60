use std::fs::{File, create_dir_all};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ArgMatches;

use cttv_core::consts::UNAVAILABLE_EFO_FILE_NAME;
use cttv_efo::TraitToEfo;

pub fn run_check_mappings(matches: &ArgMatches) -> Result<()> {
    let mapping = matches
        .get_one::<String>("efoMapFile")
        .context("A path to the mapping table is required.")?;
    let ignore = matches.get_one::<String>("ignore").map(Path::new);
    let adapt = matches.get_one::<String>("adapt").map(Path::new);
    let out = matches
        .get_one::<String>("out")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let (trait_to_efo, unavailable_efo) = TraitToEfo::from_files(Path::new(mapping), ignore, adapt)?;

    create_dir_all(&out).with_context(|| format!("Failed to create output directory: {:?}", out))?;
    let path = out.join(UNAVAILABLE_EFO_FILE_NAME);
    let file = File::create(&path).with_context(|| format!("Failed to create {:?}", path))?;
    let mut writer = BufWriter::new(file);
    unavailable_efo.write_tsv(&mut writer, ("Trait", "Count"))?;
    writer.flush()?;

    println!("{} trait names mapped to ontology terms", trait_to_efo.len());
    println!(
        "{} rows with at least one usable ontology term",
        trait_to_efo.n_valid_mappings()
    );
    println!(
        "{} ontology URLs are not yet available and were adapted (see {:?})",
        unavailable_efo.len(),
        path
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::fs::read_to_string;

    use crate::mappings::cli::create_check_mappings_cli;

    #[rstest]
    fn test_check_mappings_writes_unavailable_terms() {
        let dir = tempfile::tempdir().unwrap();
        let matches = create_check_mappings_cli()
            .try_get_matches_from([
                "check-mappings",
                "-e",
                "../tests/data/efo_mapping.tsv",
                "--ignore",
                "../tests/data/ignore.txt",
                "--adapt",
                "../tests/data/adapt.txt",
                "--out",
                dir.path().to_str().unwrap(),
            ])
            .unwrap();

        run_check_mappings(&matches).unwrap();

        assert_eq!(
            read_to_string(dir.path().join(UNAVAILABLE_EFO_FILE_NAME)).unwrap(),
            "Trait\tCount\nhttp://www.orpha.net/ORDO/Orphanet_99999\t1\n"
        );
    }

    #[rstest]
    fn test_mapping_table_is_required() {
        let result = create_check_mappings_cli().try_get_matches_from(["check-mappings"]);
        assert_eq!(result.is_err(), true);
    }
}
