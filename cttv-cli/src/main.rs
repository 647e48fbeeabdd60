mod generate;
mod mappings;

use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use log::{LevelFilter, error};

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "cttv";
    pub const VERBOSE_ARG: &str = "verbose";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .author("EVA")
        .about("Generate Open Targets evidence strings from ClinVar records.")
        .subcommand_required(true)
        .arg(
            Arg::new(consts::VERBOSE_ARG)
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log debug messages"),
        )
        .subcommand(generate::cli::create_generate_cli())
        .subcommand(mappings::cli::create_check_mappings_cli())
}

fn init_logger(matches: &ArgMatches) {
    let level = if matches.get_flag(consts::VERBOSE_ARG) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn dispatch(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        //
        // EVIDENCE GENERATION
        //
        Some((generate::cli::GENERATE_CMD, matches)) => {
            generate::handlers::run_generate(matches)?;
        }

        //
        // MAPPING TABLE CHECK
        //
        Some((mappings::cli::CHECK_MAPPINGS_CMD, matches)) => {
            mappings::handlers::run_check_mappings(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    init_logger(&matches);

    dispatch(&matches).inspect_err(|e| error!("{:#}", e))
}
