use clap::{Arg, Command, arg};

pub const CHECK_MAPPINGS_CMD: &str = "check-mappings";

pub fn create_check_mappings_cli() -> Command {
    Command::new(CHECK_MAPPINGS_CMD)
        .author("EVA")
        .about("Build the trait to ontology mapping and report terms that need adapting.")
        .arg(
            Arg::new("efoMapFile")
                .short('e')
                .long("efoMapFile")
                .value_name("efoMapFile")
                .required(true)
                .help("Trait name to ontology term mapping table"),
        )
        .arg(arg!(--ignore <ignore> "File with ontology terms to ignore"))
        .arg(arg!(--adapt <adapt> "File with ontology terms to adapt to a fallback URL"))
        .arg(arg!(--out <out> "Directory for unavailableefo.tsv"))
}
