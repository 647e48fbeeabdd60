use clap::{Arg, Command, arg, value_parser};

pub const GENERATE_CMD: &str = "generate";

pub fn create_generate_cli() -> Command {
    Command::new(GENERATE_CMD)
        .author("EVA")
        .about("Generate evidence strings from ClinVar records.")
        .arg(arg!(--config <config> "TOML file with run settings; flags override it"))
        .arg(
            Arg::new("clinSig")
                .long("clinSig")
                .value_name("clinSig")
                .help("Comma separated list of allowed clinical significances"),
        )
        .arg(arg!(--ignore <ignore> "File with ontology terms to ignore"))
        .arg(arg!(--adapt <adapt> "File with ontology terms to adapt to a fallback URL"))
        .arg(arg!(--obsolete <obsolete> "File with obsolete ontology terms"))
        .arg(arg!(--out <out> "Output directory"))
        .arg(
            Arg::new("efoMapFile")
                .short('e')
                .long("efoMapFile")
                .value_name("efoMapFile")
                .help("Trait name to ontology term mapping table"),
        )
        .arg(
            Arg::new("snp2GeneFile")
                .short('g')
                .long("snp2GeneFile")
                .value_name("snp2GeneFile")
                .help("rs id to gene consequence file"),
        )
        .arg(
            Arg::new("variantSummaryFile")
                .short('v')
                .long("variantSummaryFile")
                .value_name("variantSummaryFile")
                .help("ClinVar variant_summary file"),
        )
        .arg(
            Arg::new("json")
                .short('j')
                .long("json")
                .value_name("json")
                .help("JSON-lines file of ClinVar records, read instead of the Cellbase service (- for stdin)"),
        )
        .arg(
            Arg::new("ot-schema")
                .long("ot-schema")
                .value_name("ot-schema")
                .help("Evidence JSON schema; the bundled schema is used otherwise"),
        )
        .arg(arg!(--host <host> "Cellbase host"))
        .arg(
            Arg::new("page-size")
                .long("page-size")
                .value_name("page-size")
                .value_parser(value_parser!(usize))
                .help("Records requested per page"),
        )
}
