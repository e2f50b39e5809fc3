use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the stage identifiers registered by domreduce::StageRegistry::with_defaults
// We need to duplicate this here since build scripts can't access the library
const AVAILABLE_STAGES: &[&str] = &[
    "parse",
    "strip-clutter",
    "strip-non-visual",
    "simplify-attributes",
    "strip-utility-classes",
    "collapse-nesting",
    "prune-duplicate-nav",
    "tables-to-text",
    "definition-lists-to-text",
    "lists-to-text",
    "figures-to-text",
    "css-tables-to-text",
    "drop-large-table-row-ids",
    "media-placeholders",
    "minify-whitespace",
];

// Named pipelines accepted in place of a stage list
const PIPELINE_PRESETS: &[&str] = &["default", "extended"];

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("domreduce")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Shrink HTML documents for token-priced consumers")
        .arg_required_else_help(true)
        .arg(
            Arg::new("list-stages")
                .long("list-stages")
                .help("List available stages")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Path to a domreduce.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("reduce")
                .about("Reduce an HTML document (default command)")
                .arg(
                    Arg::new("input")
                        .help("Input file path, or - for stdin")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("pipeline")
                        .long("pipeline")
                        .short('p')
                        .help("Comma-separated stages")
                        .value_delimiter(',')
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            PIPELINE_PRESETS.iter().chain(AVAILABLE_STAGES),
                        ))
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("stats")
                        .long("stats")
                        .help("Print per-step sizes to stderr")
                        .value_parser(["none", "text", "json"]),
                ),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "domreduce", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "domreduce", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "domreduce", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
