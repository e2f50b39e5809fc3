// Command-line interface for domreduce
//
// This binary reads an HTML document, runs it through a reduction pipeline and writes the
// reduced markup. The reduction itself lives in the domreduce crate; this binary only deals
// with files, configuration and printing.
//
// Usage:
//  domreduce <input> [--pipeline <a,b,..>] [--output <file>] [--stats text|json|none]   - Reduce (default)
//  domreduce reduce <input> ...                                                           - Same as above (explicit)
//  domreduce --list-stages                                                                - List available stages
//
// Use "-" as input to read from stdin.
//
// Configuration:
//
// Defaults are embedded; ./domreduce.toml is layered on top when present, then the file given
// with --config. Any setting can also be overridden for one run with --extra-<name> <value>,
// see extras.rs for the recognized names.
//  domreduce page.html --extra-max-class-tokens 3 --extra-header-separator marked
//
// Logging goes to stderr and is controlled by RUST_LOG (default: warn).

use domreduce_cli::extras::{apply_config_overrides, parse_extra_args, split_list};
use domreduce_cli::report::{self, StatsFormat};

use clap::{Arg, ArgAction, Command, ValueHint};
use domreduce::{Reducer, Stage, StageRegistry, DEFAULT_PIPELINE, EXTENDED_PIPELINE};
use domreduce_config::{Loader, ReduceConfig, LOCAL_CONFIG_FILE};
use std::fs;
use std::io::{self, Read};
use tracing::warn;
use tracing_subscriber::EnvFilter;

const SUBCOMMANDS: &[&str] = &["reduce", "help"];

fn build_cli() -> Command {
    Command::new("domreduce")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Shrink HTML documents for token-priced consumers")
        .long_about(
            "domreduce removes what never renders from an HTML document, compresses verbose\n\
            structure and rewrites tables, lists and figures as compact text.\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to override a configuration setting for one run.\n\n\
            Examples:\n  \
            domreduce page.html                              # Default pipeline to stdout\n  \
            domreduce page.html -o small.html --stats text   # Write a file, print sizes\n  \
            curl -s https://example.com | domreduce -        # Read from stdin\n  \
            domreduce page.html --pipeline parse,strip-clutter,minify-whitespace",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
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
                .value_name("PATH")
                .help("Path to a domreduce.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("reduce")
                .about("Reduce an HTML document (default command)")
                .long_about(
                    "Run the configured pipeline over an HTML document.\n\n\
                    The pipeline comes from the configuration ([pipeline] stages) unless\n\
                    --pipeline is given. Output goes to stdout by default, or use -o to\n\
                    specify a file. Per-step sizes are printed to stderr with --stats.\n\n\
                    Examples:\n  \
                    domreduce reduce page.html\n  \
                    domreduce reduce page.html --pipeline extended\n  \
                    domreduce reduce - --stats json < page.html",
                )
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
                        .value_name("STAGES")
                        .help("Comma-separated stages, or 'default' / 'extended'")
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
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            StatsFormat::NAMES,
                        ))
                        .default_value("none"),
                ),
        )
}

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    // Without a subcommand the first argument is the input: retry as `reduce <input>`.
    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            let looks_like_input = cleaned_args.get(1).is_some_and(|first| {
                first == "-" || (!first.starts_with('-') && !SUBCOMMANDS.contains(&first.as_str()))
            });
            if !looks_like_input {
                e.exit();
            }
            let mut new_args = vec![cleaned_args[0].clone(), "reduce".to_string()];
            new_args.extend_from_slice(&cleaned_args[1..]);
            match cli.try_get_matches_from(&new_args) {
                Ok(m) => m,
                Err(e2) => e2.exit(),
            }
        }
    };

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    if let Err(err) = apply_config_overrides(&mut config, &mut extra_params) {
        fail(err);
    }
    for key in extra_params.keys() {
        warn!("ignoring unknown --extra-{key}");
    }

    if matches.get_flag("list-stages") {
        handle_list_stages_command(&config);
        return;
    }

    match matches.subcommand() {
        Some(("reduce", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .map(String::as_str)
                .unwrap_or("-");
            let pipeline = sub_matches
                .get_one::<String>("pipeline")
                .map(|raw| pipeline_from_arg(raw));
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            let stats = sub_matches
                .get_one::<String>("stats")
                .and_then(|name| StatsFormat::from_name(name))
                .unwrap_or(StatsFormat::None);
            handle_reduce_command(input, pipeline, output, stats, &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Handle the reduce command
fn handle_reduce_command(
    input: &str,
    pipeline: Option<Vec<String>>,
    output: Option<&str>,
    stats: StatsFormat,
    config: &ReduceConfig,
) {
    let source = read_input(input).unwrap_or_else(|e| {
        eprintln!("Error reading '{input}': {e}");
        std::process::exit(1);
    });

    let stages = pipeline.unwrap_or_else(|| config.pipeline.stages.clone());
    let registry = config.registry();
    let counter = config.tokens.build_counter().unwrap_or_else(|e| fail(e));

    let mut reducer = Reducer::with_token_counter(source, counter);
    if let Err(e) = reducer.reduce_with(&registry, stages.as_slice()) {
        fail(e);
    }
    let reduced = reducer.to_html().unwrap_or_else(|e| fail(e));

    match output {
        Some(path) => fs::write(path, reduced).unwrap_or_else(|e| {
            eprintln!("Error writing file '{path}': {e}");
            std::process::exit(1);
        }),
        None => print!("{reduced}"),
    }

    match report::render(&reducer.report(), stats) {
        Ok(Some(rendered)) => eprint!("{rendered}"),
        Ok(None) => {}
        Err(e) => fail(e),
    }
}

/// Handle the list-stages command
fn handle_list_stages_command(config: &ReduceConfig) {
    let registry = config.registry();

    println!("Available stages:\n");
    println!(
        "  {:<26}{}",
        "parse", "(Re)build the document from the raw markup"
    );
    for (name, description) in registry.describe() {
        println!("  {name:<26}{description}");
    }

    println!("\nAliases:");
    let mut aliases = alias_table(&registry);
    aliases.sort();
    for (alias, name) in aliases {
        println!("  {alias} -> {name}");
    }

    println!("\nConfigured pipeline:");
    println!("  {}", config.pipeline.stages.join(", "));
    println!("\nExtended pipeline (--pipeline extended):");
    println!("  {}", EXTENDED_PIPELINE.join(", "));
}

fn alias_table(registry: &StageRegistry) -> Vec<(String, String)> {
    let mut table = vec![(
        domreduce::registry::PARSE_ALIAS.to_string(),
        domreduce::registry::PARSE_STEP.to_string(),
    )];
    for name in registry.list_stages() {
        if let Ok(stage) = registry.get(&name) {
            for alias in stage.aliases() {
                table.push((alias.to_string(), name.clone()));
            }
        }
    }
    table
}

/// `default` and `extended` name the built-in pipelines; anything else is a stage list
fn pipeline_from_arg(raw: &str) -> Vec<String> {
    let named = match raw.trim() {
        "default" => Some(DEFAULT_PIPELINE),
        "extended" => Some(EXTENDED_PIPELINE),
        _ => None,
    };
    match named {
        Some(stages) => stages.iter().map(|s| s.to_string()).collect(),
        None => split_list(raw),
    }
}

fn read_input(input: &str) -> io::Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        fs::read_to_string(input)
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> ReduceConfig {
    let loader = Loader::new().with_optional_file(LOCAL_CONFIG_FILE);
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn fail(err: impl std::fmt::Display) -> ! {
    eprintln!("Error: {err}");
    std::process::exit(1);
}
