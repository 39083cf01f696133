//! HWC Compiler Driver
//!
//! Command-line access to the syntax-tree layer. With no parser in front of
//! it yet, trees come from JSON files or from the built-in samples.

use clap::builder::PossibleValuesParser;
use clap::{Parser, Subcommand};
use hwc_common::{CompilerError, ErrorReporter};
use hwc_frontend::{print_unit, samples, verify_unit, CompUnit, ConstructCounter, Frontend};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "hwc")]
#[command(about = "HWC Compiler - syntax tree tools")]
#[command(version = "0.1.0")]
struct Cli {
    /// Enable logging (RUST_LOG overrides the default `debug` filter)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit one of the built-in sample trees as JSON
    Sample {
        /// Sample name
        #[arg(
            default_value = "main",
            value_parser = PossibleValuesParser::new(samples::SAMPLE_NAMES.iter().copied())
        )]
        name: String,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print a tree as source text
    Print {
        /// Input tree in JSON form
        input: PathBuf,
    },

    /// Verify a tree and report its shape
    Check {
        /// Input tree in JSON form
        input: PathBuf,
    },

    /// Re-serialize a tree
    Dump {
        /// Input tree in JSON form
        input: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Single-line JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    }

    let result = match cli.command {
        Commands::Sample { name, output } => sample_command(&name, output.as_deref()),
        Commands::Print { input } => print_command(&input),
        Commands::Check { input } => check_command(&input),
        Commands::Dump { input, output, compact } => {
            dump_command(&input, output.as_deref(), compact)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load(input: &Path) -> Result<CompUnit, CompilerError> {
    debug!("reading {}", input.display());
    let json = fs::read_to_string(input)?;
    Frontend::load_json(&json)
}

fn emit(text: &str, output: Option<&Path>) -> Result<(), CompilerError> {
    match output {
        Some(path) => {
            fs::write(path, text)?;
            eprintln!("Written to: {}", path.display());
        }
        None => println!("{}", text),
    }
    Ok(())
}

fn sample_command(name: &str, output: Option<&Path>) -> Result<(), CompilerError> {
    // Names are checked against SAMPLE_NAMES while parsing
    let unit = samples::sample(name)
        .ok_or_else(|| CompilerError::from(format!("No sample named {}", name)))?;
    let json = Frontend::store_json(&unit, true)?;
    emit(&json, output)
}

fn print_command(input: &Path) -> Result<(), CompilerError> {
    let unit = load(input)?;
    print!("{}", print_unit(&unit));
    Ok(())
}

fn check_command(input: &Path) -> Result<(), CompilerError> {
    let unit = load(input)?;

    let mut reporter = ErrorReporter::new();
    let report = verify_unit(&unit, &mut reporter);
    reporter.print_diagnostics();

    println!("Top-level items: {}", unit.items.len());
    for func in unit.functions() {
        println!(
            "  Function: {} -> {} ({} params)",
            func.ident,
            func.return_type,
            func.params.len()
        );
    }
    for decl in unit.declarations() {
        let names: Vec<&str> = decl.idents().iter().map(|ident| ident.as_str()).collect();
        let kind = if decl.is_const() { "Constant" } else { "Global variable" };
        println!("  {}: {} : {}", kind, names.join(", "), decl.base_type());
    }

    println!(
        "Nodes: {} unique, {} edges, {} shared, depth {}",
        report.unique_nodes, report.edges, report.shared_nodes, report.max_depth
    );

    let counts = ConstructCounter::count(&unit);
    println!("Constructs ({} total):", counts.total());
    for (kind, count) in counts.iter() {
        println!("  {:<24} {}", kind.to_string(), count);
    }

    println!("{}", reporter.summary());
    match reporter.first_error() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn dump_command(input: &Path, output: Option<&Path>, compact: bool) -> Result<(), CompilerError> {
    let unit = load(input)?;
    let json = Frontend::store_json(&unit, !compact)?;
    emit(&json, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_every_sample_emits() {
        for name in samples::SAMPLE_NAMES {
            let unit = samples::sample(name).unwrap();
            assert!(Frontend::store_json(&unit, true).is_ok());
        }
    }

    #[test]
    fn test_unknown_sample_is_rejected_while_parsing() {
        let err = match Cli::try_parse_from(["hwc", "sample", "nope"]) {
            Ok(_) => panic!("Expected unknown sample name to be rejected"),
            Err(err) => err,
        };
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_sample_name_parses_with_default() {
        let cli = Cli::try_parse_from(["hwc", "sample", "loop"]).unwrap();
        match cli.command {
            Commands::Sample { name, .. } => assert_eq!(name, "loop"),
            _ => panic!("Expected sample command"),
        }
        let cli = Cli::try_parse_from(["hwc", "sample"]).unwrap();
        match cli.command {
            Commands::Sample { name, .. } => assert_eq!(name, "main"),
            _ => panic!("Expected sample command"),
        }
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["hwc", "-v", "dump", "tree.json", "--compact"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Dump { input, output, compact } => {
                assert_eq!(input, PathBuf::from("tree.json"));
                assert!(output.is_none());
                assert!(compact);
            }
            _ => panic!("Expected dump command"),
        }
    }
}
