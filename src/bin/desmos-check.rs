//! desmos-check - parse and validate Desmos graph blocks

#[cfg(feature = "cli")]
use clap::{ArgAction, Parser, Subcommand};
#[cfg(feature = "cli")]
use desmos_dsl::{
    diagnostics::{check_source, format_diagnostics, Diagnostic},
    parse_graph, Graph,
};
#[cfg(feature = "cli")]
use serde::Serialize;
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, Read, Write};
#[cfg(feature = "cli")]
use tracing_subscriber::EnvFilter;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "desmos-check")]
#[command(version)]
#[command(about = "Parse and validate Desmos graph blocks", long_about = None)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input file path (reads from stdin if not provided)
    input_file: Option<String>,

    /// Output file path (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<String>,

    /// Pretty print the JSON output
    #[arg(short, long)]
    pretty: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Report problems in a graph block
    Check {
        /// Input file to check
        input: Option<String>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Print the content hash of a graph block
    Hash {
        /// Input file path
        input: Option<String>,
    },

    /// Show version and grammar info
    Info,
}

/// JSON printed for a parsed block
#[cfg(feature = "cli")]
#[derive(Serialize)]
struct GraphDocument<'a> {
    hash: &'a str,
    graph: &'a Graph,
}

#[cfg(feature = "cli")]
fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Handle subcommands first
    if let Some(cmd) = cli.command {
        return handle_subcommand(cmd);
    }

    let input = read_input(cli.input_file.as_deref())?;
    let graph = parse_or_exit(&input);

    let document = GraphDocument {
        hash: graph.hash(),
        graph: &graph,
    };
    let result = if cli.pretty {
        serde_json::to_string_pretty(&document)
    } else {
        serde_json::to_string(&document)
    }
    .map_err(io::Error::other)?;

    match cli.output {
        Some(path) => {
            let mut file = fs::File::create(&path)?;
            writeln!(file, "{}", result)?;
            eprintln!("✓ Output written to: {}", path);
        }
        None => {
            println!("{}", result);
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn handle_subcommand(cmd: Commands) -> io::Result<()> {
    match cmd {
        Commands::Check { input, no_color } => {
            let content = read_input(input.as_deref())?;
            let result = check_source(&content);
            println!("{}", format_diagnostics(&result, !no_color));

            if result.has_errors() {
                std::process::exit(1);
            }
        }

        Commands::Hash { input } => {
            let content = read_input(input.as_deref())?;
            let graph = parse_or_exit(&content);
            println!("{}", graph.hash());
        }

        Commands::Info => {
            println!("desmos-check - Desmos graph block parser");
            println!("Version: {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Block layout:");
            println!("  [settings]");
            println!("  ---");
            println!("  equation | tag | tag ...");
            println!();
            println!("Settings:");
            println!("  width, height, left, right, bottom, top,");
            println!("  grid, hideAxisNumbers, degreeMode, defaultColor");
            println!();
            println!("Equation tags:");
            println!("  hidden, solid, dashed, dotted, point, open, cross,");
            println!("  <color name> or #hex, label, label:<text>, <restriction>");
            println!();
        }
    }

    Ok(())
}

/// Read from the given file, or stdin when there is none
#[cfg(feature = "cli")]
fn read_input(path: Option<&str>) -> io::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Parse the block, or report the error and exit with status 1
#[cfg(feature = "cli")]
fn parse_or_exit(source: &str) -> Graph {
    match parse_graph(source) {
        Ok(graph) => graph,
        Err(err) => {
            eprintln!("{}", Diagnostic::from(&err));
            std::process::exit(1);
        }
    }
}

#[cfg(feature = "cli")]
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "desmos_dsl=debug",
        _ => "desmos_dsl=trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install desmos-dsl --features cli");
    eprintln!("  desmos-check [OPTIONS] [INPUT_FILE]");
}
