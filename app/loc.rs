//! Command-line interface for linetally.
//!
//! Counts files, lines, code, comments and blanks per extension under a
//! directory and prints the result as a table, Markdown or JSON.

use clap::{Parser, ValueEnum};
use linetally::{BinaryDetection, ErrorPolicy, TallyBuilder, TallyOptions, TallyReport, output, tally};
use std::env;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::process::exit;
use std::time::{Duration, Instant};

/// loc — count lines of code per file type
#[derive(Parser)]
#[command(name = "loc", version, about, long_about = None)]
struct Cli {
    /// Directory or file to scan (default: path piped on stdin, then current dir)
    root: Option<PathBuf>,

    /// Filter by file type: .go,.py,.lua,etc...
    #[arg(short, long, value_delimiter = ',')]
    filter: Vec<String>,

    /// Ignore glob, matched against the full path: use `**/vendor`, not `vendor` (can be repeated)
    #[arg(short = 'I', long = "ignore")]
    ignore_patterns: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Pretty output (indented JSON)
    #[arg(short, long)]
    pretty: bool,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Binary detection strategy
    #[arg(long, default_value = "none", value_parser = parse_binary_detection)]
    binary_detection: BinaryDetection,

    /// Skip unreadable files and directories instead of aborting
    #[arg(short = 'k', long)]
    keep_going: bool,

    /// Debug logging (RUST_LOG overrides)
    #[cfg(feature = "logging")]
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Markdown,
    Json,
}

impl From<OutputFormat> for output::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Table => output::OutputFormat::Table,
            OutputFormat::Markdown => output::OutputFormat::Markdown,
            OutputFormat::Json => output::OutputFormat::Json,
        }
    }
}

/// Parse string into BinaryDetection enum.
fn parse_binary_detection(s: &str) -> Result<BinaryDetection, String> {
    match s {
        "simple" => Ok(BinaryDetection::Simple),
        "accurate" => Ok(BinaryDetection::Accurate),
        "none" => Ok(BinaryDetection::None),
        _ => Err(format!("invalid binary detection method: {}", s)),
    }
}

impl Cli {
    fn into_options(self, root: PathBuf) -> (TallyOptions, OutputFormat, bool, Option<PathBuf>) {
        let policy = if self.keep_going {
            ErrorPolicy::Skip
        } else {
            ErrorPolicy::Abort
        };
        let options = TallyBuilder::new(root)
            .extensions(self.filter)
            .ignore_patterns(self.ignore_patterns)
            .binary_detection(self.binary_detection)
            .error_policy(policy)
            .build();
        (options, self.format, self.pretty, self.output)
    }
}

/// Positional argument, then a path piped on stdin, then the working directory.
fn resolve_root(arg: Option<PathBuf>) -> io::Result<PathBuf> {
    if let Some(root) = arg {
        return Ok(root);
    }
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        let mut input = String::new();
        stdin.lock().read_to_string(&mut input)?;
        let input = input.strip_suffix('\n').unwrap_or(&input);
        let input = input.strip_suffix('\r').unwrap_or(input);
        if !input.is_empty() {
            return Ok(PathBuf::from(input));
        }
    }
    env::current_dir()
}

#[cfg(feature = "logging")]
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;
    let default = if verbose { "linetally=debug" } else { "linetally=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let mut cli = Cli::parse();
    #[cfg(feature = "logging")]
    init_logging(cli.verbose);

    let start = Instant::now();
    let root = match resolve_root(cli.root.take()) {
        Ok(root) => root,
        Err(e) => {
            eprintln!("Error: cannot determine root path: {}", e);
            exit(1);
        }
    };
    let (options, format, pretty, destination) = cli.into_options(root);

    match tally(options) {
        Ok(report) => output_result(&report, format, pretty, destination, start.elapsed()),
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    }
}

fn output_result(
    report: &TallyReport,
    format: OutputFormat,
    pretty: bool,
    destination: Option<PathBuf>,
    elapsed: Duration,
) {
    let format = output::OutputFormat::from(format);
    let result = match destination {
        Some(path) => output::write_result_to_file(report, format, path, pretty, Some(elapsed)),
        None => output::format_result(report, format, pretty, Some(elapsed)).map(|out| {
            print!("{}", out);
            if format == output::OutputFormat::Json {
                println!();
            }
        }),
    };
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        exit(1);
    }
}
