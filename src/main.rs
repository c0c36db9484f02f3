//! Urilex CLI
//!
//! A command-line interface to the urilex resolution functions.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use urilex::{
    compute_common_base_directory, reduce_path, relative_uri_fragment, resolve_uri,
    split_uri_path, Uri,
};

#[derive(Parser)]
#[command(name = "urilex")]
#[command(author, version, about = "Lexical URI reference resolution", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a URI path into its root and segments
    Split {
        /// The path to split
        path: String,
    },

    /// Collapse `.` and `..` segments in a URI path
    Reduce {
        /// The path to reduce
        path: String,
    },

    /// Resolve references against a base URI
    Resolve {
        /// The base URI
        base: String,
        /// References applied left to right
        parts: Vec<String>,
    },

    /// Compute the reference leading from one URI to another
    Relative {
        /// The URI to start from
        from: String,
        /// The URI to reach
        to: String,
    },

    /// Find the deepest directory shared by a set of URIs
    CommonBase {
        /// URIs to compare
        uris: Vec<String>,
        /// Read additional URIs from a file, one per line
        #[arg(short, long, value_name = "FILE")]
        from_file: Option<PathBuf>,
    },
}

/// JSON form of a resolved URI
#[derive(Serialize)]
struct UriReport<'a> {
    uri: String,
    scheme: &'a str,
    authority: &'a str,
    path: &'a str,
    query: &'a str,
    fragment: &'a str,
}

impl<'a> UriReport<'a> {
    fn new(uri: &'a Uri) -> Self {
        Self {
            uri: uri.to_string(),
            scheme: uri.scheme(),
            authority: uri.authority(),
            path: uri.path(),
            query: uri.query(),
            fragment: uri.fragment(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    match run(cli.command, cli.json) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(command: Commands, json: bool) -> Result<ExitCode> {
    match command {
        Commands::Split { path } => {
            let parts = split_uri_path(&path)?;
            if json {
                println!("{}", serde_json::to_string(&parts)?);
            } else {
                for part in parts.iter() {
                    println!("{}", part);
                }
            }
        }
        Commands::Reduce { path } => {
            let reduced = reduce_path(&path)?;
            print_text(&reduced, json)?;
        }
        Commands::Resolve { base, parts } => {
            let base = parse_uri(&base)?;
            let resolved = resolve_uri(&base, &parts)?;
            info!(base = %base, resolved = %resolved, "resolved");
            print_uri(&resolved, json)?;
        }
        Commands::Relative { from, to } => {
            let from = parse_uri(&from)?;
            let to = parse_uri(&to)?;
            let fragment = relative_uri_fragment(&from, &to);
            print_text(&fragment, json)?;
        }
        Commands::CommonBase { mut uris, from_file } => {
            if let Some(file) = from_file {
                uris.extend(read_uri_list(&file)?);
            }
            let uris = uris
                .iter()
                .map(|text| parse_uri(text))
                .collect::<Result<Vec<_>>>()?;
            debug!(count = uris.len(), "computing common base");

            match compute_common_base_directory(&uris) {
                Some(base) => print_uri(&base, json)?,
                None => {
                    if json {
                        println!("null");
                    }
                    return Ok(ExitCode::from(2));
                }
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn parse_uri(text: &str) -> Result<Uri> {
    Uri::parse(text).with_context(|| format!("invalid URI: {}", text))
}

/// Read URIs from a file, skipping blank lines and `#` comments
fn read_uri_list(file: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    Ok(parse_uri_list(&contents))
}

fn parse_uri_list(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}

fn print_text(text: &str, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(text)?);
    } else {
        println!("{}", text);
    }
    Ok(())
}

fn print_uri(uri: &Uri, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&UriReport::new(uri))?);
    } else {
        println!("{}", uri);
    }
    Ok(())
}
