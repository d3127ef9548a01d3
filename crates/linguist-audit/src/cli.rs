#![forbid(unsafe_code)]

//! Command-line argument parsing for the audit tool.
//!
//! Parses args manually (no external dependencies) to keep the binary lean.

use std::env;
use std::path::PathBuf;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
linguist-audit — translation coverage report for Qt Linguist (.ts) files

USAGE:
    linguist-audit [OPTIONS] <DIR>

ARGS:
    <DIR>             Directory containing .ts translation files

OPTIONS:
    --contexts        Also print the per-context breakdown for each language
    --help, -h        Show this help message
    --version, -V     Show version

Set RUST_LOG (e.g. RUST_LOG=linguist_catalog=debug) for parser diagnostics.
";

/// Parsed command-line configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory to scan for `.ts` files.
    pub dir: PathBuf,
    /// Whether to print per-context rows in addition to totals.
    pub contexts: bool,
}

/// Parse `std::env::args`, exiting on `--help`, `--version`, or bad usage.
pub fn parse() -> Config {
    let mut dir = None;
    let mut contexts = false;

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--help" | "-h" => {
                print!("{HELP_TEXT}");
                process::exit(0);
            }
            "--version" | "-V" => {
                println!("linguist-audit {VERSION}");
                process::exit(0);
            }
            "--contexts" => contexts = true,
            other if other.starts_with('-') => {
                eprintln!("error: unknown option '{other}'");
                eprintln!("Try 'linguist-audit --help'.");
                process::exit(2);
            }
            other => {
                if dir.replace(PathBuf::from(other)).is_some() {
                    eprintln!("error: more than one directory given");
                    process::exit(2);
                }
            }
        }
    }

    let Some(dir) = dir else {
        eprintln!("error: missing <DIR> argument");
        eprintln!("Try 'linguist-audit --help'.");
        process::exit(2);
    };

    Config { dir, contexts }
}
