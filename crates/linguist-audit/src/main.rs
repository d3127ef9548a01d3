#![forbid(unsafe_code)]

//! Scans a translation directory, loads every catalog, and prints a
//! per-language coverage report. A broken file is reported and skipped; the
//! exit code is non-zero only when nothing could be audited.

mod cli;

use std::process::ExitCode;

use linguist_catalog::{Catalog, CoverageReport, available_languages};
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = cli::parse();

    let languages = match available_languages(&config.dir) {
        Ok(languages) => languages,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };
    if languages.is_empty() {
        eprintln!("no .ts files found under {}", config.dir.display());
        return ExitCode::FAILURE;
    }

    let mut audited = 0usize;
    println!("{:<12} {:>10} {:>10} {:>8} {:>9}", "language", "translated", "unfinished", "vanished", "coverage");
    for language in &languages {
        let catalog = match Catalog::load(&language.path) {
            Ok(catalog) => catalog,
            Err(err) => {
                warn!(path = %language.path.display(), error = %err, "skipping unloadable catalog");
                eprintln!("{}: skipped ({err})", language.tag);
                continue;
            }
        };
        print_report(&catalog.coverage(), config.contexts);
        audited += 1;
    }

    if audited == 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn print_report(report: &CoverageReport, contexts: bool) {
    println!(
        "{:<12} {:>10} {:>10} {:>8} {:>8.1}%",
        report.language,
        report.totals.translated,
        report.totals.unfinished,
        report.totals.vanished,
        report.totals.coverage_percent()
    );
    if contexts {
        for context in &report.contexts {
            println!(
                "  {:<28} {:>3}/{:<3} ({:>5.1}%)",
                context.name,
                context.counts.translated,
                context.counts.live(),
                context.counts.coverage_percent()
            );
        }
    }
}
