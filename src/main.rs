//! Main entry point for the postal2nuts CLI application.
//!
//! This binary converts postal codes to their NUTS region codes, keeping a
//! local cache of the datasets published by Eurostat so that all but the
//! first run per country and year work offline.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use postal2nuts::{
    CacheManager, Cli, Country, NutsConfig, NutsLevel, NutsYear, PostalNutsIndex,
    default_cache_dir,
};

/// Application entry point.
///
/// Parses command-line arguments, makes the mapping data available (cache
/// hit or download), loads the lookup index, and converts the requested
/// postal codes.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.postal_codes.is_empty() && cli.input_file.is_none() {
        bail!("either --postal-code or --input-file must be given");
    }

    let level = NutsLevel::try_from(cli.level)?;
    let country: Country = cli.country.parse()?;
    let year: NutsYear = cli.year.parse()?;

    let data_file = match &cli.nuts_file {
        // An explicit local table bypasses the cache manager entirely
        Some(path) => path.clone(),
        None => {
            let cache_dir = match &cli.directory {
                Some(dir) => dir.clone(),
                None => default_cache_dir()?,
            };
            let config = NutsConfig {
                country,
                year,
                cache_dir,
                force_download: cli.force_download,
            };
            let manager = CacheManager::new(config);
            let entry = manager.resolve();
            manager.ensure_available(&entry).await?
        }
    };

    let index = PostalNutsIndex::load(&data_file)?;

    let (codes, default_output) = gather_inputs(&cli, level)?;
    let results = index.lookup_many(&codes, level);

    match output_destination(&cli, default_output) {
        Some(path) => write_csv(&results, &path)?,
        None => print_results(&results),
    }

    Ok(())
}

/// Collect the postal codes to convert, plus the default output file for
/// batch mode (derived from the input file name and the requested level).
fn gather_inputs(cli: &Cli, level: NutsLevel) -> Result<(Vec<String>, Option<PathBuf>)> {
    if let Some(input) = &cli.input_file {
        let content = fs::read_to_string(input)
            .with_context(|| format!("cannot read input file {}", input.display()))?;
        let codes: Vec<String> = content
            .lines()
            .map(strip_quotes)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        let default_output = PathBuf::from(format!(
            "{}_nuts{}.csv",
            input.with_extension("").display(),
            level
        ));
        Ok((codes, Some(default_output)))
    } else {
        Ok((cli.postal_codes.clone(), None))
    }
}

/// Codes in an input file may be bare or quoted.
fn strip_quotes(line: &str) -> &str {
    line.trim().trim_matches(|c| c == '\'' || c == '"').trim()
}

/// Where the results go: `Some(path)` for a file, `None` for stdout.
///
/// An explicit `-o -` forces stdout; otherwise batch mode defaults to the
/// derived file name and single-code mode to stdout.
fn output_destination(cli: &Cli, default_output: Option<PathBuf>) -> Option<PathBuf> {
    if cli.wants_stdout() {
        return None;
    }
    match &cli.output_file {
        Some(path) => Some(path.clone()),
        None => default_output,
    }
}

/// Print one line per code: the normalized input and its NUTS code. A miss
/// leaves the NUTS column empty.
fn print_results(results: &[(String, Option<String>)]) {
    for (code, nuts) in results {
        println!("{}    {}", code, nuts.as_deref().unwrap_or(""));
    }
}

/// Write the results as two-column CSV.
fn write_csv(results: &[(String, Option<String>)], path: &Path) -> Result<()> {
    info!("writing nuts codes to {}", path.display());
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("cannot write output file {}", path.display()))?;
    for (code, nuts) in results {
        writer.write_record([code.as_str(), nuts.as_deref().unwrap_or("")])?;
    }
    writer.flush()?;
    Ok(())
}

/// Setup logging: `-v` raises the level to info, `-vv` to debug. The
/// `RUST_LOG` environment variable overrides both.
fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
