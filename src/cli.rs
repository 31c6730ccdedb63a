use std::path::PathBuf;

use clap::Parser;

use crate::config::{DEFAULT_COUNTRY, DEFAULT_YEAR};

#[derive(Parser, Debug)]
#[command(name = "postal2nuts")]
#[command(version)]
#[command(about = "Converts postal codes to their NUTS region codes", long_about = None)]
#[command(after_help = "Examples:\n  \
  postal2nuts -p 2612AB              print the NUTS-3 code of one postal code\n  \
  postal2nuts -p 2612AB -l 1         same code at NUTS level 1\n  \
  postal2nuts -i codes.txt -o -      convert a whole file, write to stdout\n  \
  postal2nuts --country DE -p 10115  use the German dataset")]
pub struct Cli {
    /// Postal code to convert (repeatable)
    #[arg(short = 'p', long = "postal-code", value_name = "CODE")]
    pub postal_codes: Vec<String>,

    /// Input file with one postal code per line
    #[arg(
        short = 'i',
        long = "input-file",
        value_name = "FILE",
        conflicts_with = "postal_codes"
    )]
    pub input_file: Option<PathBuf>,

    /// Output file for the converted codes ("-" writes to stdout)
    #[arg(short = 'o', long = "output-file", value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// NUTS level of the reported codes
    #[arg(short = 'l', long, value_name = "LEVEL", default_value_t = 3)]
    pub level: u8,

    /// Two-letter country code of the dataset
    #[arg(long, value_name = "CC", default_value = DEFAULT_COUNTRY)]
    pub country: String,

    /// Publication year of the NUTS files
    #[arg(long, value_name = "YYYY", default_value = DEFAULT_YEAR)]
    pub year: String,

    /// Directory for the cached NUTS files (default: the OS cache directory)
    #[arg(long, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Local NUTS table to use instead of the cached download
    #[arg(long = "nuts-file", value_name = "FILE")]
    pub nuts_file: Option<PathBuf>,

    /// Re-download the dataset even when it is cached
    #[arg(long)]
    pub force_download: bool,

    /// Verbose output (-v info, -vv debug)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn wants_stdout(&self) -> bool {
        matches!(&self.output_file, Some(path) if path.as_os_str() == "-")
    }
}
