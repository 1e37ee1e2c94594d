//! finvoice2csv - Collect Finvoice XML invoices into a payments CSV.
//!
//! Reads every `.xml` file in the input folder, skips duplicates and broken
//! files, and writes one CSV row per invoice, latest due date first.

mod config;
mod summary;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use finvoice_payments::batch;
use finvoice_payments::export::render_csv;
use finvoice_payments::finvoice::ExtractionStrategy;

pub use crate::config::Config;
use crate::summary::print_summary;

/// Command line arguments for finvoice2csv.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    name = env!("CARGO_BIN_NAME"),
    about = "Collect Finvoice XML invoices into a payments CSV"
)]
pub struct Finvoice2CsvArgs {
    /// Input folder with Finvoice XML files (default is the current directory)
    #[arg(value_hint = clap::ValueHint::DirPath)]
    pub path: Option<PathBuf>,

    /// Output CSV file (default "payments.csv")
    #[arg(short, long, name = "OUTPUT_PATH")]
    pub output: Option<String>,

    /// CSV field separator (default ";")
    #[arg(short, long)]
    pub separator: Option<String>,

    /// CSV field enclosure (default none)
    #[arg(short, long)]
    pub enclosure: Option<String>,

    /// Field extraction strategy: tree or stream
    #[arg(long)]
    pub strategy: Option<ExtractionStrategy>,

    /// Also accept upper-case file extensions such as .XML
    #[arg(long)]
    pub ignore_case: bool,

    /// Print the CSV to stdout instead of writing a file
    #[arg(short, long)]
    pub print: bool,

    /// Verbose logging (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

fn main() -> Result<()> {
    let args = Finvoice2CsvArgs::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::from_args(&args)?;
    finvoice2csv(&config)
}

fn finvoice2csv(config: &Config) -> Result<()> {
    let report = batch::run(&config.batch)?;
    let found = format!("Found total of {} files", report.files_found).bold();
    if config.print {
        eprintln!("{found}\n");
    } else {
        println!("{found}\n");
    }

    let saved_to = if report.invoices.is_empty() {
        None
    } else if config.print {
        print!("{}", render_csv(&report.invoices, &config.csv));
        None
    } else {
        batch::write_csv(&config.output_path, &report.invoices, &config.csv)?;
        Some(config.output_path.as_path())
    };

    print_summary(&report, saved_to, config.print);
    Ok(())
}
