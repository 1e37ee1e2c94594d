//! Folder-level processing: find the XML files, turn each into an invoice,
//! drop duplicates, sort, and write the payments CSV.
//!
//! Problems with a single file never stop the run; they end up in
//! [`BatchReport::failures`]. Only an unusable input folder or a failed
//! output write is fatal ([`BatchError`]).

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::core::{FinvoiceError, Insertion, Invoice, InvoiceCollection};
use crate::export::{CsvOptions, render_csv};
use crate::finvoice::{ExtractionStrategy, parse_invoice_bytes};

/// Largest input file that is parsed: 1 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024;

/// Errors that abort the whole run.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BatchError {
    /// Input folder is missing, not a directory, or cannot be listed.
    #[error("cannot read input folder {}: {reason}", path.display())]
    InputFolder { path: PathBuf, reason: String },

    /// The CSV file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Settings for one run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub input_dir: PathBuf,
    pub strategy: ExtractionStrategy,
    /// Files larger than this (in bytes) fail with [`FinvoiceError::FileTooLarge`].
    pub max_file_size: u64,
    /// Also accept `.XML`, `.Xml`, ...
    pub case_insensitive_extension: bool,
}

impl BatchOptions {
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            strategy: ExtractionStrategy::default(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            case_insensitive_extension: false,
        }
    }

    pub fn strategy(mut self, strategy: ExtractionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    pub fn case_insensitive_extension(mut self, enabled: bool) -> Self {
        self.case_insensitive_extension = enabled;
        self
    }
}

/// A file that was skipped because of an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub file_name: String,
    pub error: FinvoiceError,
}

/// Result of a run: accepted invoices (sorted, latest due date first) and
/// what happened to the rest.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub invoices: InvoiceCollection,
    pub files_found: usize,
    pub duplicates: usize,
    pub failures: Vec<FileFailure>,
}

impl BatchReport {
    /// Number of invoices accepted into the CSV.
    pub fn generated(&self) -> usize {
        self.invoices.len()
    }

    pub fn error_count(&self) -> usize {
        self.failures.len()
    }
}

/// XML files directly inside `dir`, sorted by file name.
pub fn collect_invoice_files(dir: &Path, case_insensitive: bool) -> Result<Vec<PathBuf>, BatchError> {
    let folder_error = |reason: String| BatchError::InputFolder {
        path: dir.to_path_buf(),
        reason,
    };

    if !dir.exists() {
        return Err(folder_error("folder does not exist".into()));
    }
    if !dir.is_dir() {
        return Err(folder_error("not a directory".into()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| folder_error(e.to_string()))?;
        let path = entry.path();
        if path.is_file() && has_xml_extension(path, case_insensitive) {
            files.push(path.to_path_buf());
        }
    }
    Ok(files)
}

fn has_xml_extension(path: &Path, case_insensitive: bool) -> bool {
    match path.extension().and_then(OsStr::to_str) {
        Some(ext) if case_insensitive => ext.eq_ignore_ascii_case("xml"),
        Some(ext) => ext == "xml",
        None => false,
    }
}

/// Read and parse a single file.
///
/// The size is checked from metadata before anything is read.
pub fn process_file(path: &Path, options: &BatchOptions) -> Result<Invoice, FinvoiceError> {
    let size = fs::metadata(path)
        .map_err(|e| FinvoiceError::Io(e.to_string()))?
        .len();
    if size > options.max_file_size {
        return Err(FinvoiceError::FileTooLarge {
            size,
            limit: options.max_file_size,
        });
    }

    let bytes = fs::read(path).map_err(|e| FinvoiceError::Io(e.to_string()))?;
    parse_invoice_bytes(&bytes, &options.strategy)
}

/// Process every XML file in the input folder.
pub fn run(options: &BatchOptions) -> Result<BatchReport, BatchError> {
    let files = collect_invoice_files(&options.input_dir, options.case_insensitive_extension)?;
    info!(
        count = files.len(),
        folder = %options.input_dir.display(),
        strategy = %options.strategy,
        "found invoice files"
    );

    let mut report = BatchReport {
        files_found: files.len(),
        ..BatchReport::default()
    };

    for path in files {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        match process_file(&path, options) {
            Ok(invoice) => {
                let supplier = invoice.supplier_business_id().to_string();
                let number = invoice.invoice_number();
                match report.invoices.insert(invoice) {
                    Insertion::Added => {
                        debug!(file = %file_name, %supplier, number, "invoice accepted");
                    }
                    Insertion::Duplicate(_) => {
                        report.duplicates += 1;
                        debug!(file = %file_name, %supplier, number, "duplicate invoice skipped");
                    }
                }
            }
            Err(error) => {
                warn!(file = %file_name, %error, "skipping file");
                report.failures.push(FileFailure { file_name, error });
            }
        }
    }

    report.invoices.sort_by_due_date_descending();
    info!(
        generated = report.generated(),
        duplicates = report.duplicates,
        errors = report.error_count(),
        "batch finished"
    );
    Ok(report)
}

/// Render the invoices and write them to `path`.
pub fn write_csv(path: &Path, invoices: &InvoiceCollection, options: &CsvOptions) -> Result<(), BatchError> {
    let content = render_csv(invoices, options);
    fs::write(path, content).map_err(|source| BatchError::Output {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), rows = invoices.len(), "CSV written");
    Ok(())
}
