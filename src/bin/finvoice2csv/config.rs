//! Configuration module for finvoice2csv.
//!
//! Combines CLI arguments with the `[finvoice2csv]` section of the user
//! config file. CLI arguments win over the file, which wins over defaults.

use std::fs;
use std::path::PathBuf;
use std::sync::LazyLock;

use anyhow::{Result, anyhow, bail};
use serde::Deserialize;

use finvoice_payments::batch::{BatchOptions, DEFAULT_MAX_FILE_SIZE};
use finvoice_payments::export::{CsvOptions, is_valid_date_format};
use finvoice_payments::finvoice::ExtractionStrategy;

use crate::Finvoice2CsvArgs;

/// Default output file name, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "payments.csv";

/// Default CSV field separator.
pub const DEFAULT_SEPARATOR: &str = ";";

/// User config file: `~/.config/finvoice-payments.toml`.
static CONFIG_PATH: LazyLock<Option<PathBuf>> = LazyLock::new(|| {
    dirs::home_dir().map(|home| home.join(".config").join("finvoice-payments.toml"))
});

/// User configuration from the config file.
#[derive(Debug, Default, Deserialize)]
pub struct Finvoice2CsvConfig {
    /// Output CSV path.
    #[serde(default)]
    pub output: Option<String>,
    /// CSV field separator.
    #[serde(default)]
    pub separator: Option<String>,
    /// CSV field enclosure.
    #[serde(default)]
    pub enclosure: Option<String>,
    /// Extraction strategy, `tree` or `stream`.
    #[serde(default)]
    pub strategy: Option<ExtractionStrategy>,
    /// Accept `.XML` and other capitalizations.
    #[serde(default)]
    pub ignore_case: bool,
    /// Print the CSV instead of writing a file.
    #[serde(default)]
    pub print: bool,
    /// `chrono` format for the due date column.
    #[serde(default)]
    pub date_format: Option<String>,
    /// Size limit for input files in bytes.
    #[serde(default)]
    pub max_file_size: Option<u64>,
}

/// Wrapper needed for parsing the config file section.
#[derive(Debug, Default, Deserialize)]
struct UserConfig {
    #[serde(default)]
    finvoice2csv: Finvoice2CsvConfig,
}

impl Finvoice2CsvConfig {
    /// Try to read user config from the file if it exists.
    /// Otherwise, fall back to default config.
    ///
    /// # Errors
    /// Returns an error if config file exists but cannot be read or parsed.
    pub fn get_user_config() -> Result<Self> {
        let Some(path) = CONFIG_PATH.as_deref() else {
            return Ok(Self::default());
        };

        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content)
                .map_err(|e| anyhow!("Failed to parse config file {}:\n{e}", path.display())),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(error) => Err(anyhow!("Failed to read config file {}: {error}", path.display())),
        }
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    /// Returns an error if the TOML string is invalid.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        toml::from_str::<UserConfig>(toml_str)
            .map(|config| config.finvoice2csv)
            .map_err(|e| anyhow!("Failed to parse config: {e}"))
    }
}

/// Final config combined from CLI arguments and user config file.
#[derive(Debug)]
pub struct Config {
    /// Folder scanning and parsing.
    pub batch: BatchOptions,
    /// CSV layout.
    pub csv: CsvOptions,
    /// Output CSV path.
    pub output_path: PathBuf,
    /// Print the CSV to stdout instead of writing it.
    pub print: bool,
}

impl Config {
    /// Create config from given command line args and user config file.
    ///
    /// # Errors
    /// Returns an error if the user config is unreadable or a value is invalid.
    pub fn from_args(args: &Finvoice2CsvArgs) -> Result<Self> {
        Self::from_args_and_config(args, &Finvoice2CsvConfig::get_user_config()?)
    }

    /// Create config from given command line args and explicit user config.
    ///
    /// # Errors
    /// Returns an error if the separator is empty or the date format is invalid.
    pub fn from_args_and_config(args: &Finvoice2CsvArgs, user_config: &Finvoice2CsvConfig) -> Result<Self> {
        let input_dir = args
            .path
            .as_deref()
            .map(|p| PathBuf::from(sanitize_argument(&p.to_string_lossy())))
            .unwrap_or_else(|| PathBuf::from("."));

        let output_path = PathBuf::from(pick(
            args.output.as_deref(),
            user_config.output.as_deref(),
            DEFAULT_OUTPUT,
        ));

        let separator = pick(
            args.separator.as_deref(),
            user_config.separator.as_deref(),
            DEFAULT_SEPARATOR,
        );
        if separator.is_empty() {
            bail!("CSV separator must not be empty");
        }

        let enclosure = pick(args.enclosure.as_deref(), user_config.enclosure.as_deref(), "");

        let mut csv = CsvOptions::default().separator(separator).enclosure(enclosure);
        if let Some(format) = &user_config.date_format {
            if !is_valid_date_format(format) {
                bail!("Invalid date_format '{format}' in config");
            }
            csv = csv.date_format(format.as_str());
        }

        let strategy = args.strategy.or(user_config.strategy).unwrap_or_default();

        let batch = BatchOptions::new(input_dir)
            .strategy(strategy)
            .max_file_size(user_config.max_file_size.unwrap_or(DEFAULT_MAX_FILE_SIZE))
            .case_insensitive_extension(args.ignore_case || user_config.ignore_case);

        Ok(Self {
            batch,
            csv,
            output_path,
            print: args.print || user_config.print,
        })
    }
}

/// CLI value, then config value, then default; sanitized.
fn pick(cli: Option<&str>, config: Option<&str>, default: &str) -> String {
    cli.map(sanitize_argument)
        .or_else(|| config.map(sanitize_argument))
        .unwrap_or_else(|| default.to_string())
}

/// Trim whitespace and one matched pair of surrounding quotes left over
/// from shell quoting. A lone quote character is kept as is.
fn sanitize_argument(value: &str) -> String {
    let trimmed = value.trim();
    ['"', '\'']
        .into_iter()
        .find_map(|quote| trimmed.strip_prefix(quote)?.strip_suffix(quote))
        .unwrap_or(trimmed)
        .to_string()
}

#[cfg(test)]
mod test_finvoice2csv_config {
    use super::*;

    #[test]
    fn from_toml_str_parses_empty_config() {
        let config = Finvoice2CsvConfig::from_toml_str("").expect("should parse empty config");
        assert!(config.output.is_none());
        assert!(config.strategy.is_none());
        assert!(!config.print);
        assert!(!config.ignore_case);
    }

    #[test]
    fn from_toml_str_parses_section() {
        let toml = r#"
[finvoice2csv]
output = "out/payments.csv"
separator = ","
enclosure = '"'
strategy = "stream"
ignore_case = true
date_format = "%d.%m.%Y"
max_file_size = 2048
"#;
        let config = Finvoice2CsvConfig::from_toml_str(toml).expect("should parse config");
        assert_eq!(config.output.as_deref(), Some("out/payments.csv"));
        assert_eq!(config.separator.as_deref(), Some(","));
        assert_eq!(config.enclosure.as_deref(), Some("\""));
        assert_eq!(config.strategy, Some(ExtractionStrategy::Stream));
        assert!(config.ignore_case);
        assert_eq!(config.date_format.as_deref(), Some("%d.%m.%Y"));
        assert_eq!(config.max_file_size, Some(2048));
    }

    #[test]
    fn from_toml_str_ignores_other_sections() {
        let toml = r"
[visaparse]
print = true

[finvoice2csv]
ignore_case = true
";
        let config = Finvoice2CsvConfig::from_toml_str(toml).expect("should parse config");
        assert!(config.ignore_case);
        assert!(!config.print);
    }

    #[test]
    fn from_toml_str_unknown_strategy_returns_error() {
        let toml = r#"
[finvoice2csv]
strategy = "dom"
"#;
        assert!(Finvoice2CsvConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn from_toml_str_invalid_toml_returns_error() {
        assert!(Finvoice2CsvConfig::from_toml_str("this is not valid toml {{{").is_err());
    }
}
