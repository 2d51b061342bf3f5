use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::missing::MissingSentinels;
use crate::types::{
    ImputeOptions, ReadOptions, DEFAULT_ALL_MISSING_FALLBACK, DEFAULT_CATEGORICAL_PLACEHOLDER,
    DEFAULT_NUMERIC_THRESHOLD, DEFAULT_PRECISION,
};

/// Missing-value detection and imputation for CSV, JSON and XML files
#[derive(Parser, Debug)]
#[command(name = "validata")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Count missing values per column
    Detect {
        #[command(flatten)]
        input: InputArgs,

        /// Output JSON file path (stdout if not specified)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Fill missing values and write the table as CSV
    Impute {
        #[command(flatten)]
        input: InputArgs,

        /// Strategy for numeric columns (mean, median); unknown names use mean
        #[arg(short, long, default_value = "mean")]
        strategy: String,

        /// Text written into missing cells of categorical columns
        #[arg(long, default_value = DEFAULT_CATEGORICAL_PLACEHOLDER)]
        placeholder: String,

        /// Value for numeric columns with no numeric values at all
        #[arg(
            long,
            default_value_t = DEFAULT_ALL_MISSING_FALLBACK,
            allow_negative_numbers = true,
            value_parser = parse_finite
        )]
        fallback: f64,

        /// Decimal places for numeric replacements
        #[arg(long, default_value_t = DEFAULT_PRECISION)]
        precision: usize,

        /// Share of numeric cells needed to treat a column as numeric
        #[arg(long, default_value_t = DEFAULT_NUMERIC_THRESHOLD)]
        numeric_threshold: f64,

        /// Rename imputed columns with this suffix (implies --columnar)
        #[arg(long, value_name = "SUFFIX")]
        mark_imputed: Option<String>,

        /// Output CSV file path (stdout if not specified)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Write a JSON imputation report to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },
}

/// Arguments shared by every subcommand
#[derive(Args, Debug)]
pub struct InputArgs {
    /// Input file path (.csv, .tsv, .json, .xml)
    pub input: PathBuf,

    /// Input has no column names: the first CSV/TSV record is data, and JSON
    /// keys or XML field names are not used as the header
    #[arg(long, default_value_t = false)]
    pub no_header: bool,

    /// Process through the typed-column view
    #[arg(long, default_value_t = false)]
    pub columnar: bool,

    /// Cell value treated as missing; repeat to build the set (default: "", NULL, null)
    #[arg(long = "sentinel", value_name = "VALUE")]
    pub sentinels: Vec<String>,
}

impl InputArgs {
    pub fn read_options(&self) -> ReadOptions {
        ReadOptions {
            has_header: !self.no_header,
        }
    }

    pub fn sentinels(&self) -> MissingSentinels {
        if self.sentinels.is_empty() {
            MissingSentinels::default()
        } else {
            MissingSentinels::new(self.sentinels.iter().cloned())
        }
    }
}

/// Parse a finite number; `NaN` and `inf` are rejected
fn parse_finite(value: &str) -> std::result::Result<f64, String> {
    let parsed: f64 = value.parse().map_err(|e| format!("{e}"))?;
    if parsed.is_finite() {
        Ok(parsed)
    } else {
        Err(format!("'{value}' is not a finite number"))
    }
}

/// Options for an `impute` run, strategy resolved separately by name
pub fn impute_options(
    input: &InputArgs,
    placeholder: String,
    fallback: f64,
    precision: usize,
    numeric_threshold: f64,
    mark_imputed: Option<String>,
) -> ImputeOptions {
    ImputeOptions {
        sentinels: input.sentinels(),
        categorical_placeholder: placeholder,
        all_missing_fallback: fallback,
        precision,
        numeric_threshold,
        provenance_suffix: mark_imputed,
        ..ImputeOptions::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_detect_with_sentinels() {
        let cli = Cli::parse_from([
            "validata", "detect", "data.csv", "--sentinel", "NA", "--sentinel", "",
        ]);
        match cli.command {
            Commands::Detect { input, out } => {
                assert_eq!(input.input, PathBuf::from("data.csv"));
                assert!(out.is_none());
                let sentinels = input.sentinels();
                assert!(sentinels.is_missing("NA"));
                assert!(sentinels.is_missing(""));
                assert!(!sentinels.is_missing("NULL"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_impute_defaults() {
        let cli = Cli::parse_from(["validata", "impute", "data.json"]);
        match cli.command {
            Commands::Impute {
                input,
                strategy,
                placeholder,
                fallback,
                precision,
                ..
            } => {
                assert_eq!(strategy, "mean");
                assert_eq!(placeholder, "Unknown");
                assert_eq!(fallback, 0.0);
                assert_eq!(precision, 2);
                assert!(input.read_options().has_header);
                assert_eq!(input.sentinels(), MissingSentinels::default());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_mark_imputed_suffix() {
        let cli = Cli::parse_from(["validata", "impute", "d.csv", "--mark-imputed", "_imputed"]);
        match cli.command {
            Commands::Impute { mark_imputed, .. } => {
                assert_eq!(mark_imputed.as_deref(), Some("_imputed"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_no_header_help_covers_every_format() {
        let command = Cli::command();
        let detect = command.find_subcommand("detect").unwrap();
        let arg = detect
            .get_arguments()
            .find(|a| a.get_id() == "no_header")
            .unwrap();
        let help = arg.get_help().unwrap().to_string();
        assert!(help.contains("JSON"));
        assert!(help.contains("XML"));
    }

    #[test]
    fn test_non_finite_fallback_rejected() {
        for value in ["NaN", "inf", "-inf"] {
            let result = Cli::try_parse_from(["validata", "impute", "d.csv", "--fallback", value]);
            assert!(result.is_err(), "accepted --fallback {value}");
        }
    }

    #[test]
    fn test_negative_fallback() {
        let cli = Cli::parse_from(["validata", "impute", "d.csv", "--fallback", "-1"]);
        match cli.command {
            Commands::Impute { fallback, .. } => assert_eq!(fallback, -1.0),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
