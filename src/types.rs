use std::fmt;

use serde::{Deserialize, Serialize};

use crate::missing::MissingSentinels;

/// Placeholder written into missing cells of categorical columns
pub const DEFAULT_CATEGORICAL_PLACEHOLDER: &str = "Unknown";

/// Decimal places used when formatting a numeric replacement
pub const DEFAULT_PRECISION: usize = 2;

/// Replacement used when a numeric column has no numeric values at all
pub const DEFAULT_ALL_MISSING_FALLBACK: f64 = 0.0;

/// Minimum share of parseable non-missing cells for a column to count as numeric
pub const DEFAULT_NUMERIC_THRESHOLD: f64 = 0.5;

/// Imputation strategy for numeric columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Mean,
    Median,
}

impl Strategy {
    /// Resolve a strategy by name.
    ///
    /// Unrecognized names fall back to [`Strategy::Mean`] and come back with a
    /// warning for the caller to surface.
    pub fn resolve(name: &str) -> (Self, Option<ImputeWarning>) {
        match name {
            "mean" => (Strategy::Mean, None),
            "median" => (Strategy::Median, None),
            other => (
                Strategy::Mean,
                Some(ImputeWarning::UnknownStrategy {
                    requested: other.to_string(),
                    fallback: Strategy::Mean,
                }),
            ),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Mean => "mean",
            Strategy::Median => "median",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Non-fatal notices produced during imputation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImputeWarning {
    UnknownStrategy { requested: String, fallback: Strategy },
    NoNumericValues { column: String, fallback: f64 },
}

impl fmt::Display for ImputeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImputeWarning::UnknownStrategy {
                requested,
                fallback,
            } => write!(
                f,
                "Unsupported strategy '{}', defaulting to {}",
                requested, fallback
            ),
            ImputeWarning::NoNumericValues { column, fallback } => write!(
                f,
                "Column '{}' has no numeric values, filled with fallback {}",
                column, fallback
            ),
        }
    }
}

/// Type tag of a column as seen by the imputer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

/// Supported file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Csv,
    Tsv,
    Json,
    Xml,
}

impl FileFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "csv" => Some(FileFormat::Csv),
            "tsv" | "tab" => Some(FileFormat::Tsv),
            "json" => Some(FileFormat::Json),
            "xml" => Some(FileFormat::Xml),
            _ => None,
        }
    }
}

/// Options controlling how a file is turned into a table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadOptions {
    /// Whether the first record holds column names rather than data
    pub has_header: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self { has_header: true }
    }
}

/// Imputation options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImputeOptions {
    /// Statistic used for numeric columns
    pub strategy: Strategy,

    /// Cell values that count as missing
    pub sentinels: MissingSentinels,

    /// Text written into missing cells of categorical columns
    pub categorical_placeholder: String,

    /// Value used when a numeric column has nothing to average
    pub all_missing_fallback: f64,

    /// Decimal places for numeric replacements
    pub precision: usize,

    /// Share of numeric cells needed to treat a column as numeric
    pub numeric_threshold: f64,

    /// Suffix appended to imputed column names in the columnar path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provenance_suffix: Option<String>,
}

impl Default for ImputeOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::Mean,
            sentinels: MissingSentinels::default(),
            categorical_placeholder: DEFAULT_CATEGORICAL_PLACEHOLDER.to_string(),
            all_missing_fallback: DEFAULT_ALL_MISSING_FALLBACK,
            precision: DEFAULT_PRECISION,
            numeric_threshold: DEFAULT_NUMERIC_THRESHOLD,
            provenance_suffix: None,
        }
    }
}

impl ImputeOptions {
    /// Reject settings that would write non-numeric text into numeric columns
    pub fn validate(&self) -> Result<()> {
        if !self.all_missing_fallback.is_finite() {
            return Err(crate::error::Error::InvalidInput(format!(
                "Fallback value must be finite, got {}",
                self.all_missing_fallback
            )));
        }
        if !(0.0..=1.0).contains(&self.numeric_threshold) {
            return Err(crate::error::Error::InvalidInput(format!(
                "Numeric threshold must be between 0 and 1, got {}",
                self.numeric_threshold
            )));
        }
        Ok(())
    }
}

/// Result type for the application
pub type Result<T> = std::result::Result<T, crate::error::Error>;
