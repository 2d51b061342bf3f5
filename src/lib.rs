//! Missing-value detection and imputation for flat tabular files.
//!
//! Readers turn CSV, TSV, JSON and XML files into a [`Table`]. The detector
//! counts missing cells per column and the [`Imputer`] fills them: numeric
//! columns with their mean or median, categorical columns with a placeholder.
//!
//! ```
//! use validata::{detect_missing, impute_missing, MissingSentinels, Table};
//!
//! let table = Table::from_rows(vec![
//!     vec!["1", "2", ""],
//!     vec!["4", "", "6"],
//!     vec!["7", "8", "9"],
//! ])
//! .unwrap();
//!
//! assert_eq!(detect_missing(&table, &MissingSentinels::default()), vec![0, 1, 1]);
//!
//! let result = impute_missing(&table, "mean");
//! assert_eq!(result.table.rows()[1][1], "5.00");
//! assert_eq!(result.table.rows()[0][2], "7.50");
//! ```

pub mod cli;
pub mod detect;
pub mod error;
pub mod impute;
pub mod inference;
pub mod missing;
pub mod output;
pub mod readers;
pub mod report;
pub mod stats;
pub mod table;
pub mod types;

pub use detect::{detect_missing, detect_missing_columns};
pub use error::Error;
pub use impute::{impute_missing, ColumnImputation, Imputation, Imputer};
pub use missing::MissingSentinels;
pub use table::{Column, ColumnarTable, Table};
pub use types::{ColumnKind, ImputeOptions, ImputeWarning, ReadOptions, Result, Strategy};
