//! Missing-value imputation.
//!
//! Both entry points, [`Imputer::impute`] for row-shaped tables and
//! [`Imputer::impute_columns`] for typed columnar tables, run the same
//! per-column algorithm:
//!
//! 1. Numeric columns: collect the non-missing cells that parse as numbers,
//!    compute the strategy's statistic and write it, formatted to the
//!    configured precision, into every missing cell. Non-numeric cells are
//!    left as they are. With no numeric values at all the configured fallback
//!    is used instead.
//! 2. Categorical columns: write the placeholder into every missing cell.
//!
//! The input table is never modified; a new one is returned.

use serde::Serialize;
use tracing::{debug, warn};

use crate::inference::{classify_column, parse_numeric};
use crate::types::Result;
use crate::stats;
use crate::table::{unique_names, Column, ColumnarTable, Table};
use crate::types::{ColumnKind, ImputeOptions, ImputeWarning, Strategy};

/// What happened to one column during an imputation pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnImputation {
    /// Column index (0-based)
    pub index: usize,

    /// Column name after imputation
    pub name: String,

    pub kind: ColumnKind,

    /// Number of cells that were replaced
    pub filled: usize,

    /// Value written into missing cells; absent when nothing was missing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replacement: Option<String>,

    /// Statistic the numeric replacement was derived from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistic: Option<f64>,
}

/// Output of an imputation pass
#[derive(Debug, Clone, PartialEq)]
pub struct Imputation<T> {
    pub table: T,
    pub columns: Vec<ColumnImputation>,
    pub warnings: Vec<ImputeWarning>,
}

impl<T> Imputation<T> {
    /// Total number of cells replaced
    pub fn filled(&self) -> usize {
        self.columns.iter().map(|c| c.filled).sum()
    }
}

/// Replacement decided for one column
struct ColumnPlan {
    replacement: String,
    statistic: Option<f64>,
    warning: Option<ImputeWarning>,
}

/// Fills missing cells according to [`ImputeOptions`]
#[derive(Debug, Clone)]
pub struct Imputer {
    options: ImputeOptions,
    /// Notices raised while configuring, repeated in every result
    notices: Vec<ImputeWarning>,
}

impl Imputer {
    /// Create an imputer, rejecting options that fail
    /// [`ImputeOptions::validate`] (such as a non-finite fallback)
    pub fn new(options: ImputeOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options,
            notices: Vec::new(),
        })
    }

    /// Create an imputer from a strategy name.
    ///
    /// Unknown names fall back to mean; the notice is logged and also attached
    /// to every [`Imputation`] this imputer produces.
    pub fn with_strategy_name(name: &str, mut options: ImputeOptions) -> Result<Self> {
        options.validate()?;
        let (strategy, notice) = Strategy::resolve(name);
        options.strategy = strategy;
        Ok(Self::resolved(options, notice))
    }

    fn resolved(options: ImputeOptions, notice: Option<ImputeWarning>) -> Self {
        let mut notices = Vec::new();
        if let Some(notice) = notice {
            warn!("{}", notice);
            notices.push(notice);
        }
        Self { options, notices }
    }

    pub fn options(&self) -> &ImputeOptions {
        &self.options
    }

    /// Impute a row-shaped table. Column kinds are inferred from the cells.
    pub fn impute(&self, table: &Table) -> Imputation<Table> {
        let width = table.width();
        let mut warnings = self.notices.clone();
        let mut columns = Vec::with_capacity(width);
        let mut replacements: Vec<Option<String>> = Vec::with_capacity(width);

        for idx in 0..width {
            let cells: Vec<&str> = table.column(idx).collect();
            let kind = classify_column(
                cells.iter().copied(),
                &self.options.sentinels,
                self.options.numeric_threshold,
            );
            let name = table.column_name(idx);
            let (summary, plan) = self.impute_column(idx, &name, kind, &cells);

            if let Some(warning) = plan.as_ref().and_then(|p| p.warning.clone()) {
                warnings.push(warning);
            }
            replacements.push(plan.map(|p| p.replacement));
            columns.push(summary);
        }

        let sentinels = &self.options.sentinels;
        let rows = table
            .rows()
            .iter()
            .map(|row| {
                row.iter()
                    .zip(&replacements)
                    .map(|(cell, replacement)| match replacement {
                        Some(value) if sentinels.is_missing(cell) => value.clone(),
                        _ => cell.clone(),
                    })
                    .collect()
            })
            .collect();

        Imputation {
            table: Table::from_parts(table.header().map(<[String]>::to_vec), rows),
            columns,
            warnings,
        }
    }

    /// Impute a typed columnar table, honouring each column's type tag.
    ///
    /// With a provenance suffix configured, columns that had cells filled are
    /// renamed `<name><suffix>`.
    pub fn impute_columns(&self, table: &ColumnarTable) -> Imputation<ColumnarTable> {
        let mut warnings = self.notices.clone();
        let mut summaries = Vec::with_capacity(table.width());
        let mut columns = Vec::with_capacity(table.width());

        for (idx, column) in table.columns().iter().enumerate() {
            let cells: Vec<&str> = column.cells.iter().map(String::as_str).collect();
            let (mut summary, plan) = self.impute_column(idx, &column.name, column.kind, &cells);

            let new_cells = match plan {
                Some(plan) => {
                    if let Some(warning) = plan.warning {
                        warnings.push(warning);
                    }
                    self.fill(&cells, &plan.replacement)
                }
                None => column.cells.clone(),
            };

            let mut name = column.name.clone();
            if let Some(suffix) = &self.options.provenance_suffix {
                if summary.filled > 0 {
                    name.push_str(suffix);
                    summary.name = name.clone();
                }
            }

            columns.push(Column::new(name, column.kind, new_cells));
            summaries.push(summary);
        }

        let names = unique_names(columns.iter().map(|c| c.name.clone()).collect());
        for ((column, summary), name) in columns.iter_mut().zip(&mut summaries).zip(names) {
            if column.name != name {
                column.name = name.clone();
                summary.name = name;
            }
        }

        Imputation {
            table: ColumnarTable::from_parts(columns, table.row_count()),
            columns: summaries,
            warnings,
        }
    }

    /// Shared per-column step. Returns no plan when nothing is missing.
    fn impute_column(
        &self,
        index: usize,
        name: &str,
        kind: ColumnKind,
        cells: &[&str],
    ) -> (ColumnImputation, Option<ColumnPlan>) {
        let sentinels = &self.options.sentinels;
        let filled = cells.iter().filter(|c| sentinels.is_missing(c)).count();

        let plan = if filled == 0 {
            None
        } else {
            Some(match kind {
                ColumnKind::Numeric => self.numeric_plan(name, cells),
                ColumnKind::Categorical => ColumnPlan {
                    replacement: self.options.categorical_placeholder.clone(),
                    statistic: None,
                    warning: None,
                },
            })
        };

        debug!(
            column = name,
            ?kind,
            filled,
            replacement = plan.as_ref().map(|p| p.replacement.as_str()),
            "Imputed column"
        );

        let summary = ColumnImputation {
            index,
            name: name.to_string(),
            kind,
            filled,
            replacement: plan.as_ref().map(|p| p.replacement.clone()),
            statistic: plan.as_ref().and_then(|p| p.statistic),
        };

        (summary, plan)
    }

    fn numeric_plan(&self, name: &str, cells: &[&str]) -> ColumnPlan {
        let sentinels = &self.options.sentinels;
        let values: Vec<f64> = cells
            .iter()
            .filter(|c| !sentinels.is_missing(c))
            .filter_map(|c| parse_numeric(c))
            .collect();

        let statistic = match self.options.strategy {
            Strategy::Mean => stats::mean(&values),
            Strategy::Median => stats::median(&values),
        };

        if !statistic.is_finite() {
            let fallback = self.options.all_missing_fallback;
            let warning = ImputeWarning::NoNumericValues {
                column: name.to_string(),
                fallback,
            };
            warn!("{}", warning);
            return ColumnPlan {
                replacement: self.format_number(fallback),
                statistic: None,
                warning: Some(warning),
            };
        }

        ColumnPlan {
            replacement: self.format_number(statistic),
            statistic: Some(statistic),
            warning: None,
        }
    }

    fn fill(&self, cells: &[&str], replacement: &str) -> Vec<String> {
        cells
            .iter()
            .map(|cell| {
                if self.options.sentinels.is_missing(cell) {
                    replacement.to_string()
                } else {
                    cell.to_string()
                }
            })
            .collect()
    }

    fn format_number(&self, value: f64) -> String {
        format!("{:.*}", self.options.precision, value)
    }
}

impl Default for Imputer {
    fn default() -> Self {
        Self::resolved(ImputeOptions::default(), None)
    }
}

/// Impute a row-shaped table with default options and a named strategy
pub fn impute_missing(table: &Table, strategy: &str) -> Imputation<Table> {
    let (strategy, notice) = Strategy::resolve(strategy);
    let options = ImputeOptions {
        strategy,
        ..ImputeOptions::default()
    };
    Imputer::resolved(options, notice).impute(table)
}
