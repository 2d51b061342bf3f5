//! File-level detection and imputation runs, plus the JSON reports they
//! produce.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::info;

use crate::detect::{detect_missing, detect_missing_columns};
use crate::impute::{ColumnImputation, Imputer};
use crate::missing::MissingSentinels;
use crate::readers::{detect_format, read_table};
use crate::table::Table;
use crate::types::{
    FileFormat, ImputeOptions, ImputeWarning, ReadOptions, Result, DEFAULT_NUMERIC_THRESHOLD,
};

/// Missing count for one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnMissing {
    pub index: usize,
    pub name: String,
    pub missing: usize,
}

/// Source file details shared by both reports
#[derive(Debug, Clone, Serialize)]
pub struct SourceInfo {
    /// File name (without path)
    pub file_name: String,

    /// File hash (SHA-256)
    pub file_hash: String,

    pub format: FileFormat,

    /// Data rows read (header excluded)
    pub row_count: usize,
}

/// Result of scanning a file for missing values
#[derive(Debug, Clone, Serialize)]
pub struct DetectionReport {
    pub source: SourceInfo,
    pub columns: Vec<ColumnMissing>,
    pub total_missing: usize,
    pub sentinels: MissingSentinels,
    pub columnar: bool,
}

/// Summary of an imputation run
#[derive(Debug, Clone, Serialize)]
pub struct ImputationReport {
    pub source: SourceInfo,
    pub columns: Vec<ColumnImputation>,
    pub total_filled: usize,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ImputeWarning>,

    /// Options used
    pub options: ImputeOptions,
    pub columnar: bool,
}

/// Read a file and count missing values per column
pub fn detect_file(
    path: &Path,
    read_options: &ReadOptions,
    sentinels: &MissingSentinels,
    columnar: bool,
) -> Result<DetectionReport> {
    let (table, source) = load(path, read_options)?;

    let columns: Vec<ColumnMissing> = if columnar {
        // Typed view; the numeric threshold does not affect counting
        let view = table.to_columnar(sentinels, DEFAULT_NUMERIC_THRESHOLD);
        let counts = detect_missing_columns(&view, sentinels);
        view.columns()
            .iter()
            .enumerate()
            .map(|(index, column)| ColumnMissing {
                index,
                name: column.name.clone(),
                missing: counts.get(&column.name).copied().unwrap_or_default(),
            })
            .collect()
    } else {
        detect_missing(&table, sentinels)
            .into_iter()
            .enumerate()
            .map(|(index, missing)| ColumnMissing {
                index,
                name: table.column_name(index),
                missing,
            })
            .collect()
    };

    let total_missing: usize = columns.iter().map(|c| c.missing).sum();
    info!(file = %source.file_name, total_missing, "Detection complete");

    Ok(DetectionReport {
        source,
        columns,
        total_missing,
        sentinels: sentinels.clone(),
        columnar,
    })
}

/// Read a file and impute its missing values
pub fn impute_file(
    path: &Path,
    read_options: &ReadOptions,
    imputer: &Imputer,
    columnar: bool,
) -> Result<(Table, ImputationReport)> {
    let (table, source) = load(path, read_options)?;

    let (imputed, columns, warnings) = if columnar {
        let options = imputer.options();
        let view = table.to_columnar(&options.sentinels, options.numeric_threshold);
        let result = imputer.impute_columns(&view);
        (result.table.to_table(), result.columns, result.warnings)
    } else {
        let result = imputer.impute(&table);
        (result.table, result.columns, result.warnings)
    };

    let total_filled: usize = columns.iter().map(|c| c.filled).sum();
    info!(file = %source.file_name, total_filled, "Imputation complete");

    let report = ImputationReport {
        source,
        columns,
        total_filled,
        warnings,
        options: imputer.options().clone(),
        columnar,
    };

    Ok((imputed, report))
}

fn load(path: &Path, read_options: &ReadOptions) -> Result<(Table, SourceInfo)> {
    let format = detect_format(path)?;
    let table = read_table(path, read_options)?;

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string();

    let source = SourceInfo {
        file_name,
        file_hash: compute_file_hash(path)?,
        format,
        row_count: table.row_count(),
    };

    Ok((table, source))
}

/// Compute SHA-256 hash of a file (streaming to handle large files)
fn compute_file_hash(path: &Path) -> Result<String> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    let result = hasher.finalize();
    Ok(format!("{:x}", result))
}
