use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::info;

use crate::error::Error;
use crate::table::Table;
use crate::types::{ReadOptions, Result};

use super::TableReader;

/// Reader for a JSON array of flat objects.
///
/// Column order follows the keys of the first object. Keys absent from a
/// later object, and explicit `null`s, become empty cells.
pub struct JsonReader {
    path: PathBuf,
}

impl JsonReader {
    pub fn new(path: &Path) -> Result<Self> {
        Ok(Self {
            path: path.to_path_buf(),
        })
    }
}

impl TableReader for JsonReader {
    fn read(&mut self, options: &ReadOptions) -> Result<Table> {
        let content = fs::read_to_string(&self.path)?;
        let table = parse_records(&content, options)?;

        info!(
            path = %self.path.display(),
            rows = table.row_count(),
            "Read JSON file"
        );

        Ok(table)
    }
}

/// Turn a JSON document into a table
pub fn parse_records(content: &str, options: &ReadOptions) -> Result<Table> {
    let document: Value = serde_json::from_str(content)?;

    let records = match document {
        Value::Array(records) => records,
        _ => {
            return Err(Error::InvalidInput(
                "expected a JSON array of objects".to_string(),
            ))
        }
    };

    let first = match records.first() {
        Some(Value::Object(first)) => first,
        Some(_) => {
            return Err(Error::InvalidInput(
                "record 1 is not a JSON object".to_string(),
            ))
        }
        None => return Err(Error::EmptyData("empty JSON array".to_string())),
    };
    let headers: Vec<String> = first.keys().cloned().collect();

    let mut rows = Vec::with_capacity(records.len());
    for (idx, record) in records.iter().enumerate() {
        let object = record.as_object().ok_or_else(|| {
            Error::InvalidInput(format!("record {} is not a JSON object", idx + 1))
        })?;

        let row = headers
            .iter()
            .map(|key| object.get(key).map(cell_text).unwrap_or_default())
            .collect();
        rows.push(row);
    }

    let header = options.has_header.then_some(headers);
    Table::new(header, rows)
}

/// Text form of a JSON value as a table cell
fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
