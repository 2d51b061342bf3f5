//! Row-shaped and column-typed table representations.
//!
//! [`Table`] is what the readers produce: rows of text cells with an optional
//! header. [`ColumnarTable`] is the typed-column view of the same data, where
//! each column carries a name and a [`ColumnKind`] tag.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::inference::classify_column;
use crate::missing::MissingSentinels;
use crate::types::{ColumnKind, Result};

/// Positional name for a column without a header (`column_1` for index 0)
pub fn default_column_name(index: usize) -> String {
    format!("column_{}", index + 1)
}

/// Make column names unique, keeping the first occurrence and suffixing later
/// ones `_2`, `_3`, ... (`a, a, b` becomes `a, a_2, b`)
pub fn unique_names(names: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(names.len());
    names
        .into_iter()
        .map(|name| {
            let mut candidate = name.clone();
            let mut n = 2;
            while seen.contains(&candidate) {
                candidate = format!("{name}_{n}");
                n += 1;
            }
            seen.insert(candidate.clone());
            candidate
        })
        .collect()
}

/// A rectangular grid of text cells.
///
/// Only constructed through [`Table::new`] and friends, so every row has the
/// table's width. Deserializing goes through the same check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTable")]
pub struct Table {
    header: Option<Vec<String>>,
    rows: Vec<Vec<String>>,
}

#[derive(Deserialize)]
struct RawTable {
    header: Option<Vec<String>>,
    rows: Vec<Vec<String>>,
}

impl TryFrom<RawTable> for Table {
    type Error = Error;

    fn try_from(raw: RawTable) -> Result<Self> {
        Self::new(raw.header, raw.rows)
    }
}

impl Table {
    /// Create a table, checking that every row has the same width as the
    /// header (or the first row when there is no header).
    pub fn new(header: Option<Vec<String>>, rows: Vec<Vec<String>>) -> Result<Self> {
        let expected = match (&header, rows.first()) {
            (Some(h), _) => h.len(),
            (None, Some(first)) => first.len(),
            (None, None) => 0,
        };

        for (idx, row) in rows.iter().enumerate() {
            if row.len() != expected {
                return Err(Error::RaggedRow {
                    row: idx + 1,
                    expected,
                    found: row.len(),
                });
            }
        }

        Ok(Self { header, rows })
    }

    /// Create a header-less table from anything that yields rows of strings
    pub fn from_rows<R, S>(rows: impl IntoIterator<Item = R>) -> Result<Self>
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows = rows
            .into_iter()
            .map(|r| r.into_iter().map(Into::into).collect())
            .collect();
        Self::new(None, rows)
    }

    /// Shape is already known to be valid
    pub(crate) fn from_parts(header: Option<Vec<String>>, rows: Vec<Vec<String>>) -> Self {
        Self { header, rows }
    }

    pub fn header(&self) -> Option<&[String]> {
        self.header.as_deref()
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        match (&self.header, self.rows.first()) {
            (Some(h), _) => h.len(),
            (None, Some(first)) => first.len(),
            (None, None) => 0,
        }
    }

    /// Cells of one column, top to bottom
    pub fn column(&self, index: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows.iter().map(move |row| row[index].as_str())
    }

    /// Header name of a column, or a positional name when there is no header
    pub fn column_name(&self, index: usize) -> String {
        self.header
            .as_ref()
            .and_then(|h| h.get(index))
            .cloned()
            .unwrap_or_else(|| default_column_name(index))
    }

    pub fn column_names(&self) -> Vec<String> {
        (0..self.width()).map(|i| self.column_name(i)).collect()
    }

    /// Build the typed-column view, tagging each column by inspecting its cells.
    ///
    /// Repeated header names are made unique with [`unique_names`].
    pub fn to_columnar(
        &self,
        sentinels: &MissingSentinels,
        numeric_threshold: f64,
    ) -> ColumnarTable {
        let columns = unique_names(self.column_names())
            .into_iter()
            .enumerate()
            .map(|(idx, name)| {
                let cells: Vec<String> = self.column(idx).map(str::to_string).collect();
                let kind = classify_column(
                    cells.iter().map(String::as_str),
                    sentinels,
                    numeric_threshold,
                );
                Column::new(name, kind, cells)
            })
            .collect();
        ColumnarTable {
            columns,
            row_count: self.row_count(),
        }
    }
}

/// One typed column of a [`ColumnarTable`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
    pub cells: Vec<String>,
}

impl Column {
    pub fn new(name: impl Into<String>, kind: ColumnKind, cells: Vec<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            cells,
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Column-typed table: uniquely named columns of equal length, each with a
/// type tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawColumnarTable")]
pub struct ColumnarTable {
    columns: Vec<Column>,
    row_count: usize,
}

#[derive(Deserialize)]
struct RawColumnarTable {
    columns: Vec<Column>,
}

impl TryFrom<RawColumnarTable> for ColumnarTable {
    type Error = Error;

    fn try_from(raw: RawColumnarTable) -> Result<Self> {
        Self::new(raw.columns)
    }
}

impl ColumnarTable {
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let row_count = columns.first().map_or(0, Column::len);
        let mut names = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !names.insert(column.name.as_str()) {
                return Err(Error::InvalidInput(format!(
                    "Duplicate column name '{}'",
                    column.name
                )));
            }
            if column.len() != row_count {
                return Err(Error::InvalidInput(format!(
                    "Column '{}' has {} cells, expected {}",
                    column.name,
                    column.len(),
                    row_count
                )));
            }
        }
        Ok(Self { columns, row_count })
    }

    pub(crate) fn from_parts(columns: Vec<Column>, row_count: usize) -> Self {
        Self { columns, row_count }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Back to a row-shaped table whose header is the column names
    pub fn to_table(&self) -> Table {
        let header = self.columns.iter().map(|c| c.name.clone()).collect();
        let rows = (0..self.row_count)
            .map(|r| self.columns.iter().map(|c| c.cells[r].clone()).collect())
            .collect();
        Table::from_parts(Some(header), rows)
    }
}
