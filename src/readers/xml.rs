use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::{debug, info};

use crate::error::Error;
use crate::table::Table;
use crate::types::{ReadOptions, Result};

use super::TableReader;

/// Reader for record-oriented XML:
///
/// ```xml
/// <rows>
///   <row><id>1</id><name>Alice</name></row>
///   <row><id>2</id><name/></row>
/// </rows>
/// ```
///
/// Each child of the root is a record and each child of a record is a field.
/// Column order follows the fields of the first record that has any; records
/// with no fields become rows of empty cells.
pub struct XmlReader {
    path: PathBuf,
}

impl XmlReader {
    pub fn new(path: &Path) -> Result<Self> {
        Ok(Self {
            path: path.to_path_buf(),
        })
    }
}

impl TableReader for XmlReader {
    fn read(&mut self, options: &ReadOptions) -> Result<Table> {
        let content = fs::read_to_string(&self.path)?;
        let table = parse_records(&content, options)?;

        info!(
            path = %self.path.display(),
            rows = table.row_count(),
            "Read XML file"
        );

        Ok(table)
    }
}

/// Element depths: 1 is the root, 2 a record, 3 a field
const RECORD_DEPTH: usize = 2;
const FIELD_DEPTH: usize = 3;

/// Turn an XML document into a table
pub fn parse_records(content: &str, options: &ReadOptions) -> Result<Table> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut records: Vec<IndexMap<String, String>> = Vec::new();
    let mut record: IndexMap<String, String> = IndexMap::new();
    let mut field: Option<(String, String)> = None;
    let mut depth = 0usize;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                depth += 1;
                if depth == FIELD_DEPTH {
                    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                    field = Some((name, String::new()));
                }
            }
            Event::Empty(e) => {
                if depth + 1 == FIELD_DEPTH {
                    let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                    record.entry(name).or_default();
                } else if depth + 1 == RECORD_DEPTH {
                    records.push(IndexMap::new());
                }
            }
            Event::Text(t) => {
                if let Some((_, value)) = field.as_mut() {
                    value.push_str(&t.unescape()?);
                }
            }
            Event::CData(c) => {
                if let Some((_, value)) = field.as_mut() {
                    value.push_str(&String::from_utf8_lossy(&c.into_inner()));
                }
            }
            Event::End(_) => {
                if depth == FIELD_DEPTH {
                    if let Some((name, value)) = field.take() {
                        record.insert(name, value);
                    }
                } else if depth == RECORD_DEPTH {
                    records.push(std::mem::take(&mut record));
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if records.is_empty() {
        return Err(Error::EmptyData("no XML records".to_string()));
    }
    let headers: Vec<String> = match records.iter().find(|r| !r.is_empty()) {
        Some(first) => first.keys().cloned().collect(),
        None => return Err(Error::EmptyData("XML records have no fields".to_string())),
    };

    let mut rows = Vec::with_capacity(records.len());
    for (idx, fields) in records.iter().enumerate() {
        for extra in fields.keys().filter(|k| !headers.contains(k)) {
            debug!(record = idx + 1, field = %extra, "Ignoring field not in header record");
        }
        let row = headers
            .iter()
            .map(|key| fields.get(key).cloned().unwrap_or_default())
            .collect();
        rows.push(row);
    }

    let header = options.has_header.then_some(headers);
    Table::new(header, rows)
}
