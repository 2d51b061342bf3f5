use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::table::Table;
use crate::types::Result;

/// Write a table as CSV, header first when it has one
pub fn write_table_csv<W: Write>(table: &Table, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    if let Some(header) = table.header() {
        csv_writer.write_record(header)?;
    }
    for row in table.rows() {
        csv_writer.write_record(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write a table to a CSV file
pub fn write_table_file(table: &Table, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_table_csv(table, std::io::BufWriter::new(file))
}

/// Write a table to stdout
pub fn write_table_stdout(table: &Table) -> Result<()> {
    let stdout = std::io::stdout();
    write_table_csv(table, stdout.lock())
}

/// Write a report to a JSON file
pub fn write_json_file<T: Serialize>(report: &T, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    let writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(writer, report)?;
    Ok(())
}

/// Write a report to a JSON string
pub fn to_json_string<T: Serialize>(report: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Write a report to stdout
pub fn write_json_stdout<T: Serialize>(report: &T) -> Result<()> {
    let json = to_json_string(report)?;
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{}", json)?;
    Ok(())
}
