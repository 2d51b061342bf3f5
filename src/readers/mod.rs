pub mod csv;
pub mod json;
pub mod xml;

use std::path::Path;

use crate::table::Table;
use crate::types::{FileFormat, ReadOptions, Result};

/// Common trait for flat-file table readers
pub trait TableReader {
    /// Read the whole file into a rectangular table
    fn read(&mut self, options: &ReadOptions) -> Result<Table>;
}

/// Work out a file's format from its extension
pub fn detect_format(path: &Path) -> Result<FileFormat> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");

    FileFormat::from_extension(ext).ok_or_else(|| {
        crate::error::Error::UnsupportedFormat(format!(
            "Unsupported file extension: .{}",
            ext
        ))
    })
}

/// Create a reader for the given file path
pub fn create_reader(path: &Path) -> Result<Box<dyn TableReader>> {
    match detect_format(path)? {
        FileFormat::Csv => Ok(Box::new(csv::CsvReader::new(path)?)),
        FileFormat::Tsv => Ok(Box::new(csv::CsvReader::new_tsv(path)?)),
        FileFormat::Json => Ok(Box::new(json::JsonReader::new(path)?)),
        FileFormat::Xml => Ok(Box::new(xml::XmlReader::new(path)?)),
    }
}

/// Read a table from any supported file
pub fn read_table(path: &Path, options: &ReadOptions) -> Result<Table> {
    let mut reader = create_reader(path)?;
    reader.read(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_create_reader_unsupported() {
        let file = NamedTempFile::with_suffix(".xlsx").unwrap();
        let result = create_reader(file.path());
        assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
    }

    #[test]
    fn test_read_table_dispatches_on_extension() {
        let mut file = NamedTempFile::with_suffix(".tsv").unwrap();
        write!(file, "a\tb\n1\t\n").unwrap();

        let table = read_table(file.path(), &ReadOptions::default()).unwrap();
        assert_eq!(table.header().unwrap(), ["a", "b"]);
        assert_eq!(table.rows()[0], vec!["1", ""]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = read_table(Path::new("/nonexistent/data.csv"), &ReadOptions::default());
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
