use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use csv::{Reader, ReaderBuilder};
use tracing::info;

use crate::error::Error;
use crate::table::Table;
use crate::types::{ReadOptions, Result};

use super::TableReader;

/// CSV/TSV file reader
pub struct CsvReader {
    path: PathBuf,
    delimiter: u8,
}

impl CsvReader {
    /// Create a new CSV reader
    pub fn new(path: &Path) -> Result<Self> {
        Ok(Self {
            path: path.to_path_buf(),
            delimiter: b',',
        })
    }

    /// Create a new TSV reader
    pub fn new_tsv(path: &Path) -> Result<Self> {
        Ok(Self {
            path: path.to_path_buf(),
            delimiter: b'\t',
        })
    }

    fn create_reader(&self) -> Result<Reader<BufReader<File>>> {
        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        // Header handling is ours; ragged rows are reported by Table::new
        let csv_reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);
        Ok(csv_reader)
    }
}

impl TableReader for CsvReader {
    fn read(&mut self, options: &ReadOptions) -> Result<Table> {
        let mut reader = self.create_reader()?;

        let mut records: Vec<Vec<String>> = Vec::new();
        for result in reader.records() {
            let record = result?;
            records.push(record.iter().map(|f| f.to_string()).collect());
        }

        let header = if options.has_header && !records.is_empty() {
            Some(records.remove(0))
        } else {
            None
        };

        if records.is_empty() {
            return Err(Error::EmptyData(format!(
                "no data rows in {}",
                self.path.display()
            )));
        }

        info!(
            path = %self.path.display(),
            rows = records.len(),
            "Read delimited file"
        );

        Table::new(header, records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(".csv").unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    const SAMPLE: &str = "ID,Name,Age,Salary\n1,Alice,25,50000\n2,Bob,,60000\n3,,30,70000\n4,David,40,\n5,Eve,35,80000\n";

    #[test]
    fn test_read_with_header() {
        let file = create_test_csv(SAMPLE);

        let mut reader = CsvReader::new(file.path()).unwrap();
        let table = reader.read(&ReadOptions { has_header: true }).unwrap();

        assert_eq!(table.row_count(), 5);
        assert_eq!(table.header().unwrap(), ["ID", "Name", "Age", "Salary"]);
        assert_eq!(table.rows()[1], vec!["2", "Bob", "", "60000"]);
    }

    #[test]
    fn test_read_without_header() {
        let file = create_test_csv(SAMPLE);

        let mut reader = CsvReader::new(file.path()).unwrap();
        let table = reader.read(&ReadOptions { has_header: false }).unwrap();

        assert_eq!(table.row_count(), 6);
        assert!(table.header().is_none());
        assert_eq!(table.rows()[0][0], "ID");
    }

    #[test]
    fn test_tsv_delimiter() {
        let mut file = NamedTempFile::with_suffix(".tsv").unwrap();
        write!(file, "a\tb\n1,5\t2\n").unwrap();

        let mut reader = CsvReader::new_tsv(file.path()).unwrap();
        let table = reader.read(&ReadOptions::default()).unwrap();

        assert_eq!(table.rows()[0], vec!["1,5", "2"]);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let file = create_test_csv("a,b\n1,2\n3\n");

        let mut reader = CsvReader::new(file.path()).unwrap();
        let result = reader.read(&ReadOptions::default());

        assert!(matches!(result, Err(Error::RaggedRow { row: 2, .. })));
    }

    #[test]
    fn test_empty_file_is_error() {
        let file = create_test_csv("");
        let mut reader = CsvReader::new(file.path()).unwrap();
        assert!(matches!(
            reader.read(&ReadOptions::default()),
            Err(Error::EmptyData(_))
        ));
    }

    #[test]
    fn test_header_only_is_error() {
        let file = create_test_csv("a,b\n");
        let mut reader = CsvReader::new(file.path()).unwrap();
        assert!(matches!(
            reader.read(&ReadOptions::default()),
            Err(Error::EmptyData(_))
        ));
    }

    #[test]
    fn test_quoted_null_is_kept_verbatim() {
        let file = create_test_csv("v\n\"NULL\"\n\" \"\n");
        let mut reader = CsvReader::new(file.path()).unwrap();
        let table = reader.read(&ReadOptions::default()).unwrap();

        assert_eq!(table.rows()[0][0], "NULL");
        assert_eq!(table.rows()[1][0], " ");
    }
}
