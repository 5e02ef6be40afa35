//! Delimited-text export of data tables through Polars' CSV writer

use super::dataframe::to_dataframe;
use crate::app::models::DataTable;
use crate::constants::DEFAULT_CSV_SEPARATOR;
use crate::{Error, Result};
use polars::prelude::{CsvWriter, SerWriter};
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Writes data tables as CSV/TSV with a header row
#[derive(Debug, Clone, Copy)]
pub struct CsvExporter {
    separator: u8,
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new(DEFAULT_CSV_SEPARATOR)
    }
}

impl CsvExporter {
    pub fn new(separator: u8) -> Self {
        Self { separator }
    }

    /// Tab-separated exporter
    pub fn tsv() -> Self {
        Self::new(b'\t')
    }

    /// Write `table` to any writer
    pub fn write<W: Write>(&self, table: &DataTable, writer: W) -> Result<()> {
        let mut df = to_dataframe(table)?;
        CsvWriter::new(writer)
            .include_header(true)
            .with_separator(self.separator)
            .finish(&mut df)?;
        Ok(())
    }

    /// Write `table` to a file, creating parent directories as needed
    pub fn write_file(&self, table: &DataTable, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::io(format!("Failed to create directory {}", parent.display()), e)
            })?;
        }

        let file = std::fs::File::create(path)
            .map_err(|e| Error::io(format!("Failed to create {}", path.display()), e))?;
        self.write(table, std::io::BufWriter::new(file))?;

        debug!("Wrote {} rows to {}", table.len(), path.display());
        Ok(())
    }

    /// Render `table` as a string
    pub fn to_string(&self, table: &DataTable) -> Result<String> {
        let mut buffer = Vec::new();
        self.write(table, &mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| Error::export("CSV output is not valid UTF-8", Box::new(e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::{DataRow, DataValue};
    use tempfile::TempDir;

    fn table() -> DataTable {
        DataTable {
            dimension_names: vec!["sex".to_string()],
            rows: vec![
                DataRow {
                    members: vec!["Men".to_string()],
                    value: DataValue::Raw("10".to_string()),
                },
                DataRow {
                    members: vec!["Women".to_string()],
                    value: DataValue::Missing,
                },
            ],
        }
    }

    #[test]
    fn test_csv_output() {
        let csv = CsvExporter::default().to_string(&table()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "sex,DATA");
        assert_eq!(lines[1], "Men,10");
        assert!(lines[2].starts_with("Women,"));
    }

    #[test]
    fn test_tsv_output() {
        let tsv = CsvExporter::tsv().to_string(&table()).unwrap();
        assert!(tsv.starts_with("sex\tDATA"));
    }

    #[test]
    fn test_write_file_creates_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("out.csv");

        CsvExporter::default().write_file(&table(), &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Men,10"));
    }
}
