//! Output projections of parsed documents
//!
//! - [`dataframe`] - Polars DataFrame with one column per dimension plus `DATA`
//! - [`csv_writer`] - CSV/TSV files through Polars' writer
//! - [`json_stat`] - JSON-Stat 2.0 dataset objects

pub mod csv_writer;
pub mod dataframe;
pub mod json_stat;

pub use csv_writer::CsvExporter;
pub use dataframe::to_dataframe;
pub use json_stat::to_json_stat;

use crate::app::models::ParsedPx;
use crate::config::{OutputConfig, OutputFormat};
use crate::{Error, Result};
use std::path::Path;

/// Write `parsed` to `path` in the configured format
pub fn write_output(parsed: &ParsedPx, path: &Path, config: &OutputConfig) -> Result<()> {
    if path.exists() && !config.force_overwrite {
        return Err(Error::configuration(format!(
            "Output file {} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    match config.format {
        OutputFormat::Csv | OutputFormat::Tsv => {
            CsvExporter::new(config.effective_separator()).write_file(&parsed.table, path)
        }
        OutputFormat::JsonStat => write_json(&to_json_stat(parsed), path),
        OutputFormat::Json => write_json(&serde_json::to_value(parsed)?, path),
    }
}

fn write_json(value: &serde_json::Value, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| Error::io(format!("Failed to create directory {}", parent.display()), e))?;
    }
    let file = std::fs::File::create(path)
        .map_err(|e| Error::io(format!("Failed to create {}", path.display()), e))?;
    serde_json::to_writer_pretty(std::io::BufWriter::new(file), value)?;
    Ok(())
}
