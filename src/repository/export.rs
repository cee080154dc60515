//! File-based export sink.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde_json::Value;

use crate::domain::types::ExportFormat;
use crate::repository::ExportSink;

#[derive(Debug, thiserror::Error)]
enum ExportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Writes exported rows into `{dir}/{stem}-{timestamp}.{ext}`.
#[derive(Clone, Debug)]
pub struct FileExportSink {
    dir: PathBuf,
    stem: String,
}

impl FileExportSink {
    pub fn new(dir: impl Into<PathBuf>, stem: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            stem: stem.into(),
        }
    }

    fn target(&self, format: ExportFormat) -> PathBuf {
        let stamp = Local::now().format("%Y%m%d-%H%M%S%.3f");
        self.dir
            .join(format!("{}-{stamp}.{}", self.stem, format.extension()))
    }

    fn write(&self, format: ExportFormat, rows: &[Value]) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.target(format);
        match format {
            ExportFormat::Csv => write_csv(&path, rows)?,
            ExportFormat::Json => fs::write(&path, serde_json::to_vec_pretty(rows)?)?,
        }
        Ok(path)
    }
}

impl ExportSink for FileExportSink {
    fn export_data(&self, format: &str, rows: &[Value]) {
        let format = match format.parse::<ExportFormat>() {
            Ok(format) => format,
            Err(err) => {
                log::error!("Skipping export of {}: {err}", self.stem);
                return;
            }
        };

        match self.write(format, rows) {
            Ok(path) => log::info!("Exported {} rows to {}", rows.len(), path.display()),
            Err(err) => log::error!("Failed to export {}: {err}", self.stem),
        }
    }
}

/// Column order is the order in which fields first appear across the rows.
fn csv_headers(rows: &[Value]) -> Vec<String> {
    let mut headers: Vec<String> = Vec::new();
    for row in rows {
        if let Value::Object(fields) = row {
            for key in fields.keys() {
                if !headers.iter().any(|h| h == key) {
                    headers.push(key.clone());
                }
            }
        }
    }
    headers
}

fn csv_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn write_csv(path: &Path, rows: &[Value]) -> Result<(), ExportError> {
    let headers = csv_headers(rows);
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&headers)?;

    for row in rows {
        let record: Vec<String> = headers.iter().map(|h| csv_cell(row.get(h))).collect();
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}
