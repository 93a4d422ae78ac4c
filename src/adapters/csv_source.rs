use crate::core::RowSource;
use crate::domain::model::{RawCell, RawRow};
use crate::utils::error::{EtlError, Result};
use std::path::PathBuf;

/// Headerless CSV export of the zone table. Rows may have differing lengths.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load_rows(&self) -> Result<Vec<RawRow>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| self.read_error(e))?;

        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record.map_err(|e| self.read_error(e))?;
            // csv 會略過空白行，列號以檔案行號為準
            let line = record
                .position()
                .map(|position| position.line() as usize)
                .unwrap_or(index + 1);
            let cells = record.iter().map(parse_field).collect();
            rows.push(RawRow::new(line, cells));
        }

        Ok(rows)
    }

    fn read_error(&self, message: impl std::fmt::Display) -> EtlError {
        EtlError::ReadError {
            path: self.path.display().to_string(),
            message: message.to_string(),
        }
    }
}

impl RowSource for CsvSource {
    async fn read_rows(&self) -> Result<Vec<RawRow>> {
        self.load_rows()
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Blank fields are empty cells, finite numbers are numeric, everything else is text.
fn parse_field(field: &str) -> RawCell {
    if field.is_empty() {
        return RawCell::Empty;
    }
    match field.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => RawCell::Number(value),
        _ => RawCell::Text(field.to_string()),
    }
}
