use crate::core::RowSource;
use crate::domain::model::{RawCell, RawRow};
use crate::utils::error::{EtlError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::PathBuf;

/// Reads one worksheet of an xlsx, xlsm, xls or ods workbook.
#[derive(Debug, Clone)]
pub struct SpreadsheetSource {
    path: PathBuf,
    sheet: Option<String>,
}

impl SpreadsheetSource {
    pub fn new(path: impl Into<PathBuf>, sheet: Option<String>) -> Self {
        Self {
            path: path.into(),
            sheet,
        }
    }

    pub fn load_rows(&self) -> Result<Vec<RawRow>> {
        let mut workbook = open_workbook_auto(&self.path).map_err(|e| self.read_error(e))?;
        let sheet_names = workbook.sheet_names();

        let sheet_name = match &self.sheet {
            Some(name) if sheet_names.iter().any(|candidate| candidate == name) => name.clone(),
            Some(name) => {
                return Err(self.read_error(format!(
                    "sheet '{}' not found (available: {})",
                    name,
                    sheet_names.join(", ")
                )))
            }
            None => sheet_names
                .first()
                .cloned()
                .ok_or_else(|| self.read_error("workbook contains no sheets"))?,
        };

        tracing::debug!("Reading sheet '{}' from {}", sheet_name, self.path.display());
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| self.read_error(e))?;

        // range 只涵蓋有資料的區塊，需補回前面的空欄與列號位移
        let Some((first_row, first_col)) = range.start() else {
            return Ok(Vec::new());
        };

        // 區塊內不存在的列 (全為 Empty) 直接略過，不視為結束列
        let rows = range
            .rows()
            .enumerate()
            .filter(|(_, row)| !row.iter().all(|cell| matches!(cell, Data::Empty)))
            .map(|(offset, row)| {
                let mut cells = vec![RawCell::Empty; first_col as usize];
                cells.extend(row.iter().map(convert_cell));
                RawRow::new(first_row as usize + offset + 1, cells)
            })
            .collect();

        Ok(rows)
    }

    fn read_error(&self, message: impl std::fmt::Display) -> EtlError {
        EtlError::ReadError {
            path: self.path.display().to_string(),
            message: message.to_string(),
        }
    }
}

impl RowSource for SpreadsheetSource {
    async fn read_rows(&self) -> Result<Vec<RawRow>> {
        self.load_rows()
    }

    fn describe(&self) -> String {
        match &self.sheet {
            Some(sheet) => format!("{} [{}]", self.path.display(), sheet),
            None => self.path.display().to_string(),
        }
    }
}

fn convert_cell(cell: &Data) -> RawCell {
    match cell {
        Data::Empty | Data::Error(_) => RawCell::Empty,
        Data::String(s) => RawCell::Text(s.clone()),
        Data::Float(f) => RawCell::Number(*f),
        Data::Int(i) => RawCell::Number(*i as f64),
        Data::Bool(b) => RawCell::Bool(*b),
        Data::DateTime(dt) => RawCell::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => RawCell::Text(s.clone()),
    }
}
