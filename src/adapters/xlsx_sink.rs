use crate::core::SheetSink;
use crate::domain::model::CategorySheet;
use crate::utils::error::{EtlError, Result};
use rust_xlsxwriter::{Format, Workbook};
use std::path::PathBuf;

/// Writes every category sheet into a single xlsx workbook.
#[derive(Debug, Clone)]
pub struct XlsxSheetSink {
    path: PathBuf,
    bold_header: bool,
}

impl XlsxSheetSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            bold_header: true,
        }
    }

    pub fn with_bold_header(mut self, bold_header: bool) -> Self {
        self.bold_header = bold_header;
        self
    }

    /// Grid column `c`, row `r` lands in cell `(r, c)`; missing cells stay blank.
    pub fn build_workbook(&self, sheets: &[CategorySheet]) -> Result<Workbook> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();

        for sheet in sheets {
            let worksheet = workbook.add_worksheet();
            worksheet
                .set_name(&sheet.name)
                .map_err(|e| self.write_error(e))?;

            for (col, column) in sheet.grid.columns().iter().enumerate() {
                let col = u16::try_from(col).map_err(|_| {
                    self.write_error(format!("sheet '{}' has too many zone columns", sheet.name))
                })?;

                for (row, value) in column.iter().enumerate() {
                    let row = u32::try_from(row).map_err(|_| {
                        self.write_error(format!("sheet '{}' has too many rows", sheet.name))
                    })?;

                    let written = if row == 0 && self.bold_header {
                        worksheet.write_string_with_format(row, col, value, &header_format)
                    } else {
                        worksheet.write_string(row, col, value)
                    };
                    written.map_err(|e| self.write_error(e))?;
                }
            }

            tracing::debug!(
                "Sheet '{}': {} columns, {} rows",
                sheet.name,
                sheet.grid.width(),
                sheet.grid.height()
            );
        }

        Ok(workbook)
    }

    fn write_error(&self, message: impl std::fmt::Display) -> EtlError {
        EtlError::WriteError {
            path: self.path.display().to_string(),
            message: message.to_string(),
        }
    }
}

impl SheetSink for XlsxSheetSink {
    async fn write_sheets(&self, sheets: &[CategorySheet]) -> Result<String> {
        let mut workbook = self.build_workbook(sheets)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
        }

        workbook.save(&self.path).map_err(|e| self.write_error(e))?;
        tracing::debug!("Workbook saved to {}", self.path.display());

        Ok(self.path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Category, PivotGrid};
    use calamine::{open_workbook, Data, Reader, Xlsx};
    use tempfile::TempDir;

    fn sheet(category: Category, columns: &[&[&str]]) -> CategorySheet {
        CategorySheet {
            category,
            name: category.default_sheet_name().to_string(),
            grid: PivotGrid::new(
                columns
                    .iter()
                    .map(|column| column.iter().map(|cell| cell.to_string()).collect())
                    .collect(),
            ),
        }
    }

    #[tokio::test]
    async fn test_write_sheets_layout() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("pivot.xlsx");
        let sink = XlsxSheetSink::new(&path);

        let sheets = vec![
            sheet(Category::Express, &[&["1", "Alpha", "Bravo"], &["5", "Charlie"]]),
            sheet(Category::Standard, &[]),
        ];
        let written = sink.write_sheets(&sheets).await.unwrap();
        assert!(written.ends_with("pivot.xlsx"));

        let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
        assert_eq!(workbook.sheet_names(), vec!["Express".to_string(), "Standard".to_string()]);

        let range = workbook.worksheet_range("Express").unwrap();
        assert_eq!(range.get_value((0, 0)), Some(&Data::String("1".to_string())));
        assert_eq!(range.get_value((2, 0)), Some(&Data::String("Bravo".to_string())));
        assert_eq!(range.get_value((1, 1)), Some(&Data::String("Charlie".to_string())));
        assert!(matches!(range.get_value((2, 1)), None | Some(Data::Empty)));
    }

    #[tokio::test]
    async fn test_invalid_sheet_name_is_write_error() {
        let temp_dir = TempDir::new().unwrap();
        let sink = XlsxSheetSink::new(temp_dir.path().join("pivot.xlsx"));

        let mut bad = sheet(Category::Express, &[&["1", "Alpha"]]);
        bad.name = "Zones [draft]".to_string();

        let result = sink.write_sheets(&[bad]).await;
        assert!(matches!(result, Err(EtlError::WriteError { .. })));
        assert!(!temp_dir.path().join("pivot.xlsx").exists());
    }
}
