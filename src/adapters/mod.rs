// Adapters layer: 外部檔案格式的具體實作 (試算表、CSV 讀取與 xlsx 輸出)

pub mod csv_source;
pub mod spreadsheet;
pub mod xlsx_sink;

pub use csv_source::CsvSource;
pub use spreadsheet::SpreadsheetSource;
pub use xlsx_sink::XlsxSheetSink;

use crate::core::RowSource;
use crate::domain::model::RawRow;
use crate::utils::error::Result;
use std::path::Path;

/// Input chosen by file extension.
#[derive(Debug, Clone)]
pub enum InputSource {
    Spreadsheet(SpreadsheetSource),
    Csv(CsvSource),
}

impl InputSource {
    /// `.csv` files are read as CSV; anything else goes through the
    /// spreadsheet reader, which detects the workbook format itself.
    pub fn for_path(path: impl AsRef<Path>, sheet: Option<String>) -> Self {
        let path = path.as_ref();
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

        if is_csv {
            if sheet.is_some() {
                tracing::warn!("Ignoring sheet name for CSV input {}", path.display());
            }
            InputSource::Csv(CsvSource::new(path))
        } else {
            InputSource::Spreadsheet(SpreadsheetSource::new(path, sheet))
        }
    }
}

impl RowSource for InputSource {
    async fn read_rows(&self) -> Result<Vec<RawRow>> {
        match self {
            InputSource::Spreadsheet(source) => source.read_rows().await,
            InputSource::Csv(source) => source.read_rows().await,
        }
    }

    fn describe(&self) -> String {
        match self {
            InputSource::Spreadsheet(source) => source.describe(),
            InputSource::Csv(source) => source.describe(),
        }
    }
}
