use crate::domain::model::{Category, CategorySheet, RawRow, Record, TransformResult, ZoneOverflow};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Tabular input: the whole table is loaded before classification starts.
pub trait RowSource: Send + Sync {
    fn read_rows(&self) -> impl std::future::Future<Output = Result<Vec<RawRow>>> + Send;

    /// Human-readable location used in logs.
    fn describe(&self) -> String;
}

/// Persists the category sheets as one spreadsheet artifact and returns its location.
pub trait SheetSink: Send + Sync {
    fn write_sheets(
        &self,
        sheets: &[CategorySheet],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn output_path(&self) -> &str;
    fn comment_marker(&self) -> &str;
    fn zone_overflow(&self) -> ZoneOverflow;
    fn sheet_name(&self, category: Category) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Record>>;
    async fn transform(&self, data: Vec<Record>) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
