use crate::core::classifier::Classifier;
use crate::core::pivot::pivot_categories;
use crate::core::{ConfigProvider, Pipeline, Record, RowSource, SheetSink, TransformResult};
use crate::domain::model::{CategoryMaps, CategorySheet};
use crate::utils::error::Result;

/// Zone table pipeline: classify rows, group by zone, pivot per category.
pub struct ZonePipeline<R: RowSource, W: SheetSink, C: ConfigProvider> {
    source: R,
    sink: W,
    config: C,
    classifier: Classifier,
}

impl<R: RowSource, W: SheetSink, C: ConfigProvider> ZonePipeline<R, W, C> {
    pub fn new(source: R, sink: W, config: C) -> Self {
        let classifier = Classifier::new(config.comment_marker(), config.zone_overflow());
        Self {
            source,
            sink,
            config,
            classifier,
        }
    }
}

#[async_trait::async_trait]
impl<R: RowSource, W: SheetSink, C: ConfigProvider> Pipeline for ZonePipeline<R, W, C> {
    async fn extract(&self) -> Result<Vec<Record>> {
        tracing::info!("📥 Reading zone table from {}", self.source.describe());
        let rows = self.source.read_rows().await?;
        tracing::debug!("Loaded {} raw rows", rows.len());

        let classified = self.classifier.classify_rows(&rows)?;

        if classified.skipped > 0 {
            tracing::info!("Skipped {} annotation rows", classified.skipped);
        }
        match classified.terminated_at {
            Some(row) => tracing::debug!("End of data at row {}", row),
            None => tracing::debug!("No terminating row, read to end of sheet"),
        }

        Ok(classified.records)
    }

    async fn transform(&self, data: Vec<Record>) -> Result<TransformResult> {
        let maps = CategoryMaps::aggregate(&data);
        for (category, zones) in maps.zone_counts() {
            tracing::debug!("{}: {} zones", category, zones);
        }

        let sheets = pivot_categories(maps)
            .await?
            .into_iter()
            .map(|(category, grid)| CategorySheet {
                category,
                name: self.config.sheet_name(category).to_string(),
                grid,
            })
            .collect();

        Ok(TransformResult {
            record_count: data.len(),
            sheets,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        tracing::debug!(
            "Writing {} sheets to {}",
            result.sheets.len(),
            self.config.output_path()
        );
        self.sink.write_sheets(&result.sheets).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::Settings;
    use crate::domain::model::{Category, RawCell, RawRow};
    use crate::utils::error::EtlError;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    struct MockSource {
        rows: Vec<RawRow>,
    }

    impl MockSource {
        fn new(rows: Vec<Vec<RawCell>>) -> Self {
            Self {
                rows: rows
                    .into_iter()
                    .enumerate()
                    .map(|(index, cells)| RawRow::new(index + 1, cells))
                    .collect(),
            }
        }
    }

    impl RowSource for MockSource {
        async fn read_rows(&self) -> Result<Vec<RawRow>> {
            Ok(self.rows.clone())
        }

        fn describe(&self) -> String {
            "mock".to_string()
        }
    }

    #[derive(Clone, Default)]
    struct MockSink {
        written: Arc<Mutex<Vec<CategorySheet>>>,
    }

    impl SheetSink for MockSink {
        async fn write_sheets(&self, sheets: &[CategorySheet]) -> Result<String> {
            self.written.lock().await.extend_from_slice(sheets);
            Ok("memory".to_string())
        }
    }

    fn column(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    fn end_to_end_rows() -> Vec<Vec<RawCell>> {
        vec![
            vec!["USA".into(), 10.into(), 20.into(), RawCell::Empty],
            vec!["Canada".into(), 10.into(), RawCell::Empty, 20.into()],
            vec!["Mexico".into(), 10.into(), RawCell::Empty, RawCell::Empty],
            vec!["".into(), 0.into(), 0.into(), 0.into()],
        ]
    }

    #[tokio::test]
    async fn test_extract_classifies_until_terminator() {
        let pipeline = ZonePipeline::new(
            MockSource::new(end_to_end_rows()),
            MockSink::default(),
            Settings::new("in.xlsx", "out.xlsx"),
        );

        let records = pipeline.extract().await.unwrap();
        assert_eq!(
            records,
            vec![
                Record::standard("USA", 10, 20),
                Record::expedited("Canada", 10, 20),
                Record::express_only("Mexico", 10),
            ]
        );
    }

    #[tokio::test]
    async fn test_extract_fails_on_bad_zone() {
        let pipeline = ZonePipeline::new(
            MockSource::new(vec![
                vec!["USA".into(), 10.into()],
                vec!["Peru".into(), "x".into()],
            ]),
            MockSink::default(),
            Settings::new("in.xlsx", "out.xlsx"),
        );

        match pipeline.extract().await {
            Err(EtlError::ParseError { row, .. }) => assert_eq!(row, 2),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_transform_builds_three_sheets() {
        let pipeline = ZonePipeline::new(
            MockSource::new(end_to_end_rows()),
            MockSink::default(),
            Settings::new("in.xlsx", "out.xlsx"),
        );

        let records = pipeline.extract().await.unwrap();
        let result = pipeline.transform(records).await.unwrap();

        assert_eq!(result.record_count, 3);
        let names: Vec<&str> = result.sheets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Express", "Standard", "Expedited"]);
        assert_eq!(result.sheets[0].grid.columns(), &[column(&["10", "Canada", "Mexico", "USA"])]);
        assert_eq!(result.sheets[1].grid.columns(), &[column(&["20", "USA"])]);
        assert_eq!(result.sheets[2].grid.columns(), &[column(&["20", "Canada"])]);
    }

    #[tokio::test]
    async fn test_custom_sheet_names_and_marker() {
        let mut settings = Settings::new("in.xlsx", "out.xlsx");
        settings.comment_marker = "#".to_string();
        settings.sheet_names.express = "Express Saver".to_string();

        let sink = MockSink::default();
        let pipeline = ZonePipeline::new(
            MockSource::new(vec![
                vec!["# header".into(), "Express".into()],
                vec!["Spain".into(), 30.into(), 40.into()],
            ]),
            sink.clone(),
            settings,
        );

        let records = pipeline.extract().await.unwrap();
        let result = pipeline.transform(records).await.unwrap();
        let location = pipeline.load(result).await.unwrap();

        assert_eq!(location, "memory");
        let written = sink.written.lock().await;
        assert_eq!(written.len(), 3);
        assert_eq!(written[0].name, "Express Saver");
        assert_eq!(written[0].category, Category::Express);
        assert_eq!(written[1].grid.columns(), &[column(&["40", "Spain"])]);
    }
}
