use crate::core::Pipeline;
use crate::domain::model::Category;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub output_path: String,
    pub record_count: usize,
    /// Zone columns written per category, in sheet order.
    pub zone_counts: Vec<(Category, usize)>,
}

/// Drives a pipeline through extract, transform and load. Any phase error
/// aborts the run; nothing is written unless all three grids exist.
pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!("Starting zone pivot run");

        // Extract
        let records = self.pipeline.extract().await?;
        tracing::info!("Classified {} countries", records.len());
        self.monitor.finish_phase("extract");

        // Transform
        let result = self.pipeline.transform(records).await?;
        let record_count = result.record_count;
        let zone_counts: Vec<(Category, usize)> = result
            .sheets
            .iter()
            .map(|sheet| (sheet.category, sheet.grid.width()))
            .collect();
        for (category, zones) in &zone_counts {
            tracing::info!("{}: {} zones", category, zones);
        }
        self.monitor.finish_phase("transform");

        // Load
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Output saved to: {}", output_path);
        self.monitor.finish_phase("load");
        self.monitor.log_final_stats();

        Ok(RunSummary {
            output_path,
            record_count,
            zone_counts,
        })
    }
}
