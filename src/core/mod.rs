pub mod aggregator;
pub mod classifier;
pub mod etl;
pub mod pipeline;
pub mod pivot;

pub use crate::domain::model::{Record, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, RowSource, SheetSink};
pub use crate::utils::error::Result;
