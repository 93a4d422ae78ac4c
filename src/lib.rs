pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{InputSource, XlsxSheetSink};
pub use config::{settings::Settings, toml_config::TomlConfig};
pub use self::core::{
    etl::{EtlEngine, RunSummary},
    pipeline::ZonePipeline,
};
pub use domain::model::{Category, PivotGrid, Record, ZoneMap, ZoneOverflow};
pub use utils::error::{EtlError, Result};
