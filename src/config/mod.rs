pub mod settings;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::model::ZoneOverflow;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use settings::Settings;

/// Paths missing here and in the config file are prompted for interactively.
#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "zone-pivot")]
#[command(about = "Regroups a shipping-zone table into Express, Standard and Expedited pivot sheets")]
pub struct CliConfig {
    /// Input zone table (xlsx, xlsm, xls, ods or csv)
    #[arg(short, long)]
    pub input: Option<String>,

    /// Output workbook (xlsx)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Input worksheet name (defaults to the first sheet)
    #[arg(long)]
    pub sheet: Option<String>,

    /// Rows whose name contains this marker are skipped
    #[arg(long)]
    pub comment_marker: Option<String>,

    /// What to do with zone IDs outside the 16-bit range
    #[arg(long, value_enum)]
    pub zone_overflow: Option<ZoneOverflow>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log per-phase timing and memory usage")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn apply_overrides(&self, mut settings: Settings) -> Settings {
        if let Some(sheet) = &self.sheet {
            settings.sheet = Some(sheet.clone());
        }
        if let Some(marker) = &self.comment_marker {
            settings.comment_marker = marker.clone();
        }
        if let Some(overflow) = self.zone_overflow {
            settings.zone_overflow = overflow;
        }
        settings.monitor |= self.monitor;
        settings
    }
}
