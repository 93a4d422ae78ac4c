use crate::config::toml_config::TomlConfig;
use crate::core::classifier::DEFAULT_COMMENT_MARKER;
use crate::core::ConfigProvider;
use crate::domain::model::{Category, ZoneOverflow};
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate};

pub const INPUT_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xls", "ods", "csv"];
pub const OUTPUT_EXTENSIONS: [&str; 1] = ["xlsx"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetNames {
    pub express: String,
    pub standard: String,
    pub expedited: String,
}

impl Default for SheetNames {
    fn default() -> Self {
        Self {
            express: Category::Express.default_sheet_name().to_string(),
            standard: Category::Standard.default_sheet_name().to_string(),
            expedited: Category::Expedited.default_sheet_name().to_string(),
        }
    }
}

impl SheetNames {
    pub fn get(&self, category: Category) -> &str {
        match category {
            Category::Express => &self.express,
            Category::Standard => &self.standard,
            Category::Expedited => &self.expedited,
        }
    }
}

/// Rejects a path left blank at the interactive prompt.
pub fn require_path(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(EtlError::MissingConfigError {
            field: field.to_string(),
        });
    }
    Ok(value.to_string())
}

/// Fully resolved run settings: file values first, command-line overrides on top.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub input_path: String,
    pub output_path: String,
    /// Input worksheet; the first one when unset.
    pub sheet: Option<String>,
    pub comment_marker: String,
    pub zone_overflow: ZoneOverflow,
    pub bold_header: bool,
    pub sheet_names: SheetNames,
    pub monitor: bool,
}

impl Settings {
    pub fn new(input_path: impl Into<String>, output_path: impl Into<String>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            sheet: None,
            comment_marker: DEFAULT_COMMENT_MARKER.to_string(),
            zone_overflow: ZoneOverflow::default(),
            bold_header: true,
            sheet_names: SheetNames::default(),
            monitor: false,
        }
    }

    /// Applies everything from the file except the paths, which the caller
    /// resolves itself.
    pub fn with_file_config(mut self, config: Option<&TomlConfig>) -> Self {
        let Some(config) = config else {
            return self;
        };

        if let Some(sheet) = &config.input.sheet {
            self.sheet = Some(sheet.clone());
        }
        if let Some(marker) = &config.input.comment_marker {
            self.comment_marker = marker.clone();
        }
        if let Some(overflow) = config.zones.overflow {
            self.zone_overflow = overflow;
        }
        if let Some(bold) = config.output.bold_header {
            self.bold_header = bold;
        }
        if let Some(name) = &config.output.express_sheet {
            self.sheet_names.express = name.clone();
        }
        if let Some(name) = &config.output.standard_sheet {
            self.sheet_names.standard = name.clone();
        }
        if let Some(name) = &config.output.expedited_sheet {
            self.sheet_names.expedited = name.clone();
        }
        self.monitor |= config.monitoring_enabled();
        self
    }
}

impl ConfigProvider for Settings {
    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn comment_marker(&self) -> &str {
        &self.comment_marker
    }

    fn zone_overflow(&self) -> ZoneOverflow {
        self.zone_overflow
    }

    fn sheet_name(&self, category: Category) -> &str {
        self.sheet_names.get(category)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input", &self.input_path)?;
        validation::validate_file_extension("input", &self.input_path, &INPUT_EXTENSIONS)?;
        validation::validate_path("output", &self.output_path)?;
        validation::validate_file_extension("output", &self.output_path, &OUTPUT_EXTENSIONS)?;

        if let Some(sheet) = &self.sheet {
            validation::validate_non_empty_string("input.sheet", sheet)?;
        }
        if self.comment_marker.is_empty() {
            return Err(EtlError::InvalidConfigValueError {
                field: "input.comment_marker".to_string(),
                value: String::new(),
                reason: "An empty marker would skip every row".to_string(),
            });
        }

        for category in Category::ALL {
            validation::validate_sheet_name(
                &format!("output.{}_sheet", category.default_sheet_name().to_lowercase()),
                self.sheet_names.get(category),
            )?;
        }
        let names = Category::ALL.map(|category| self.sheet_names.get(category));
        validation::validate_distinct_sheet_names("output", &names)?;

        Ok(())
    }
}
