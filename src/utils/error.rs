use crate::domain::model::Category;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Failed to read input '{path}': {message}")]
    ReadError { path: String, message: String },

    /// `row` is the 1-based sheet row, `column` the 0-based cell index.
    #[error("Row {row}, column {col}: {message}", col = .column + 1)]
    ParseError {
        row: usize,
        column: usize,
        message: String,
    },

    #[error("Failed to write output '{path}': {message}")]
    WriteError { path: String, message: String },

    #[error("Pivot task for {category} failed: {message}")]
    PivotTaskError { category: Category, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Data,
    Output,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ReadError { .. } => ErrorCategory::Input,
            EtlError::ParseError { .. } => ErrorCategory::Data,
            EtlError::WriteError { .. } => ErrorCategory::Output,
            EtlError::PivotTaskError { .. } => ErrorCategory::System,
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Output => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EtlError::ReadError { .. } => {
                "Check that the input file exists and is an xlsx, xls, ods or csv table".to_string()
            }
            EtlError::ParseError { row, column, .. } => format!(
                "Fix the cell in row {} column {} so it holds a numeric zone ID, or mark the row with the comment marker",
                row,
                column + 1
            ),
            EtlError::WriteError { .. } => {
                "Check that the output directory is writable and the file is not open in another program".to_string()
            }
            EtlError::PivotTaskError { .. } => "Re-run the tool; this is an internal failure".to_string(),
            EtlError::ConfigError { .. } | EtlError::ConfigValidationError { .. } => {
                "Check the configuration file syntax".to_string()
            }
            EtlError::InvalidConfigValueError { field, .. } => {
                format!("Correct the value of '{}'", field)
            }
            EtlError::MissingConfigError { field } => {
                format!("Provide '{}' on the command line or in the config file", field)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::ReadError { path, .. } => format!("Could not read the zone table '{}'", path),
            EtlError::ParseError { row, message, .. } => {
                format!("The zone table has an invalid row {}: {}", row, message)
            }
            EtlError::WriteError { path, .. } => format!("Could not save the result to '{}'", path),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
