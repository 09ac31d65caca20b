use thiserror::Error;

#[derive(Error, Debug)]
pub enum CensusError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("Input file not found: {path}")]
    InputNotFound { path: String },

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
    Io,
    Configuration,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    High,
    Critical,
}

impl CensusError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CensusError::IoError(_) | CensusError::InputNotFound { .. } => ErrorCategory::Io,
            CensusError::TomlParseError(_)
            | CensusError::InvalidConfigValueError { .. }
            | CensusError::MissingConfigError { .. } => ErrorCategory::Configuration,
            CensusError::CsvError(_) | CensusError::SerializationError(_) => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CensusError::InputNotFound { .. }
            | CensusError::TomlParseError(_)
            | CensusError::InvalidConfigValueError { .. }
            | CensusError::MissingConfigError { .. }
            | CensusError::CsvError(_)
            | CensusError::SerializationError(_) => ErrorSeverity::High,
            CensusError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            CensusError::InputNotFound { path } => {
                format!("Check that '{}' exists or pass another file with --input", path)
            }
            CensusError::IoError(_) => {
                "Check file permissions and available disk space".to_string()
            }
            CensusError::TomlParseError(_) => {
                "Make sure the configuration file is valid TOML".to_string()
            }
            CensusError::InvalidConfigValueError { .. }
            | CensusError::MissingConfigError { .. } => {
                "Review the configuration values and try again".to_string()
            }
            CensusError::CsvError(_) | CensusError::SerializationError(_) => {
                "Check that the output directory is writable".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CensusError::InputNotFound { path } => format!("Cannot open census file '{}'", path),
            CensusError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            CensusError::MissingConfigError { field } => {
                format!("Missing required setting '{}'", field)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CensusError>;
