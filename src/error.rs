//! Error types for the season_colors library

use thiserror::Error;

/// Result type alias for season_colors operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Error taxonomy for palette analysis.
///
/// Every failure is surfaced as one of these variants; nothing is retried
/// internally and no partial verdict is ever returned alongside an error.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Byte stream could not be parsed as a supported image
    #[error("Failed to decode image: {message}")]
    DecodeError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Input is neither raw bytes, a readable file path nor valid base64
    #[error("Unsupported input: {message}")]
    UnsupportedInputError { message: String },

    /// Invalid parameter or degenerate input
    #[error("Invalid input: {parameter} = {value}")]
    InvalidInputError { parameter: String, value: String },

    /// Configuration file could not be read, parsed or written
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl AnalysisError {
    /// Create a decode error with context
    pub fn decode<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::DecodeError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an unsupported input error
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::UnsupportedInputError {
            message: message.into(),
        }
    }

    /// Create an invalid input error for a named parameter
    pub fn invalid(parameter: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidInputError {
            parameter: parameter.into(),
            value: value.to_string(),
        }
    }

    /// Create a configuration error with context
    pub fn config<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ConfigError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Stable taxonomy name, used in structured error reports
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::DecodeError { .. } => "DecodeError",
            AnalysisError::UnsupportedInputError { .. } => "UnsupportedInputError",
            AnalysisError::InvalidInputError { .. } => "InvalidInputError",
            AnalysisError::ConfigError { .. } => "ConfigError",
        }
    }

    /// Get user-friendly error description for application display
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::DecodeError { .. } => {
                "Could not read the picture. Please send a JPEG or PNG photo.".to_string()
            }
            AnalysisError::UnsupportedInputError { .. } => {
                "The image must be sent as raw bytes, a file path or a base64 string.".to_string()
            }
            AnalysisError::InvalidInputError { parameter, value } => {
                format!("The value {} is not valid for {}.", value, parameter)
            }
            AnalysisError::ConfigError { .. } => {
                "The analysis settings could not be loaded.".to_string()
            }
        }
    }
}
