//! Error Handling Module
//!
//! Defines the error taxonomy for the decision-support core.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

/// Main error type for AgriSense operations
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or missing numeric input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Input bytes could not be decoded as an image
    #[error("Failed to decode image: {0}")]
    ImageDecode(String),

    /// Crop name absent from the fertilizer reference table
    #[error("Unknown crop: '{0}'")]
    UnknownCrop(String),

    /// No image file was provided with the request
    #[error("No image file provided")]
    NoFileProvided,

    /// A model or knowledge-table artifact could not be loaded (startup only)
    #[error("Failed to load artifact: {0}")]
    ModelLoad(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal invariant violation
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Stable machine-readable kind, used in structured failure responses.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::InvalidInput(_) => "invalid_input",
            Error::ImageDecode(_) => "image_decode",
            Error::UnknownCrop(_) => "unknown_crop",
            Error::NoFileProvided => "no_file",
            Error::ModelLoad(_) => "model_load",
            Error::Io(_) => "io",
            Error::Internal(_) => "internal",
        }
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::ImageDecode(err.to_string())
    }
}

// Knowledge tables are only deserialized during startup, so a JSON
// failure is always an artifact-load failure.
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ModelLoad(err.to_string())
    }
}

/// Convenience Result type for AgriSense operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownCrop("unobtainium".to_string());
        assert_eq!(format!("{}", err), "Unknown crop: 'unobtainium'");
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(Error::NoFileProvided.kind(), "no_file");
        assert_eq!(Error::InvalidInput("x".into()).kind(), "invalid_input");
        assert_eq!(Error::ModelLoad("x".into()).kind(), "model_load");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
