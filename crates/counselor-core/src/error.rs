use thiserror::Error;

/// Top-level error type for the counselor client.
///
/// Subsystem crates define their own error types and convert into this one
/// where a failure has to cross a crate boundary.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CounselorError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for CounselorError {
    fn from(err: toml::de::Error) -> Self {
        CounselorError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for CounselorError {
    fn from(err: toml::ser::Error) -> Self {
        CounselorError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for CounselorError {
    fn from(err: serde_json::Error) -> Self {
        CounselorError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for counselor operations.
pub type Result<T> = std::result::Result<T, CounselorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CounselorError::Config("missing field".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing field");

        let err = CounselorError::Storage("disk full".to_string());
        assert_eq!(err.to_string(), "Storage error: disk full");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CounselorError = io_err.into();
        assert!(matches!(err, CounselorError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("[1,").unwrap_err();
        let err: CounselorError = json_err.into();
        assert!(matches!(err, CounselorError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("= broken").unwrap_err();
        let err: CounselorError = toml_err.into();
        assert!(matches!(err, CounselorError::Config(_)));
    }
}
