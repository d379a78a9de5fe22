use thiserror::Error;

/// Top-level error type for the Folio workspace.
///
/// Library crates define their own error types and implement
/// `From<FolioError>` so that `?` works across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FolioError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for FolioError {
    fn from(err: toml::de::Error) -> Self {
        FolioError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for FolioError {
    fn from(err: toml::ser::Error) -> Self {
        FolioError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for FolioError {
    fn from(err: serde_json::Error) -> Self {
        FolioError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Folio operations.
pub type Result<T> = std::result::Result<T, FolioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FolioError::Config("missing field".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing field");

        let err = FolioError::Serialization("bad float".to_string());
        assert_eq!(err.to_string(), "Serialization error: bad float");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: FolioError = io_err.into();
        assert!(matches!(err, FolioError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("not = [valid").unwrap_err();
        let err: FolioError = toml_err.into();
        assert!(matches!(err, FolioError::Config(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: FolioError = json_err.into();
        assert!(matches!(err, FolioError::Serialization(_)));
    }
}
