/// Structured error types for assetdeck-core.
///
/// Uses `thiserror` for better API surface and error composition.
/// The binary crate (assetdeck-tui) can still use `anyhow` for convenience,
/// but library consumers get structured, composable errors.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for assetdeck-core operations
#[derive(Error, Debug)]
pub enum CoreError {
    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// TOML parsing failed
    #[error("Invalid TOML in {path:?}: {source}")]
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// TOML serialization failed
    #[error("Failed to serialize TOML: {source}")]
    TomlSerialize {
        #[from]
        source: toml::ser::Error,
    },

    /// Configuration error
    #[error("Configuration error: {reason}")]
    Config { reason: String },
}

/// Result type alias for assetdeck-core operations
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Create a TOML parse error with the offending path
    pub fn toml_parse(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::TomlParse {
            path: path.into(),
            source,
        }
    }

    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::config("missing api_url");
        assert_eq!(err.to_string(), "Configuration error: missing api_url");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let core_err: CoreError = io_err.into();

        assert!(matches!(core_err, CoreError::Io { .. }));
    }
}
