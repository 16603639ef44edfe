//! Domain error types
//!
//! All errors are domain-specific and don't expose third-party types. The
//! archival-API client maps transport failures into [`ArchivesApiError`]
//! before they reach the export engine.

use thiserror::Error;

/// Main Aspex error type
///
/// This is the primary error type used throughout the application.
/// The variants line up with the failure classes the CLI maps to exit codes:
/// configuration errors abort before any network access, worklist errors
/// abort before any export work begins, and everything else is fatal.
#[derive(Debug, Error)]
pub enum AspexError {
    /// Configuration-related errors (bad flags, bad config file)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Worklist-build errors (repository or resource enumeration failed)
    #[error("Worklist error: {0}")]
    Worklist(String),

    /// Archival API errors
    #[error("ArchivesSpace error: {0}")]
    Archives(#[from] ArchivesApiError),

    /// Record validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Reformatting errors
    #[error("Reformat error: {0}")]
    Reformat(String),

    /// Report generation errors
    #[error("Report error: {0}")]
    Report(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Archival-API specific errors
///
/// Errors that occur when talking to an ArchivesSpace backend. These don't
/// expose the HTTP client's types; the caller only sees the failure class
/// and a message.
#[derive(Debug, Error)]
pub enum ArchivesApiError {
    /// Failed to reach the server at all
    #[error("Failed to connect to ArchivesSpace: {0}")]
    ConnectionFailed(String),

    /// Login rejected or session expired
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Repository or resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx other than 404)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Response body could not be decoded
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// Request timed out
    #[error("Request timeout: {0}")]
    Timeout(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for AspexError {
    fn from(err: std::io::Error) -> Self {
        AspexError::Io(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for AspexError {
    fn from(err: toml::de::Error) -> Self {
        AspexError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspex_error_display() {
        let err = AspexError::Configuration("missing environment key".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: missing environment key"
        );
    }

    #[test]
    fn test_archives_error_conversion() {
        let api_err = ArchivesApiError::ConnectionFailed("connection refused".to_string());
        let err: AspexError = api_err.into();
        assert!(matches!(err, AspexError::Archives(_)));
    }

    #[test]
    fn test_server_error_display() {
        let err = ArchivesApiError::ServerError {
            status: 502,
            message: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "Server error: 502 - bad gateway");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: AspexError = io_err.into();
        assert!(matches!(err, AspexError::Io(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: AspexError = toml_err.into();
        assert!(matches!(err, AspexError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_errors_implement_std_error() {
        let err = AspexError::Validation("test".to_string());
        let _: &dyn std::error::Error = &err;

        let err = ArchivesApiError::Timeout("20s".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
