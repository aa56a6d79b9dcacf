//! Error types for libraries.io API operations.

use thiserror::Error;

/// Errors that can occur during libraries.io API operations.
///
/// The first group are configuration errors: they are raised before any
/// network I/O and are never swallowed by the facades.
#[derive(Debug, Error)]
pub enum LibrariesError {
    /// No API key was supplied explicitly or through the environment.
    #[error(
        "All methods require an API key. See https://libraries.io to get your free key, \
         then set it in the {env_var} environment variable or pass it as an argument"
    )]
    MissingApiKey { env_var: String },

    /// A facade was handed a session it cannot drive.
    #[error("Invalid session supplied: expected a standard session, got {found}")]
    InvalidSessionClass { found: &'static str },

    /// The verb is not accepted by the operation, or the call cannot be paginated.
    #[error("Invalid operation '{operation}' with verb {verb}: {reason}")]
    InvalidOperation {
        operation: String,
        verb: String,
        reason: &'static str,
    },

    /// An operation or verb name that is not part of the catalog.
    #[error("Unknown operation '{0}'")]
    UnknownOperation(String),

    /// An argument, sort or filter name the catalog does not know.
    #[error("Unknown {kind} '{value}'")]
    UnknownKey { kind: &'static str, value: String },

    /// A positional argument was supplied where only named arguments are allowed.
    #[error("Encountered an unnamed argument '{0}' in API call")]
    UnnamedArgument(String),

    /// A required named argument is missing.
    #[error("Missing required argument '{0}'")]
    MissingArgument(&'static str),

    /// API request failed with a non-success status.
    #[error("libraries.io API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Retry budget exhausted on a retryable status or connection error.
    #[error("Gave up after {attempts} attempts (last status: {last_status:?})")]
    RetriesExhausted {
        attempts: u32,
        last_status: Option<u16>,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// The body decoded to JSON that is neither an object nor an array.
    #[error("Unexpected response payload: expected an object or array, got {0}")]
    UnexpectedPayload(&'static str),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),
}

impl LibrariesError {
    /// Whether this error is raised before any request is dispatched.
    ///
    /// Configuration errors always propagate to the caller; everything else
    /// is a transport or remote failure.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingApiKey { .. }
                | Self::InvalidSessionClass { .. }
                | Self::InvalidOperation { .. }
                | Self::UnknownOperation(_)
                | Self::UnknownKey { .. }
                | Self::UnnamedArgument(_)
                | Self::MissingArgument(_)
                | Self::UrlError(_)
        )
    }

    /// HTTP status attached to the failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::RetriesExhausted { last_status, .. } => *last_status,
            Self::HttpError(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for libraries.io operations.
pub type Result<T> = core::result::Result<T, LibrariesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_errors_are_flagged() {
        assert!(LibrariesError::MissingArgument("platform").is_configuration());
        assert!(LibrariesError::UnknownOperation("nope".into()).is_configuration());
        assert!(!LibrariesError::Api {
            status: 404,
            message: "not found".into()
        }
        .is_configuration());
    }

    #[test]
    fn test_unknown_key_names_its_kind() {
        let err = LibrariesError::UnknownKey {
            kind: "sort",
            value: "hotness".into(),
        };
        assert_eq!(err.to_string(), "Unknown sort 'hotness'");
        assert!(err.is_configuration());
    }

    #[test]
    fn test_missing_argument_names_key() {
        let err = LibrariesError::MissingArgument("version");
        assert!(err.to_string().contains("'version'"));
    }

    #[test]
    fn test_status_extraction() {
        let err = LibrariesError::RetriesExhausted {
            attempts: 4,
            last_status: Some(503),
        };
        assert_eq!(err.status(), Some(503));
        assert_eq!(LibrariesError::UnexpectedPayload("null").status(), None);
    }
}
