//! Error types

use thiserror::Error;

use crate::types::ValidationError;

/// Result type alias for Forms Expert operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error code for transport-level network failures
pub const CODE_NETWORK_ERROR: &str = "NETWORK_ERROR";
/// Error code for malformed/non-JSON response bodies
pub const CODE_PARSE_ERROR: &str = "PARSE_ERROR";
/// Error code for aborted requests
pub const CODE_ABORTED: &str = "ABORTED";
/// Error code for server-side validation failures
pub const CODE_VALIDATION_ERROR: &str = "VALIDATION_ERROR";
/// Fallback code when the server declares none
pub const CODE_UNKNOWN_ERROR: &str = "UNKNOWN_ERROR";

/// Error type for Forms Expert SDK operations.
///
/// All transport failures carry a branchable string [`code`](Error::code) so
/// callers can distinguish server-declared conditions (`VALIDATION_ERROR`,
/// `CAPTCHA_REQUIRED`, `RATE_LIMIT_*`, ...) from local ones.
#[derive(Debug, Error)]
pub enum Error {
    /// Error returned by the API with a non-2xx status
    #[error("API error: {code} - {message}")]
    Api {
        /// Human-readable message from the response body
        message: String,
        /// Server-declared error code
        code: String,
        /// HTTP status of the response
        http_status: u16,
        /// Server-declared retry delay in seconds, when rate limited
        retry_after: Option<u64>,
    },

    /// Transport-level failure before a response was received
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The response body was not valid JSON for the expected shape
    #[error("invalid response body: {0}")]
    Parse(#[source] serde_json::Error),

    /// The request was interrupted before completing
    #[error("request aborted")]
    Aborted,

    /// Remote schema validation rejected the submission.
    ///
    /// Carries the full ordered error list; the session additionally exposes
    /// a collapsed field -> message map.
    #[error("validation failed for {} field(s)", .0.len())]
    Validation(Vec<ValidationError>),

    /// Base URL could not be parsed
    #[error("invalid base URL: {0}")]
    BaseUrl(#[from] url::ParseError),

    /// Invalid client configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// A session operation that needs the remote form config ran before
    /// `initialize` completed
    #[error("form session is not initialized")]
    NotInitialized,
}

impl Error {
    /// Branchable error code.
    ///
    /// Server-declared codes are passed through verbatim; local failures map
    /// to `NETWORK_ERROR`, `PARSE_ERROR` or `ABORTED`.
    pub fn code(&self) -> &str {
        match self {
            Error::Api { code, .. } => code,
            Error::Network(_) => CODE_NETWORK_ERROR,
            Error::Parse(_) => CODE_PARSE_ERROR,
            Error::Aborted => CODE_ABORTED,
            Error::Validation(_) => CODE_VALIDATION_ERROR,
            Error::BaseUrl(_) | Error::Config(_) => "CONFIG_ERROR",
            Error::NotInitialized => "NOT_INITIALIZED",
        }
    }

    /// HTTP status of the failing response, when one was received
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Error::Api { http_status, .. } => Some(*http_status),
            _ => None,
        }
    }

    /// Server-declared retry delay in seconds
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            Error::Api { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// Returns true if the server rate limited the request
    pub fn is_rate_limited(&self) -> bool {
        self.code().contains("RATE_LIMIT")
    }

    /// Returns true for validation failures, remote or short-circuited
    pub fn is_validation_error(&self) -> bool {
        self.code() == CODE_VALIDATION_ERROR
    }

    /// Structured field errors, when this is a validation failure
    pub fn validation_errors(&self) -> Option<&[ValidationError]> {
        match self {
            Error::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // A timed-out or cut-off request is the closest analogue of an abort;
        // everything else is a plain transport failure.
        if err.is_timeout() {
            Error::Aborted
        } else {
            Error::Network(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(code: &str, retry_after: Option<u64>) -> Error {
        Error::Api {
            message: "nope".to_string(),
            code: code.to_string(),
            http_status: 429,
            retry_after,
        }
    }

    #[test]
    fn test_code_passthrough() {
        assert_eq!(api_error("CAPTCHA_REQUIRED", None).code(), "CAPTCHA_REQUIRED");
        assert_eq!(Error::Aborted.code(), "ABORTED");
        assert_eq!(Error::NotInitialized.code(), "NOT_INITIALIZED");
        assert_eq!(Error::Validation(vec![]).code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_rate_limit_substring_match() {
        assert!(api_error("RATE_LIMIT_EXCEEDED", Some(5)).is_rate_limited());
        assert!(api_error("MONTHLY_RATE_LIMIT", None).is_rate_limited());
        assert!(!api_error("VALIDATION_ERROR", None).is_rate_limited());
    }

    #[test]
    fn test_retry_after_only_on_api_errors() {
        assert_eq!(api_error("RATE_LIMIT_EXCEEDED", Some(7)).retry_after(), Some(7));
        assert_eq!(Error::Aborted.retry_after(), None);
    }

    #[test]
    fn test_validation_error_predicate() {
        assert!(Error::Validation(vec![]).is_validation_error());
        assert!(api_error("VALIDATION_ERROR", None).is_validation_error());
        assert!(!api_error("ORIGIN_NOT_ALLOWED", None).is_validation_error());
    }
}
