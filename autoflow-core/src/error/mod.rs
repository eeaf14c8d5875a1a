use std::fmt;
use std::time::Duration;

use serde_json::{json, Value as JsonValue};
use thiserror::Error;

/// Delay reported on rate-limit errors when the server does not say how long to wait.
pub const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(60);

/// Closed set of failure categories surfaced by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Authentication,
    Authorization,
    NotFound,
    Validation,
    RateLimit,
    Network,
    Timeout,
    Configuration,
    Unknown,
}

impl ErrorKind {
    /// Stable machine-readable code used when the server did not supply one.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::Authentication => "AUTHENTICATION_ERROR",
            ErrorKind::Authorization => "AUTHORIZATION_ERROR",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Validation => "VALIDATION_ERROR",
            ErrorKind::RateLimit => "RATE_LIMIT_EXCEEDED",
            ErrorKind::Network => "NETWORK_ERROR",
            ErrorKind::Timeout => "TIMEOUT",
            ErrorKind::Configuration => "CONFIGURATION_ERROR",
            ErrorKind::Unknown => "UNKNOWN_ERROR",
        }
    }

    pub fn default_status(self) -> Option<u16> {
        match self {
            ErrorKind::Authentication => Some(401),
            ErrorKind::Authorization => Some(403),
            ErrorKind::NotFound => Some(404),
            ErrorKind::Validation => Some(422),
            ErrorKind::RateLimit => Some(429),
            ErrorKind::Timeout => Some(408),
            ErrorKind::Network | ErrorKind::Configuration | ErrorKind::Unknown => None,
        }
    }

    /// Kind for a non-success HTTP status.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => ErrorKind::Authentication,
            403 => ErrorKind::Authorization,
            404 => ErrorKind::NotFound,
            400 | 422 => ErrorKind::Validation,
            429 => ErrorKind::RateLimit,
            _ => ErrorKind::Unknown,
        }
    }

    /// Whether the kind is transient by nature. `Unknown` errors may still be
    /// retried by the executor when their status is in the retryable set.
    pub fn is_transient(self) -> bool {
        matches!(self, ErrorKind::RateLimit | ErrorKind::Network)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The single error type returned by every client operation.
///
/// Kind-specific data lives in optional fields: `retry_after` is only set for
/// [`ErrorKind::RateLimit`], `details` mostly for [`ErrorKind::Validation`].
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
    pub code: String,
    pub status: Option<u16>,
    pub details: Option<JsonValue>,
    pub retry_after: Option<Duration>,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            code: kind.code().to_string(),
            status: kind.default_status(),
            details: None,
            retry_after: None,
        }
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication, message)
    }

    pub fn authorization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authorization, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn validation(message: impl Into<String>, details: Option<JsonValue>) -> Self {
        Self {
            details,
            ..Self::new(ErrorKind::Validation, message)
        }
    }

    /// Rate-limit error; a missing delay falls back to [`DEFAULT_RETRY_AFTER`].
    pub fn rate_limited(message: impl Into<String>, retry_after: Option<Duration>) -> Self {
        Self {
            retry_after: Some(retry_after.unwrap_or(DEFAULT_RETRY_AFTER)),
            ..Self::new(ErrorKind::RateLimit, message)
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Network, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Timeout, message)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    pub fn unknown(message: impl Into<String>, status: Option<u16>, code: Option<String>) -> Self {
        let mut err = Self::new(ErrorKind::Unknown, message);
        err.status = status;
        if let Some(code) = code {
            err.code = code;
        }
        err
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_details(mut self, details: JsonValue) -> Self {
        self.details = Some(details);
        self
    }

    /// Whether the kind alone marks this error as transient (Network or RateLimit).
    ///
    /// The status is not consulted: an Unknown error carrying 503 returns `false` here even
    /// though the request executor retries that status. Retry scheduling is driven by the
    /// executor's retry policy, not by this method.
    pub fn is_retryable(&self) -> bool {
        self.kind.is_transient()
    }

    /// `"[CODE] message"`, suitable for showing to an end user.
    pub fn user_message(&self) -> String {
        format!("[{}] {}", self.code, self.message)
    }
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse as JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to parse as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Error)]
#[error("workflow definition failed validation ({violations_len} violations)")]
pub struct ValidationError {
    pub violations: Vec<Violation>,
    violations_len: usize,
}

impl ValidationError {
    pub fn new(violations: Vec<Violation>) -> Self {
        let violations_len = violations.len();
        Self {
            violations,
            violations_len,
        }
    }

    pub fn single(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(vec![Violation::new(path, message)])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Violation {
    pub path: String,
    pub message: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        let message = match err.violations.as_slice() {
            [only] => only.to_string(),
            _ => err.to_string(),
        };
        let details = json!({ "violations": err.violations });
        ApiError::validation(message, Some(details))
    }
}

impl From<ParseError> for ApiError {
    fn from(err: ParseError) -> Self {
        ApiError::validation(err.to_string(), None).with_code("PARSE_ERROR")
    }
}
