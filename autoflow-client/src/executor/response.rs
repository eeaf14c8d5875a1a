use std::time::Duration;

use autoflow_core::{ApiError, ErrorKind};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::events::{Event, EventSink};
use crate::executor::{HttpResponseParts, TransportError};
use crate::retry::{parse_retry_after, RetrySignal};

/// Decoded success value.
///
/// `Empty` is distinct from `Json(null)` or `Json({})`: it means the server sent no content.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Empty,
    Text(String),
    Json(JsonValue),
}

impl ResponseBody {
    pub fn is_empty(&self) -> bool {
        matches!(self, ResponseBody::Empty)
    }

    /// Decodes a JSON body into `T`; `Empty` becomes `None`.
    pub fn into_json<T: DeserializeOwned>(self) -> Result<Option<T>, ApiError> {
        match self {
            ResponseBody::Empty => Ok(None),
            ResponseBody::Json(v) => serde_json::from_value(v).map(Some).map_err(|e| {
                ApiError::unknown(
                    format!("response did not match the expected shape: {e}"),
                    None,
                    Some("PARSE_ERROR".to_string()),
                )
            }),
            ResponseBody::Text(_) => Err(ApiError::unknown(
                "expected a JSON response but received text",
                None,
                Some("UNEXPECTED_CONTENT_TYPE".to_string()),
            )),
        }
    }
}

/// Why an attempt produced no response.
#[derive(Debug, Clone)]
pub enum AttemptFailure {
    Cancelled,
    DeadlineElapsed(Duration),
    Transport(TransportError),
}

impl AttemptFailure {
    pub fn retry_signal(&self) -> RetrySignal {
        match self {
            AttemptFailure::Cancelled => RetrySignal::Cancelled,
            AttemptFailure::DeadlineElapsed(_) | AttemptFailure::Transport(TransportError::Timeout) => {
                RetrySignal::Timeout
            }
            AttemptFailure::Transport(TransportError::Network(_)) => RetrySignal::NetworkFailure,
            AttemptFailure::Transport(_) => RetrySignal::Other,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Option<JsonValue>,
}

pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

pub fn is_json_content_type(value: Option<&str>) -> bool {
    let Some(value) = value else {
        return false;
    };
    let mime = value.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
    mime == "application/json" || mime.ends_with("+json")
}

/// Classifies a completed response into a success value or a typed error.
pub fn interpret_response(
    resp: &HttpResponseParts,
    events: &dyn EventSink,
) -> Result<ResponseBody, ApiError> {
    if resp.status == 204 {
        return Ok(ResponseBody::Empty);
    }
    if is_success(resp.status) {
        return decode_success(resp);
    }
    Err(error_from_response(resp, events))
}

fn decode_success(resp: &HttpResponseParts) -> Result<ResponseBody, ApiError> {
    if resp.body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ResponseBody::Empty);
    }
    if !is_json_content_type(resp.header("content-type")) {
        return Ok(ResponseBody::Text(String::from_utf8_lossy(&resp.body).into_owned()));
    }
    serde_json::from_slice(&resp.body)
        .map(ResponseBody::Json)
        .map_err(|e| {
            ApiError::unknown(
                format!("failed to parse response body: {e}"),
                Some(resp.status),
                Some("PARSE_ERROR".to_string()),
            )
        })
}

fn error_from_response(resp: &HttpResponseParts, events: &dyn EventSink) -> ApiError {
    let status = resp.status;
    let (code, message, details) = match serde_json::from_slice::<ErrorEnvelope>(&resp.body) {
        Ok(envelope) => (envelope.error.code, envelope.error.message, envelope.error.details),
        Err(e) => {
            if !resp.body.is_empty() {
                events.emit(Event::ErrorBodyUnparsed {
                    status,
                    error: e.to_string(),
                });
            }
            (None, None, None)
        }
    };
    let message = message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("request failed with status {status}"));

    match ErrorKind::from_status(status) {
        ErrorKind::RateLimit => {
            ApiError::rate_limited(message, Some(parse_retry_after(&resp.headers)))
        }
        ErrorKind::Validation => ApiError::validation(message, details).with_status(status),
        ErrorKind::Unknown => {
            let code = code.unwrap_or_else(|| ErrorKind::Unknown.code().to_string());
            let err = ApiError::unknown(message, Some(status), Some(code));
            match details {
                Some(d) => err.with_details(d),
                None => err,
            }
        }
        kind => ApiError::new(kind, message),
    }
}

/// Maps a failed attempt onto the error taxonomy. Total over [`AttemptFailure`].
pub fn classify_failure(failure: &AttemptFailure) -> ApiError {
    match failure {
        AttemptFailure::Cancelled => ApiError::timeout("request was cancelled"),
        AttemptFailure::DeadlineElapsed(timeout) => ApiError::timeout(format!(
            "request timed out after {} ms",
            timeout.as_millis()
        )),
        AttemptFailure::Transport(TransportError::Timeout) => {
            ApiError::timeout("request timed out in transport")
        }
        AttemptFailure::Transport(TransportError::Network(msg)) => {
            ApiError::network(format!("network request failed: {msg}"))
        }
        AttemptFailure::Transport(e @ TransportError::ResponseTooLarge { .. }) => {
            ApiError::unknown(e.to_string(), None, Some("RESPONSE_TOO_LARGE".to_string()))
        }
        AttemptFailure::Transport(TransportError::Other(msg)) => {
            ApiError::unknown(msg.clone(), None, None)
        }
    }
}
