use std::sync::Arc;
use std::time::Duration;

use autoflow_core::ApiError;
use serde::de::DeserializeOwned;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::events::{Event, EventSink};
use crate::executor::request::{build_request, build_url};
use crate::executor::response::{
    classify_failure, interpret_response, is_success, AttemptFailure, ResponseBody,
};
use crate::executor::{HttpRequestParts, HttpResponseParts, HttpTransport, Operation};
use crate::retry::{decide_retry, RetryDecision, RetrySignal};

/// Turns [`Operation`]s into network calls with deadline, retry and error classification.
///
/// Holds only read-only state; any number of operations may run concurrently
/// through the same executor.
pub struct RequestExecutor {
    config: Arc<ClientConfig>,
    transport: Arc<dyn HttpTransport>,
}

impl RequestExecutor {
    pub fn new(config: Arc<ClientConfig>, transport: Arc<dyn HttpTransport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn events(&self) -> &dyn EventSink {
        self.config.events.as_ref()
    }

    /// Runs the operation to completion, retrying per the configured policy.
    pub async fn execute(&self, op: &Operation) -> Result<ResponseBody, ApiError> {
        let body = op
            .body_value()
            .map(serde_json::to_vec)
            .transpose()
            .map_err(|e| ApiError::validation(format!("request body is not serializable: {e}"), None))?;
        let url = build_url(self.config.base_url(), op)?;
        let timeout = op.timeout_override().unwrap_or(self.config.timeout);
        let events = self.events();

        let mut attempt_no: u32 = 1;
        loop {
            let request_id = Uuid::new_v4();
            let req = build_request(&self.config, op.method(), &url, body.as_deref(), request_id);
            events.emit(Event::AttemptStarted {
                request_id,
                method: op.method(),
                url: url.to_string(),
                attempt_no,
            });

            let started = Instant::now();
            let result = self.attempt(req, timeout, op.cancel_token()).await;
            events.emit(Event::AttemptFinished {
                request_id,
                attempt_no,
                status: result.as_ref().ok().map(|r| r.status),
                elapsed: started.elapsed(),
            });

            let signal = match &result {
                Ok(resp) if is_success(resp.status) => {
                    return interpret_response(resp, events)
                        .map_err(|e| self.failed(request_id, attempt_no, e));
                }
                Ok(resp) => RetrySignal::HttpStatus(resp.status),
                Err(failure) => failure.retry_signal(),
            };

            match decide_retry(&self.config.retry, attempt_no, signal) {
                RetryDecision::RetryAfter { delay, reason } => {
                    events.emit(Event::RetryScheduled {
                        request_id,
                        attempt_no,
                        delay,
                        reason,
                    });
                    if let Err(failure) = backoff(delay, op.cancel_token()).await {
                        return Err(self.failed(request_id, attempt_no, classify_failure(&failure)));
                    }
                    attempt_no += 1;
                }
                RetryDecision::Stop { .. } => {
                    let err = match result {
                        Ok(resp) => final_error(&resp, events),
                        Err(failure) => classify_failure(&failure),
                    };
                    return Err(self.failed(request_id, attempt_no, err));
                }
            }
        }
    }

    /// Like [`execute`](Self::execute) but decodes JSON into `T`. `None` means no content.
    pub async fn execute_json<T: DeserializeOwned>(&self, op: &Operation) -> Result<Option<T>, ApiError> {
        self.execute(op).await?.into_json()
    }

    /// For calls that must return a value; an empty response is an error.
    pub async fn execute_value<T: DeserializeOwned>(&self, op: &Operation) -> Result<T, ApiError> {
        self.execute_json(op).await?.ok_or_else(|| {
            ApiError::unknown(
                format!("{} {} returned no content", op.method(), op.path()),
                None,
                Some("EMPTY_RESPONSE".to_string()),
            )
        })
    }

    /// For calls whose success carries no meaningful value (typically DELETE).
    pub async fn execute_unit(&self, op: &Operation) -> Result<(), ApiError> {
        self.execute(op).await.map(|_| ())
    }

    async fn attempt(
        &self,
        req: HttpRequestParts,
        timeout: Duration,
        cancel: Option<&CancellationToken>,
    ) -> Result<HttpResponseParts, AttemptFailure> {
        // Dropping the timeout future aborts the transport call and its timer.
        let send = tokio::time::timeout(timeout, self.transport.send(req));
        let outcome = match cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => return Err(AttemptFailure::Cancelled),
                r = send => r,
            },
            None => send.await,
        };
        match outcome {
            Ok(Ok(resp)) => Ok(resp),
            Ok(Err(e)) => Err(AttemptFailure::Transport(e)),
            Err(_) => Err(AttemptFailure::DeadlineElapsed(timeout)),
        }
    }

    fn failed(&self, request_id: Uuid, attempts: u32, err: ApiError) -> ApiError {
        self.events().emit(Event::RequestFailed {
            request_id,
            kind: err.kind,
            code: err.code.clone(),
            status: err.status,
            attempts,
        });
        err
    }
}

fn final_error(resp: &HttpResponseParts, events: &dyn EventSink) -> ApiError {
    match interpret_response(resp, events) {
        Err(e) => e,
        // Only non-2xx responses reach here, and those always classify as errors.
        Ok(_) => ApiError::unknown(
            format!("unexpected status {}", resp.status),
            Some(resp.status),
            None,
        ),
    }
}

async fn backoff(delay: Duration, cancel: Option<&CancellationToken>) -> Result<(), AttemptFailure> {
    match cancel {
        Some(token) => tokio::select! {
            biased;
            _ = token.cancelled() => Err(AttemptFailure::Cancelled),
            _ = tokio::time::sleep(delay) => Ok(()),
        },
        None => {
            tokio::time::sleep(delay).await;
            Ok(())
        }
    }
}
