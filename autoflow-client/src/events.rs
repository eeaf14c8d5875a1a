use std::sync::{Arc, Mutex};
use std::time::Duration;

use autoflow_core::{ErrorKind, Runtime};
use uuid::Uuid;

use crate::executor::HttpMethod;
use crate::retry::RetryReason;

/// Things worth logging that happen inside the client.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    AttemptStarted {
        request_id: Uuid,
        method: HttpMethod,
        url: String,
        attempt_no: u32,
    },
    AttemptFinished {
        request_id: Uuid,
        attempt_no: u32,
        status: Option<u16>,
        elapsed: Duration,
    },
    RetryScheduled {
        request_id: Uuid,
        attempt_no: u32,
        delay: Duration,
        reason: RetryReason,
    },
    RequestFailed {
        request_id: Uuid,
        kind: ErrorKind,
        code: String,
        status: Option<u16>,
        attempts: u32,
    },
    /// An error response whose body was not the expected error envelope.
    ErrorBodyUnparsed {
        status: u16,
        error: String,
    },
    InsecureTransport {
        base_url: String,
    },
    CodeUploadStarted {
        step_index: usize,
        file_name: String,
        runtime: Runtime,
    },
    CodeUploaded {
        step_index: usize,
        key: String,
    },
}

/// Injected logging collaborator. Implementations must not block.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: Event);
}

pub struct NoOpEventSink;

impl EventSink for NoOpEventSink {
    fn emit(&self, _event: Event) {}
}

/// Forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&self, event: Event) {
        match event {
            Event::AttemptStarted {
                request_id,
                method,
                url,
                attempt_no,
            } => {
                tracing::debug!(%request_id, %method, %url, attempt_no, "sending request");
            }
            Event::AttemptFinished {
                request_id,
                attempt_no,
                status,
                elapsed,
            } => {
                tracing::debug!(
                    %request_id,
                    attempt_no,
                    status = ?status,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "attempt finished"
                );
            }
            Event::RetryScheduled {
                request_id,
                attempt_no,
                delay,
                reason,
            } => {
                tracing::warn!(
                    %request_id,
                    attempt_no,
                    delay_ms = delay.as_millis() as u64,
                    reason = ?reason,
                    "retrying request"
                );
            }
            Event::RequestFailed {
                request_id,
                kind,
                code,
                status,
                attempts,
            } => {
                tracing::debug!(%request_id, %kind, %code, status = ?status, attempts, "request failed");
            }
            Event::ErrorBodyUnparsed { status, error } => {
                tracing::debug!(status, %error, "could not parse error response body");
            }
            Event::InsecureTransport { base_url } => {
                tracing::warn!(%base_url, "insecure transport enabled; credentials will be sent in clear text");
            }
            Event::CodeUploadStarted {
                step_index,
                file_name,
                runtime,
            } => {
                tracing::info!(step = step_index, %file_name, %runtime, "uploading step code");
            }
            Event::CodeUploaded { step_index, key } => {
                tracing::info!(step = step_index, %key, "step code uploaded");
            }
        }
    }
}

pub struct CompositeEventSink {
    sinks: Vec<Arc<dyn EventSink>>,
}

impl Default for CompositeEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl CompositeEventSink {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn add(&mut self, sink: Arc<dyn EventSink>) {
        self.sinks.push(sink);
    }
}

impl EventSink for CompositeEventSink {
    fn emit(&self, event: Event) {
        for sink in &self.sinks {
            sink.emit(event.clone());
        }
    }
}

/// Keeps every event in memory; handy in tests and for diagnostics dumps.
#[derive(Default)]
pub struct RecordingEventSink {
    events: Mutex<Vec<Event>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl EventSink for RecordingEventSink {
    fn emit(&self, event: Event) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
