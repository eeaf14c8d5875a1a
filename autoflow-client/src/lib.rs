#![forbid(unsafe_code)]

//! Async client for the Autoflow workflow-automation API.
//!
//! Every call goes through [`RequestExecutor`], which applies the per-attempt
//! deadline, the retry policy in [`retry`] and the error classification in
//! [`executor::response`]. Workflow create/update first run the
//! [`orchestrator::StepProcessor`], which uploads inline step code and swaps
//! it for artifact keys.

pub mod client;
pub mod config;
pub mod endpoints;
pub mod events;
pub mod executor;
pub mod orchestrator;
pub mod resources;
pub mod retry;

pub use autoflow_core::{ApiError, ErrorKind};
pub use crate::client::AutoflowClient;
pub use crate::config::{ClientConfig, ClientConfigBuilder};
pub use crate::events::{
    CompositeEventSink, Event, EventSink, NoOpEventSink, RecordingEventSink, TracingEventSink,
};
pub use crate::executor::{
    HttpMethod, HttpTransport, Operation, QueryValue, RequestExecutor, ResponseBody,
};
pub use crate::orchestrator::{CodeUploader, StepProcessor};
pub use crate::retry::RetryConfig;
pub use tokio_util::sync::CancellationToken;
