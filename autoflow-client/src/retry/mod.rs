mod config;
mod decision;
mod headers;

pub use config::RetryConfig;
pub use decision::{backoff_delay, decide_retry, RetryDecision, RetryReason, RetrySignal};
pub use headers::parse_retry_after;
pub(crate) use headers::get_header_ci;
