use std::time::Duration;

use crate::retry::config::RetryConfig;

/// What happened on the attempt that just finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetrySignal {
    /// A response arrived with this status.
    HttpStatus(u16),
    /// Connection-level failure (DNS, refused, reset, TLS).
    NetworkFailure,
    /// The per-attempt deadline elapsed.
    Timeout,
    /// The caller cancelled the operation.
    Cancelled,
    /// Any other failure that is not transient.
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryDecision {
    RetryAfter { delay: Duration, reason: RetryReason },
    Stop { reason: RetryReason },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryReason {
    NotRetryable,
    AttemptsExhausted,
    Cancelled,
    NetworkFailure,
    HttpStatus(u16),
}

/// Decide if we should retry and how long to wait.
///
/// - `attempt_no`: 1-based number of the attempt that just completed.
/// - `signal`: how that attempt ended.
///
/// Pure: the same inputs always give the same decision.
pub fn decide_retry(cfg: &RetryConfig, attempt_no: u32, signal: RetrySignal) -> RetryDecision {
    let reason = match signal {
        RetrySignal::Cancelled => {
            return RetryDecision::Stop {
                reason: RetryReason::Cancelled,
            }
        }
        RetrySignal::Timeout | RetrySignal::Other => {
            return RetryDecision::Stop {
                reason: RetryReason::NotRetryable,
            }
        }
        RetrySignal::HttpStatus(status) if !cfg.is_retryable_status(status) => {
            return RetryDecision::Stop {
                reason: RetryReason::HttpStatus(status),
            }
        }
        RetrySignal::HttpStatus(status) => RetryReason::HttpStatus(status),
        RetrySignal::NetworkFailure => RetryReason::NetworkFailure,
    };

    if attempt_no >= cfg.max_attempts {
        return RetryDecision::Stop {
            reason: RetryReason::AttemptsExhausted,
        };
    }

    RetryDecision::RetryAfter {
        delay: backoff_delay(cfg, attempt_no),
        reason,
    }
}

/// `min(max_delay, initial_delay * factor^(attempt_no - 1))`, no jitter.
pub fn backoff_delay(cfg: &RetryConfig, attempt_no: u32) -> Duration {
    let exp = attempt_no.saturating_sub(1).min(i32::MAX as u32) as i32;
    let raw = (cfg.initial_delay.as_millis() as f64) * cfg.factor.powi(exp);
    let capped = raw.min(cfg.max_delay.as_millis() as f64).max(0.0);
    Duration::from_millis(capped as u64)
}
