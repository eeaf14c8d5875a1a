use std::time::Duration;

use autoflow_client::retry::{
    backoff_delay, decide_retry, RetryConfig, RetryDecision, RetryReason, RetrySignal,
};

fn delay_of(d: RetryDecision) -> Duration {
    match d {
        RetryDecision::RetryAfter { delay, .. } => delay,
        other => panic!("expected retry, got {other:?}"),
    }
}

#[test]
fn defaults_match_documented_policy() {
    let cfg = RetryConfig::default();
    assert_eq!(cfg.max_attempts, 3);
    assert_eq!(cfg.initial_delay, Duration::from_millis(1000));
    assert_eq!(cfg.max_delay, Duration::from_millis(30_000));
    assert_eq!(cfg.factor, 2.0);
    for s in [408, 429, 500, 502, 503, 504] {
        assert!(cfg.is_retryable_status(s), "{s} should be retryable");
    }
    for s in [400, 401, 403, 404, 422, 501] {
        assert!(!cfg.is_retryable_status(s), "{s} should not be retryable");
    }
}

#[test]
fn retryable_status_backs_off_exponentially_until_exhausted() {
    let cfg = RetryConfig::default();
    assert_eq!(
        decide_retry(&cfg, 1, RetrySignal::HttpStatus(503)),
        RetryDecision::RetryAfter {
            delay: Duration::from_millis(1000),
            reason: RetryReason::HttpStatus(503),
        }
    );
    assert_eq!(
        delay_of(decide_retry(&cfg, 2, RetrySignal::HttpStatus(503))),
        Duration::from_millis(2000)
    );
    assert_eq!(
        decide_retry(&cfg, 3, RetrySignal::HttpStatus(503)),
        RetryDecision::Stop {
            reason: RetryReason::AttemptsExhausted
        }
    );
}

#[test]
fn delay_is_capped_and_never_decreases() {
    let cfg = RetryConfig {
        max_attempts: 10,
        ..RetryConfig::default()
    };
    let delays: Vec<Duration> = (1..10)
        .map(|n| delay_of(decide_retry(&cfg, n, RetrySignal::HttpStatus(429))))
        .collect();
    assert_eq!(delays[4], Duration::from_millis(16_000));
    assert_eq!(delays[5], Duration::from_millis(30_000));
    assert!(delays.iter().all(|d| *d <= cfg.max_delay));
    assert!(delays.windows(2).all(|w| w[0] <= w[1]));
    assert!(delays[..5].windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn non_retryable_status_stops_immediately() {
    let cfg = RetryConfig::default();
    assert_eq!(
        decide_retry(&cfg, 1, RetrySignal::HttpStatus(404)),
        RetryDecision::Stop {
            reason: RetryReason::HttpStatus(404)
        }
    );
}

#[test]
fn network_failures_retry_but_cancellation_and_timeouts_do_not() {
    let cfg = RetryConfig::default();
    assert_eq!(
        decide_retry(&cfg, 1, RetrySignal::NetworkFailure),
        RetryDecision::RetryAfter {
            delay: Duration::from_millis(1000),
            reason: RetryReason::NetworkFailure,
        }
    );
    assert_eq!(
        decide_retry(&cfg, 1, RetrySignal::Cancelled),
        RetryDecision::Stop {
            reason: RetryReason::Cancelled
        }
    );
    assert_eq!(
        decide_retry(&cfg, 1, RetrySignal::Timeout),
        RetryDecision::Stop {
            reason: RetryReason::NotRetryable
        }
    );
    assert_eq!(
        decide_retry(&cfg, 1, RetrySignal::Other),
        RetryDecision::Stop {
            reason: RetryReason::NotRetryable
        }
    );
}

#[test]
fn disabled_config_never_retries() {
    let cfg = RetryConfig::disabled();
    assert!(matches!(
        decide_retry(&cfg, 1, RetrySignal::HttpStatus(503)),
        RetryDecision::Stop {
            reason: RetryReason::AttemptsExhausted
        }
    ));
}

#[test]
fn custom_factor_and_initial_delay() {
    let cfg = RetryConfig {
        initial_delay: Duration::from_millis(250),
        factor: 3.0,
        max_delay: Duration::from_secs(2),
        ..RetryConfig::default()
    };
    assert_eq!(backoff_delay(&cfg, 1), Duration::from_millis(250));
    assert_eq!(backoff_delay(&cfg, 2), Duration::from_millis(750));
    assert_eq!(backoff_delay(&cfg, 3), Duration::from_millis(2000));
}
