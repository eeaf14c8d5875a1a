mod common;

use std::sync::Arc;
use std::time::Duration;

use autoflow_client::executor::{TransportError, REQUEST_ID_HEADER};
use autoflow_client::{
    CancellationToken, ErrorKind, Event, HttpMethod, Operation, ResponseBody, RetryConfig,
};
use common::*;
use serde_json::json;

fn retry_delays(events: &[Event]) -> Vec<Duration> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::RetryScheduled { delay, .. } => Some(*delay),
            _ => None,
        })
        .collect()
}

#[tokio::test(start_paused = true)]
async fn sends_standard_headers_and_keeps_base_path() {
    let transport = ScriptedTransport::new(vec![json_reply(200, json!({ "ok": true }))]);
    let (exec, _) = executor(transport.clone());

    let op = Operation::get("/workflows")
        .query("page", 2)
        .query_opt::<u32>("limit", None);
    let body = exec.execute(&op).await.unwrap();
    assert_eq!(body, ResponseBody::Json(json!({ "ok": true })));

    let reqs = transport.requests();
    assert_eq!(reqs.len(), 1);
    let req = &reqs[0];
    assert_eq!(req.method, HttpMethod::Get);
    assert_eq!(req.url.as_str(), "https://api.test.local/v1/workflows?page=2");
    assert_eq!(req.headers["Authorization"], format!("Bearer {API_KEY}"));
    assert_eq!(req.headers["Content-Type"], "application/json");
    assert_eq!(req.headers["Accept"], "application/json");
    assert!(req.headers["User-Agent"].starts_with("autoflow-client/"));
    assert!(req.headers.contains_key(REQUEST_ID_HEADER));
    assert!(req.body.is_none());
}

#[tokio::test(start_paused = true)]
async fn retries_retryable_status_with_backoff_then_fails() {
    let transport = ScriptedTransport::new(vec![
        json_reply(503, json!({ "error": { "code": "BUSY", "message": "try later" } })),
        json_reply(503, json!({ "error": { "code": "BUSY", "message": "try later" } })),
        json_reply(503, json!({ "error": { "code": "BUSY", "message": "try later" } })),
    ]);
    let (exec, events) = executor(transport.clone());

    let err = exec.execute(&Operation::get("/workflows")).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unknown);
    assert_eq!(err.status, Some(503));
    assert_eq!(err.code, "BUSY");
    assert_eq!(transport.requests().len(), 3);

    let events = events.events();
    assert_eq!(
        retry_delays(&events),
        vec![Duration::from_millis(1000), Duration::from_millis(2000)]
    );
    assert!(matches!(
        events.last(),
        Some(Event::RequestFailed { attempts: 3, .. })
    ));
}

#[tokio::test(start_paused = true)]
async fn recovers_after_transient_failure_with_same_body_and_fresh_ids() {
    let transport = ScriptedTransport::new(vec![
        empty_reply(502),
        json_reply(201, json!({ "id": "wf_1" })),
    ]);
    let (exec, _) = executor(transport.clone());

    let op = Operation::post("/workflows").body(json!({ "name": "demo", "steps": [] }));
    let body = exec.execute(&op).await.unwrap();
    assert_eq!(body, ResponseBody::Json(json!({ "id": "wf_1" })));

    let reqs = transport.requests();
    assert_eq!(reqs.len(), 2);
    assert_eq!(reqs[0].body, reqs[1].body);
    assert_eq!(body_json(&reqs[0]), json!({ "name": "demo", "steps": [] }));
    assert_ne!(
        reqs[0].headers[REQUEST_ID_HEADER],
        reqs[1].headers[REQUEST_ID_HEADER]
    );
}

#[tokio::test(start_paused = true)]
async fn client_errors_are_not_retried() {
    let transport = ScriptedTransport::new(vec![json_reply(
        404,
        json!({ "error": { "code": "NOT_FOUND", "message": "no such workflow" } }),
    )]);
    let (exec, events) = executor(transport.clone());

    let err = exec.execute(&Operation::get("/workflows/wf_9")).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(err.message, "no such workflow");
    assert_eq!(transport.requests().len(), 1);
    assert!(retry_delays(&events.events()).is_empty());
}

#[tokio::test(start_paused = true)]
async fn network_failures_retry_until_exhausted() {
    let refused = || Reply::Fail(TransportError::Network("connection refused".into()));
    let transport = ScriptedTransport::new(vec![refused(), refused(), refused()]);
    let (exec, events) = executor(transport.clone());

    let err = exec.execute(&Operation::get("/secrets")).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Network);
    assert_eq!(transport.requests().len(), 3);
    assert_eq!(retry_delays(&events.events()).len(), 2);
}

#[tokio::test(start_paused = true)]
async fn cancelling_in_flight_request_is_a_timeout_and_not_retried() {
    let transport = ScriptedTransport::new(vec![Reply::Hang, json_reply(200, json!({}))]);
    let (exec, events) = executor(transport.clone());

    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        canceller.cancel();
    });

    let op = Operation::get("/workflows").cancel_on(token);
    let err = exec.execute(&op).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Timeout);
    assert_eq!(transport.requests().len(), 1);
    assert!(retry_delays(&events.events()).is_empty());
}

#[tokio::test(start_paused = true)]
async fn cancelling_during_backoff_stops_before_next_attempt() {
    let transport = ScriptedTransport::new(vec![empty_reply(503), json_reply(200, json!({}))]);
    let (exec, _) = executor(transport.clone());

    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(500)).await;
        canceller.cancel();
    });

    let op = Operation::get("/workflows").cancel_on(token);
    let err = exec.execute(&op).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Timeout);
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn deadline_elapses_without_retry() {
    let transport = ScriptedTransport::new(vec![Reply::Hang, json_reply(200, json!({}))]);
    let (exec, _) = executor(transport.clone());

    let op = Operation::get("/workflows").timeout(Duration::from_secs(2));
    let started = tokio::time::Instant::now();
    let err = exec.execute(&op).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Timeout);
    assert!(err.message.contains("2000 ms"), "{}", err.message);
    assert_eq!(started.elapsed(), Duration::from_secs(2));
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn no_content_is_empty_and_none() {
    let transport = ScriptedTransport::new(vec![empty_reply(204), empty_reply(204)]);
    let (exec, _) = executor(transport.clone());

    let op = Operation::delete("/secrets/API_TOKEN");
    assert_eq!(exec.execute(&op).await.unwrap(), ResponseBody::Empty);
    let decoded: Option<serde_json::Value> = exec.execute_json(&op).await.unwrap();
    assert!(decoded.is_none());
}

#[tokio::test(start_paused = true)]
async fn exhausted_rate_limit_reports_retry_after() {
    let limited = || raw_reply(429, &[("Retry-After", "45")], b"");
    let transport = ScriptedTransport::new(vec![limited(), limited()]);
    let retry = RetryConfig {
        max_attempts: 2,
        ..RetryConfig::default()
    };
    let (exec, _) = executor_with_retry(transport.clone(), retry);

    let err = exec.execute(&Operation::get("/workflows")).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::RateLimit);
    assert_eq!(err.retry_after, Some(Duration::from_secs(45)));
    assert_eq!(transport.requests().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn concurrent_operations_keep_separate_attempt_counts() {
    let transport = RoutedTransport::new(|req| match req.url.path() {
        "/v1/flaky" => empty_reply(503),
        _ => json_reply(200, json!({ "ok": true })),
    });
    let (exec, events) = executor(transport.clone());
    let exec = Arc::new(exec);

    let flaky = {
        let exec = exec.clone();
        tokio::spawn(async move { exec.execute(&Operation::get("/flaky")).await })
    };
    let steady = {
        let exec = exec.clone();
        tokio::spawn(async move { exec.execute(&Operation::get("/steady")).await })
    };

    assert!(flaky.await.unwrap().is_err());
    assert!(steady.await.unwrap().is_ok());

    let paths = transport.paths();
    assert_eq!(paths.iter().filter(|p| *p == "GET /v1/flaky").count(), 3);
    assert_eq!(paths.iter().filter(|p| *p == "GET /v1/steady").count(), 1);
    assert!(events.events().iter().any(|e| matches!(
        e,
        Event::RequestFailed { attempts: 3, status: Some(503), .. }
    )));
}

#[tokio::test(start_paused = true)]
async fn execute_value_rejects_empty_response() {
    let transport = ScriptedTransport::new(vec![empty_reply(204)]);
    let (exec, _) = executor(transport);

    let err = exec
        .execute_value::<serde_json::Value>(&Operation::get("/workflows/wf_1"))
        .await
        .unwrap_err();
    assert_eq!(err.code, "EMPTY_RESPONSE");
}

#[tokio::test(start_paused = true)]
async fn composite_sink_fans_events_out_to_every_sink() {
    use autoflow_client::{ClientConfig, CompositeEventSink, RecordingEventSink, RequestExecutor};

    let first = Arc::new(RecordingEventSink::new());
    let second = Arc::new(RecordingEventSink::new());
    let mut composite = CompositeEventSink::new();
    composite.add(first.clone());
    composite.add(second.clone());

    let config = ClientConfig::builder(API_KEY)
        .base_url(BASE_URL)
        .event_sink(Arc::new(composite))
        .build()
        .unwrap();
    let transport = ScriptedTransport::new(vec![empty_reply(503), json_reply(200, json!({}))]);
    let exec = RequestExecutor::new(Arc::new(config), transport);

    exec.execute(&Operation::get("/workflows")).await.unwrap();
    assert_eq!(first.events(), second.events());
    assert_eq!(retry_delays(&first.events()), vec![Duration::from_secs(1)]);
}
