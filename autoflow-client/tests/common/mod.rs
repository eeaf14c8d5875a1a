#![allow(dead_code)]

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use autoflow_client::executor::{HttpRequestParts, HttpResponseParts, HttpTransport, TransportError};
use autoflow_client::{ClientConfig, RecordingEventSink, RequestExecutor, RetryConfig};
use serde_json::Value as JsonValue;

pub const API_KEY: &str = "af_test_0123456789";
pub const BASE_URL: &str = "https://api.test.local/v1";

#[derive(Debug, Clone)]
pub enum Reply {
    Respond(HttpResponseParts),
    Fail(TransportError),
    /// Never completes; the executor must time out or be cancelled.
    Hang,
}

pub fn json_reply(status: u16, body: JsonValue) -> Reply {
    let mut headers = BTreeMap::new();
    headers.insert("content-type".to_string(), "application/json".to_string());
    Reply::Respond(HttpResponseParts {
        status,
        headers,
        body: serde_json::to_vec(&body).unwrap(),
    })
}

pub fn raw_reply(status: u16, headers: &[(&str, &str)], body: &[u8]) -> Reply {
    Reply::Respond(HttpResponseParts {
        status,
        headers: headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        body: body.to_vec(),
    })
}

pub fn empty_reply(status: u16) -> Reply {
    raw_reply(status, &[], b"")
}

/// Replies from a fixed script, in order, and records every request it sees.
#[derive(Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<HttpRequestParts>>,
}

impl ScriptedTransport {
    pub fn new(replies: Vec<Reply>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<HttpRequestParts> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, req: HttpRequestParts) -> Result<HttpResponseParts, TransportError> {
        self.requests.lock().unwrap().push(req);
        let next = self.script.lock().unwrap().pop_front();
        play(next).await
    }
}

/// Replies by inspecting each request; used where call order matters less than routing.
pub struct RoutedTransport {
    route: Box<dyn Fn(&HttpRequestParts) -> Reply + Send + Sync>,
    requests: Mutex<Vec<HttpRequestParts>>,
}

impl RoutedTransport {
    pub fn new(route: impl Fn(&HttpRequestParts) -> Reply + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self {
            route: Box::new(route),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<HttpRequestParts> {
        self.requests.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| format!("{} {}", r.method, r.url.path()))
            .collect()
    }
}

#[async_trait]
impl HttpTransport for RoutedTransport {
    async fn send(&self, req: HttpRequestParts) -> Result<HttpResponseParts, TransportError> {
        let reply = (self.route)(&req);
        self.requests.lock().unwrap().push(req);
        play(Some(reply)).await
    }
}

async fn play(reply: Option<Reply>) -> Result<HttpResponseParts, TransportError> {
    match reply {
        Some(Reply::Respond(resp)) => Ok(resp),
        Some(Reply::Fail(err)) => Err(err),
        Some(Reply::Hang) => std::future::pending().await,
        None => Err(TransportError::Other("script exhausted".to_string())),
    }
}

pub fn config_with(events: Arc<RecordingEventSink>, retry: RetryConfig) -> ClientConfig {
    ClientConfig::builder(API_KEY)
        .base_url(BASE_URL)
        .retry(retry)
        .event_sink(events)
        .build()
        .unwrap()
}

pub fn executor(transport: Arc<dyn HttpTransport>) -> (RequestExecutor, Arc<RecordingEventSink>) {
    executor_with_retry(transport, RetryConfig::default())
}

pub fn executor_with_retry(
    transport: Arc<dyn HttpTransport>,
    retry: RetryConfig,
) -> (RequestExecutor, Arc<RecordingEventSink>) {
    let events = Arc::new(RecordingEventSink::new());
    let config = config_with(events.clone(), retry);
    (RequestExecutor::new(Arc::new(config), transport), events)
}

pub fn body_json(req: &HttpRequestParts) -> JsonValue {
    serde_json::from_slice(req.body.as_deref().unwrap_or(b"null")).unwrap()
}
