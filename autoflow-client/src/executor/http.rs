use std::collections::BTreeMap;

use async_trait::async_trait;
use autoflow_core::ApiError;

use crate::executor::HttpMethod;

/// Default cap on buffered response bodies.
pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct HttpRequestParts {
    pub method: HttpMethod,
    pub url: url::Url,
    pub headers: BTreeMap<String, String>,
    pub body: Option<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponseParts {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

impl HttpResponseParts {
    pub fn header(&self, name: &str) -> Option<&str> {
        crate::retry::get_header_ci(&self.headers, name)
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    #[error("timeout")]
    Timeout,
    #[error("connect/dns/tls error: {0}")]
    Network(String),
    #[error("response too large (>{max_bytes} bytes)")]
    ResponseTooLarge { max_bytes: usize },
    #[error("http error: {0}")]
    Other(String),
}

/// The network boundary. The executor enforces deadlines and cancellation by
/// dropping the returned future, so implementations need no timers of their own.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, req: HttpRequestParts) -> Result<HttpResponseParts, TransportError>;
}

pub struct ReqwestTransport {
    client: reqwest::Client,
    max_response_bytes: usize,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, ApiError> {
        // 3xx responses are returned as-is and classified as errors.
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| ApiError::configuration(format!("failed to create HTTP client: {e}")))?;
        Ok(Self::from_client(client))
    }

    pub fn from_client(client: reqwest::Client) -> Self {
        Self {
            client,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
        }
    }

    pub fn with_max_response_bytes(mut self, max_response_bytes: usize) -> Self {
        self.max_response_bytes = max_response_bytes;
        self
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, req: HttpRequestParts) -> Result<HttpResponseParts, TransportError> {
        let method = match req.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };
        let mut rb = self.client.request(method, req.url);

        for (k, v) in req.headers {
            rb = rb.header(k, v);
        }
        if let Some(body) = req.body {
            rb = rb.body(body);
        }

        let resp = rb.send().await.map_err(map_reqwest_error)?;
        let status = resp.status().as_u16();

        let mut headers = BTreeMap::new();
        for (k, v) in resp.headers().iter() {
            if let Ok(s) = v.to_str() {
                headers.insert(k.to_string(), s.to_string());
            }
        }

        if let Some(len) = resp.content_length() {
            if len > self.max_response_bytes as u64 {
                return Err(TransportError::ResponseTooLarge {
                    max_bytes: self.max_response_bytes,
                });
            }
        }
        let body = resp.bytes().await.map_err(map_reqwest_error)?;
        if body.len() > self.max_response_bytes {
            return Err(TransportError::ResponseTooLarge {
                max_bytes: self.max_response_bytes,
            });
        }

        Ok(HttpResponseParts {
            status,
            headers,
            body: body.to_vec(),
        })
    }
}

fn map_reqwest_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        return TransportError::Timeout;
    }
    // A connection dropped mid-body surfaces as a body or decode error.
    if e.is_connect() || e.is_request() || e.is_body() || e.is_decode() {
        return TransportError::Network(e.to_string());
    }
    TransportError::Other(e.to_string())
}
