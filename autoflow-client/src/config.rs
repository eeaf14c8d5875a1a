use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use autoflow_core::validate::validate_api_key;
use autoflow_core::ApiError;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::events::{Event, EventSink, TracingEventSink};
use crate::retry::RetryConfig;

pub const DEFAULT_BASE_URL: &str = "https://api.autoflow.dev/v1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const ENV_API_KEY: &str = "AUTOFLOW_API_KEY";
pub const ENV_BASE_URL: &str = "AUTOFLOW_BASE_URL";
pub const ENV_TIMEOUT_MS: &str = "AUTOFLOW_TIMEOUT_MS";
pub const ENV_ALLOW_INSECURE: &str = "AUTOFLOW_ALLOW_INSECURE";

/// Read-only client settings, shared by every operation.
#[derive(Clone)]
pub struct ClientConfig {
    base_url: Url,
    api_key: SecretString,
    pub timeout: Duration,
    pub user_agent: String,
    pub retry: RetryConfig,
    pub events: Arc<dyn EventSink>,
}

impl ClientConfig {
    pub fn builder(api_key: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder::new(api_key)
    }

    /// Builds a config from `AUTOFLOW_*` environment variables.
    pub fn from_env() -> Result<Self, ApiError> {
        let api_key = std::env::var(ENV_API_KEY).map_err(|_| {
            ApiError::configuration(format!("{ENV_API_KEY} is not set"))
        })?;
        ClientConfigBuilder::new(api_key).apply_env()?.build()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn bearer_token(&self) -> String {
        format!("Bearer {}", self.api_key.expose_secret())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

pub struct ClientConfigBuilder {
    api_key: SecretString,
    base_url: String,
    timeout: Duration,
    user_agent: String,
    retry: RetryConfig,
    allow_insecure: bool,
    events: Arc<dyn EventSink>,
}

impl fmt::Debug for ClientConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfigBuilder")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("retry", &self.retry)
            .field("allow_insecure", &self.allow_insecure)
            .finish_non_exhaustive()
    }
}

impl ClientConfigBuilder {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("autoflow-client/", env!("CARGO_PKG_VERSION")).to_string(),
            retry: RetryConfig::default(),
            allow_insecure: false,
            events: Arc::new(TracingEventSink),
        }
    }

    /// Overlays `AUTOFLOW_BASE_URL`, `AUTOFLOW_TIMEOUT_MS` and `AUTOFLOW_ALLOW_INSECURE`
    /// when set. The API key is left alone.
    pub fn apply_env(mut self) -> Result<Self, ApiError> {
        if let Ok(base_url) = std::env::var(ENV_BASE_URL) {
            self = self.base_url(base_url);
        }
        if let Ok(raw) = std::env::var(ENV_TIMEOUT_MS) {
            let ms = raw.trim().parse::<u64>().map_err(|_| {
                ApiError::configuration(format!("{ENV_TIMEOUT_MS} must be an integer, got '{raw}'"))
            })?;
            self = self.timeout(Duration::from_millis(ms));
        }
        if let Ok(raw) = std::env::var(ENV_ALLOW_INSECURE) {
            self = self.allow_insecure(matches!(raw.trim(), "1" | "true" | "yes"));
        }
        Ok(self)
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Permit plain `http://` to non-loopback hosts. A warning is emitted at build time.
    pub fn allow_insecure(mut self, allow: bool) -> Self {
        self.allow_insecure = allow;
        self
    }

    pub fn event_sink(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    pub fn build(self) -> Result<ClientConfig, ApiError> {
        validate_api_key(self.api_key.expose_secret().trim()).map_err(|e| {
            let reason = e
                .violations
                .first()
                .map(|v| v.message.clone())
                .unwrap_or_default();
            ApiError::configuration(format!("invalid API key: {reason}"))
        })?;

        if self.timeout.is_zero() {
            return Err(ApiError::configuration("timeout must be greater than zero"));
        }
        if self.retry.max_attempts == 0 {
            return Err(ApiError::configuration("retry.max_attempts must be at least 1"));
        }

        let base_url = validate_base_url(&self.base_url, self.allow_insecure)?;
        if base_url.scheme() == "http" && !is_loopback_url(&base_url) {
            self.events.emit(Event::InsecureTransport {
                base_url: base_url.to_string(),
            });
        }

        Ok(ClientConfig {
            base_url,
            api_key: SecretString::from(self.api_key.expose_secret().trim().to_string()),
            timeout: self.timeout,
            user_agent: self.user_agent,
            retry: self.retry,
            events: self.events,
        })
    }
}

/// Rules:
/// - scheme must be `https` or `http`
/// - `http` is only accepted for loopback hosts unless `allow_insecure` is set
/// - no credentials, query or fragment in the base URL
pub fn validate_base_url(raw: &str, allow_insecure: bool) -> Result<Url, ApiError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ApiError::configuration(format!("invalid base URL '{raw}': {e}")))?;

    if url.host_str().is_none() {
        return Err(ApiError::configuration(format!("base URL '{raw}' must include a host")));
    }
    if !url.username().is_empty() || url.password().is_some() {
        return Err(ApiError::configuration("base URL must not embed credentials"));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(ApiError::configuration("base URL must not contain a query or fragment"));
    }

    match url.scheme() {
        "https" => Ok(url),
        "http" if is_loopback_url(&url) || allow_insecure => Ok(url),
        "http" => Err(ApiError::configuration(format!(
            "base URL must use https for non-loopback hosts; got '{raw}' (set allow_insecure to override)"
        ))),
        other => Err(ApiError::configuration(format!(
            "unsupported base URL scheme '{other}://'"
        ))),
    }
}

fn is_loopback_url(url: &Url) -> bool {
    match url.host() {
        Some(url::Host::Domain(d)) => d.eq_ignore_ascii_case("localhost"),
        Some(url::Host::Ipv4(ip)) => IpAddr::V4(ip).is_loopback(),
        Some(url::Host::Ipv6(ip)) => IpAddr::V6(ip).is_loopback(),
        None => false,
    }
}
