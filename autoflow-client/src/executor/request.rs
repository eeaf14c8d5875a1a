use std::collections::BTreeMap;

use autoflow_core::ApiError;
use url::Url;
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::executor::{HttpMethod, HttpRequestParts, Operation};

pub const REQUEST_ID_HEADER: &str = "X-Request-ID";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Base URL + operation path + query string. The base path prefix (e.g. `/v1`) is kept.
pub fn build_url(base: &Url, op: &Operation) -> Result<Url, ApiError> {
    let base = base.as_str().trim_end_matches('/');
    let path = op.path();
    let joined = if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    };

    let mut url = Url::parse(&joined)
        .map_err(|e| ApiError::validation(format!("invalid request path '{path}': {e}"), None))?;

    if !op.query_params().is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (k, v) in op.query_params() {
            pairs.append_pair(k, &v.to_string());
        }
    }
    Ok(url)
}

/// Standard headers for one attempt. `request_id` must be fresh per attempt.
pub fn build_headers(config: &ClientConfig, request_id: Uuid) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();
    headers.insert("Authorization".to_string(), config.bearer_token());
    headers.insert("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string());
    headers.insert("Accept".to_string(), JSON_CONTENT_TYPE.to_string());
    headers.insert("User-Agent".to_string(), config.user_agent.clone());
    headers.insert("Cache-Control".to_string(), "no-cache".to_string());
    headers.insert("X-Content-Type-Options".to_string(), "nosniff".to_string());
    headers.insert(REQUEST_ID_HEADER.to_string(), request_id.to_string());
    headers
}

pub(crate) fn build_request(
    config: &ClientConfig,
    method: HttpMethod,
    url: &Url,
    body: Option<&[u8]>,
    request_id: Uuid,
) -> HttpRequestParts {
    HttpRequestParts {
        method,
        url: url.clone(),
        headers: build_headers(config, request_id),
        body: body.map(<[u8]>::to_vec),
    }
}
