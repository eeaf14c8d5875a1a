use std::collections::BTreeMap;
use std::time::Duration;

use autoflow_core::DEFAULT_RETRY_AFTER;

/// Reads `Retry-After` as whole seconds. Missing or non-numeric values
/// (including HTTP-dates) yield [`DEFAULT_RETRY_AFTER`].
pub fn parse_retry_after(headers: &BTreeMap<String, String>) -> Duration {
    get_header_ci(headers, "retry-after")
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_RETRY_AFTER)
}

pub(crate) fn get_header_ci<'a>(headers: &'a BTreeMap<String, String>, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}
