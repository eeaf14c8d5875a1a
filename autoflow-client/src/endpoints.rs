//! Endpoint paths, relative to the configured base URL.

use autoflow_core::validate::validate_path_segment;
use autoflow_core::ApiError;

pub const WORKFLOWS: &str = "/workflows";
pub const EXECUTIONS: &str = "/executions";
pub const SECRETS: &str = "/secrets";
pub const API_KEYS: &str = "/api-keys";
pub const CODE: &str = "/code";

pub fn workflow(id: &str) -> Result<String, ApiError> {
    item(WORKFLOWS, "workflowId", id)
}

pub fn workflow_execute(id: &str) -> Result<String, ApiError> {
    Ok(format!("{}/execute", workflow(id)?))
}

pub fn workflow_activate(id: &str) -> Result<String, ApiError> {
    Ok(format!("{}/activate", workflow(id)?))
}

pub fn workflow_deactivate(id: &str) -> Result<String, ApiError> {
    Ok(format!("{}/deactivate", workflow(id)?))
}

pub fn execution(id: &str) -> Result<String, ApiError> {
    item(EXECUTIONS, "executionId", id)
}

pub fn execution_cancel(id: &str) -> Result<String, ApiError> {
    Ok(format!("{}/cancel", execution(id)?))
}

pub fn secret(name: &str) -> Result<String, ApiError> {
    item(SECRETS, "name", name)
}

pub fn api_key(id: &str) -> Result<String, ApiError> {
    item(API_KEYS, "apiKeyId", id)
}

pub fn code(key: &str) -> Result<String, ApiError> {
    item(CODE, "key", key)
}

fn item(collection: &str, field: &str, value: &str) -> Result<String, ApiError> {
    validate_path_segment(field, value)?;
    Ok(format!("{collection}/{}", urlencoding::encode(value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_path_segments() {
        assert_eq!(workflow("wf 1").unwrap(), "/workflows/wf%201");
        assert_eq!(execution_cancel("ex_9").unwrap(), "/executions/ex_9/cancel");
    }

    #[test]
    fn rejects_empty_and_nested_segments() {
        assert!(secret("").is_err());
        assert!(code("a/b").is_err());
        assert!(code(".").is_err());
        assert!(workflow("..").is_err());
        assert!(workflow_execute("..").is_err());
        assert_eq!(workflow("wf..1").unwrap(), "/workflows/wf..1");
    }
}
