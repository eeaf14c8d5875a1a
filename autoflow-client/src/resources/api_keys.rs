use autoflow_core::{ApiError, ApiKey, CreateApiKeyRequest, CreatedApiKey, Page};

use crate::endpoints;
use crate::executor::{Operation, RequestExecutor};

/// `/api-keys`.
#[derive(Clone, Copy)]
pub struct ApiKeysApi<'a> {
    executor: &'a RequestExecutor,
}

impl<'a> ApiKeysApi<'a> {
    pub fn new(executor: &'a RequestExecutor) -> Self {
        Self { executor }
    }

    pub async fn list(&self) -> Result<Page<ApiKey>, ApiError> {
        let op = Operation::get(endpoints::API_KEYS);
        Ok(self.executor.execute_json(&op).await?.unwrap_or_default())
    }

    pub async fn create(&self, req: CreateApiKeyRequest) -> Result<CreatedApiKey, ApiError> {
        if req.name.trim().is_empty() {
            return Err(ApiError::validation("name must not be empty", None));
        }
        let op = Operation::post(endpoints::API_KEYS).json(&req)?;
        self.executor.execute_value(&op).await
    }

    pub async fn revoke(&self, id: &str) -> Result<(), ApiError> {
        let op = Operation::delete(endpoints::api_key(id)?);
        self.executor.execute_unit(&op).await
    }
}
