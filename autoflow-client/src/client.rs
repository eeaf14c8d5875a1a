use std::sync::Arc;

use autoflow_core::ApiError;

use crate::config::ClientConfig;
use crate::executor::{HttpTransport, ReqwestTransport, RequestExecutor};
use crate::resources::{ApiKeysApi, CodeApi, ExecutionsApi, SecretsApi, WorkflowsApi};

/// Entry point: one configured executor plus typed views over each resource.
///
/// Cloning is cheap and clones share the same connection pool.
#[derive(Clone)]
pub struct AutoflowClient {
    executor: Arc<RequestExecutor>,
}

impl AutoflowClient {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new()?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    pub fn from_env() -> Result<Self, ApiError> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn with_transport(config: ClientConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            executor: Arc::new(RequestExecutor::new(Arc::new(config), transport)),
        }
    }

    pub fn executor(&self) -> &RequestExecutor {
        &self.executor
    }

    pub fn workflows(&self) -> WorkflowsApi<'_> {
        WorkflowsApi::new(&self.executor)
    }

    pub fn executions(&self) -> ExecutionsApi<'_> {
        ExecutionsApi::new(&self.executor)
    }

    pub fn secrets(&self) -> SecretsApi<'_> {
        SecretsApi::new(&self.executor)
    }

    pub fn api_keys(&self) -> ApiKeysApi<'_> {
        ApiKeysApi::new(&self.executor)
    }

    pub fn code(&self) -> CodeApi<'_> {
        CodeApi::new(&self.executor)
    }
}
