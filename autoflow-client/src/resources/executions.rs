use autoflow_core::{ApiError, Execution, ExecutionListParams, Page};

use crate::endpoints;
use crate::executor::{Operation, RequestExecutor};

/// `/executions`.
#[derive(Clone, Copy)]
pub struct ExecutionsApi<'a> {
    executor: &'a RequestExecutor,
}

impl<'a> ExecutionsApi<'a> {
    pub fn new(executor: &'a RequestExecutor) -> Self {
        Self { executor }
    }

    pub async fn list(&self, params: ExecutionListParams) -> Result<Page<Execution>, ApiError> {
        let op = Operation::get(endpoints::EXECUTIONS)
            .query_opt("workflowId", params.workflow_id)
            .query_opt("status", params.status.map(|s| s.as_str()))
            .query_opt("page", params.page)
            .query_opt("limit", params.limit);
        Ok(self.executor.execute_json(&op).await?.unwrap_or_default())
    }

    pub async fn get(&self, id: &str) -> Result<Execution, ApiError> {
        let op = Operation::get(endpoints::execution(id)?);
        self.executor.execute_value(&op).await
    }

    /// Requests cancellation. Returns the execution if the server echoes it back.
    pub async fn cancel(&self, id: &str) -> Result<Option<Execution>, ApiError> {
        let op = Operation::post(endpoints::execution_cancel(id)?);
        self.executor.execute_json(&op).await
    }
}
