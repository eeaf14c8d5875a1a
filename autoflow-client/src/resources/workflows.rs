use autoflow_core::{
    ApiError, CreateWorkflowRequest, ExecuteWorkflowRequest, Execution, ListParams, Page,
    StepDefinition, UpdateWorkflowRequest, Validate, Workflow,
};

use crate::endpoints;
use crate::executor::{Operation, RequestExecutor};
use crate::orchestrator::StepProcessor;
use crate::resources::CodeApi;

/// `/workflows`.
#[derive(Clone, Copy)]
pub struct WorkflowsApi<'a> {
    executor: &'a RequestExecutor,
}

impl<'a> WorkflowsApi<'a> {
    pub fn new(executor: &'a RequestExecutor) -> Self {
        Self { executor }
    }

    pub async fn list(&self, params: ListParams) -> Result<Page<Workflow>, ApiError> {
        let op = Operation::get(endpoints::WORKFLOWS)
            .query_opt("page", params.page)
            .query_opt("limit", params.limit);
        Ok(self.executor.execute_json(&op).await?.unwrap_or_default())
    }

    pub async fn get(&self, id: &str) -> Result<Workflow, ApiError> {
        let op = Operation::get(endpoints::workflow(id)?);
        self.executor.execute_value(&op).await
    }

    /// Uploads inline step code first, then creates the workflow. Nothing is
    /// created if any code step is invalid or its upload fails.
    pub async fn create(&self, mut req: CreateWorkflowRequest) -> Result<Workflow, ApiError> {
        req.validate()?;
        req.steps = self.process_steps(req.steps).await?;
        let op = Operation::post(endpoints::WORKFLOWS).json(&req)?;
        self.executor.execute_value(&op).await
    }

    pub async fn update(&self, id: &str, mut req: UpdateWorkflowRequest) -> Result<Workflow, ApiError> {
        let path = endpoints::workflow(id)?;
        req.validate()?;
        if let Some(steps) = req.steps.take() {
            req.steps = Some(self.process_steps(steps).await?);
        }
        let op = Operation::patch(path).json(&req)?;
        self.executor.execute_value(&op).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let op = Operation::delete(endpoints::workflow(id)?);
        self.executor.execute_unit(&op).await
    }

    pub async fn execute(&self, id: &str, req: ExecuteWorkflowRequest) -> Result<Execution, ApiError> {
        let op = Operation::post(endpoints::workflow_execute(id)?).json(&req)?;
        self.executor.execute_value(&op).await
    }

    pub async fn activate(&self, id: &str) -> Result<Workflow, ApiError> {
        let op = Operation::post(endpoints::workflow_activate(id)?);
        self.executor.execute_value(&op).await
    }

    pub async fn deactivate(&self, id: &str) -> Result<Workflow, ApiError> {
        let op = Operation::post(endpoints::workflow_deactivate(id)?);
        self.executor.execute_value(&op).await
    }

    async fn process_steps(&self, steps: Vec<StepDefinition>) -> Result<Vec<StepDefinition>, ApiError> {
        let uploader = CodeApi::new(self.executor);
        let steps = StepProcessor::new(&uploader, self.executor.events())
            .process_steps(steps)
            .await?;
        if let Some(pos) = steps.iter().position(StepDefinition::has_inline_code) {
            return Err(ApiError::validation(
                format!("step {}: inline code must be uploaded before sending", pos + 1),
                None,
            ));
        }
        Ok(steps)
    }
}
