mod api_key;
mod code;
mod common;
mod execution;
mod secret;
mod step;
mod workflow;

pub use api_key::{ApiKey, CreateApiKeyRequest, CreatedApiKey};
pub use code::{CodeArtifact, Runtime, UnsupportedRuntime, UploadedCode};
pub use common::{ListParams, Page};
pub use execution::{Execution, ExecutionListParams, ExecutionStatus};
pub use secret::Secret;
pub use step::{code_config, StepDefinition, CODE_STEP_TYPE};
pub use workflow::{CreateWorkflowRequest, ExecuteWorkflowRequest, UpdateWorkflowRequest, Workflow};
