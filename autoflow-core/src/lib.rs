#![forbid(unsafe_code)]

//! Domain model for the Autoflow workflow-automation API: request/response
//! types, the [`ApiError`] taxonomy, input validators and the workflow
//! definition parser. No I/O happens in this crate.

pub mod error;
pub mod parser;
pub mod types;
pub mod validate;

pub use crate::error::{ApiError, ErrorKind, ParseError, ValidationError, Violation, DEFAULT_RETRY_AFTER};
pub use crate::parser::{parse_str, parse_workflow_str, DocumentFormat, ParsedWorkflow};
pub use crate::types::{
    code_config, ApiKey, CodeArtifact, CreateApiKeyRequest, CreateWorkflowRequest, CreatedApiKey,
    ExecuteWorkflowRequest, Execution, ExecutionListParams, ExecutionStatus, ListParams, Page,
    Runtime, Secret, StepDefinition, UnsupportedRuntime, UpdateWorkflowRequest, UploadedCode,
    Workflow, CODE_STEP_TYPE,
};
pub use crate::validate::{validate_workflow_request, validate_workflow_update, Validate};
