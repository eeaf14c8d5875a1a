mod input;
mod validator;
mod workflow;

pub use input::{
    validate_api_key, validate_content_size, validate_file_name, validate_path_segment,
    validate_secret_name, MAX_API_KEY_BYTES, MAX_CODE_BYTES, MAX_FILE_NAME_BYTES,
    MAX_SECRET_NAME_BYTES,
};
pub use validator::Validator;
pub use workflow::{validate_workflow_request, validate_workflow_update};

use crate::error::ValidationError;
use crate::types::{CreateWorkflowRequest, UpdateWorkflowRequest};

pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

impl Validate for CreateWorkflowRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_workflow_request(self)
    }
}

impl Validate for UpdateWorkflowRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_workflow_update(self)
    }
}
