use crate::types::{CreateWorkflowRequest, StepDefinition, UpdateWorkflowRequest};
use crate::validate::input::MAX_FILE_NAME_BYTES;
use crate::validate::validator::Validator;

const MAX_WORKFLOW_NAME_BYTES: usize = MAX_FILE_NAME_BYTES;

pub fn validate_workflow_request(req: &CreateWorkflowRequest) -> Result<(), crate::ValidationError> {
    let mut v = Validator::new();
    validate_name(&mut v, &req.name);
    if req.steps.is_empty() {
        v.push("steps", "a workflow needs at least one step");
    }
    validate_steps(&mut v, &req.steps);
    v.finish()
}

pub fn validate_workflow_update(req: &UpdateWorkflowRequest) -> Result<(), crate::ValidationError> {
    let mut v = Validator::new();
    if let Some(name) = &req.name {
        validate_name(&mut v, name);
    }
    if let Some(steps) = &req.steps {
        if steps.is_empty() {
            v.push("steps", "must not be empty when provided");
        }
        validate_steps(&mut v, steps);
    }
    v.finish()
}

fn validate_name(v: &mut Validator, name: &str) {
    if name.trim().is_empty() {
        v.push("name", "must not be empty");
    } else if name.len() > MAX_WORKFLOW_NAME_BYTES {
        v.push("name", format!("must be at most {MAX_WORKFLOW_NAME_BYTES} bytes"));
    }
}

// Code-step contents are checked by the step processor, which reports the step index.
fn validate_steps(v: &mut Validator, steps: &[StepDefinition]) {
    for (idx, step) in steps.iter().enumerate() {
        let path = format!("steps[{idx}]");
        if step.step_type.trim().is_empty() {
            v.push(format!("{path}.type"), "must not be empty");
        }
        if !step.config.is_object() {
            v.push(format!("{path}.config"), "must be an object");
        }
        if let Some(name) = &step.name {
            if name.trim().is_empty() {
                v.push(format!("{path}.name"), "must not be blank when provided");
            }
        }
    }
}
