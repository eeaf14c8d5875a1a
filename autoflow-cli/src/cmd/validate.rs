use std::path::Path;

use autoflow_core::{parse_workflow_str, DocumentFormat, ParseError, Validate, CODE_STEP_TYPE};
use autoflow_client::orchestrator::prepare_code_step;
use serde::Serialize;

use crate::cmd::config::read_file;
use crate::exit_codes;
use crate::output::{print_error, print_result, OutputFormat};
use crate::OutputArgs;

#[derive(Serialize)]
struct ValidateResult {
    valid: bool,
    format: String,
    steps: usize,
    code_steps: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
}

pub async fn validate_cmd(path: &Path, output: OutputArgs) -> i32 {
    let content = match read_file(path, &output) {
        Ok(v) => v,
        Err(code) => return code,
    };

    let parsed = match parse_workflow_str(&content, DocumentFormat::Auto) {
        Ok(p) => p,
        Err(ParseError::Json(e)) => {
            print_error(output.format, output.quiet, &format!("JSON parse failed: {e}"));
            return exit_codes::VALIDATION_FAILED;
        }
        Err(ParseError::Yaml(e)) => {
            print_error(output.format, output.quiet, &format!("YAML parse failed: {e}"));
            return exit_codes::VALIDATION_FAILED;
        }
    };
    let workflow = &parsed.workflow;

    let mut errors: Vec<String> = match workflow.validate() {
        Ok(()) => vec![],
        Err(err) => err.violations.iter().map(ToString::to_string).collect(),
    };
    // Same checks the client runs before uploading, without the upload.
    for (idx, step) in workflow.steps.iter().enumerate() {
        if step.is_code() {
            if let Err(e) = prepare_code_step(idx + 1, step) {
                errors.push(e.message);
            }
        }
    }

    let result = ValidateResult {
        valid: errors.is_empty(),
        format: format!("{:?}", parsed.format),
        steps: workflow.steps.len(),
        code_steps: workflow
            .steps
            .iter()
            .filter(|s| s.step_type == CODE_STEP_TYPE)
            .count(),
        errors,
    };

    if output.format == OutputFormat::Text && !output.quiet {
        if result.valid {
            println!(
                "ok: valid workflow '{}' ({} steps, {} with code, {})",
                workflow.name, result.steps, result.code_steps, result.format
            );
        } else {
            eprintln!("error: validation failed");
            for e in &result.errors {
                eprintln!("- {e}");
            }
        }
    } else {
        print_result(output.format, output.quiet, &result);
    }

    if result.valid {
        exit_codes::SUCCESS
    } else {
        exit_codes::VALIDATION_FAILED
    }
}
