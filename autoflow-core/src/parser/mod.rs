use serde::de::DeserializeOwned;

use crate::error::ParseError;
use crate::types::CreateWorkflowRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    Auto,
}

#[derive(Debug, Clone)]
pub struct ParsedWorkflow {
    pub workflow: CreateWorkflowRequest,
    pub format: DocumentFormat,
}

/// Parses a workflow definition file (the body of a create request).
pub fn parse_workflow_str(input: &str, format: DocumentFormat) -> Result<ParsedWorkflow, ParseError> {
    let (workflow, format) = parse_str::<CreateWorkflowRequest>(input, format)?;
    Ok(ParsedWorkflow { workflow, format })
}

/// Parses any JSON or YAML document, reporting which format matched.
pub fn parse_str<T: DeserializeOwned>(
    input: &str,
    format: DocumentFormat,
) -> Result<(T, DocumentFormat), ParseError> {
    match format {
        DocumentFormat::Json => Ok((serde_json::from_str(input)?, format)),
        DocumentFormat::Yaml => Ok((serde_yaml::from_str(input)?, format)),
        DocumentFormat::Auto => parse_auto(input),
    }
}

fn parse_auto<T: DeserializeOwned>(input: &str) -> Result<(T, DocumentFormat), ParseError> {
    // JSON always starts with `{` or `[` after trimming.
    let trimmed = input.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return match serde_json::from_str(input) {
            Ok(v) => Ok((v, DocumentFormat::Json)),
            Err(e) => match serde_yaml::from_str(input) {
                Ok(v) => Ok((v, DocumentFormat::Yaml)),
                Err(_) => Err(ParseError::Json(e)),
            },
        };
    }

    match serde_yaml::from_str(input) {
        Ok(v) => Ok((v, DocumentFormat::Yaml)),
        Err(e) => match serde_json::from_str(input) {
            Ok(v) => Ok((v, DocumentFormat::Json)),
            Err(_) => Err(ParseError::Yaml(e)),
        },
    }
}
