use std::str::FromStr;

use autoflow_core::validate::{validate_content_size, validate_file_name};
use autoflow_core::{code_config, ApiError, Runtime, StepDefinition};
use serde_json::{json, Value as JsonValue};

use crate::events::{Event, EventSink};
use crate::orchestrator::CodeUploader;

/// Why a code step was rejected; `as_str` is the machine-readable reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepRejection {
    InvalidConfig,
    MissingRuntime,
    UnsupportedRuntime,
    MissingCode,
    InvalidFileName,
    CodeTooLarge,
}

impl StepRejection {
    pub fn as_str(self) -> &'static str {
        match self {
            StepRejection::InvalidConfig => "invalid_config",
            StepRejection::MissingRuntime => "missing_runtime",
            StepRejection::UnsupportedRuntime => "unsupported_runtime",
            StepRejection::MissingCode => "missing_code",
            StepRejection::InvalidFileName => "invalid_file_name",
            StepRejection::CodeTooLarge => "code_too_large",
        }
    }
}

/// A code step that passed validation and is ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedCode {
    /// 1-based position in the workflow.
    pub position: usize,
    pub runtime: Runtime,
    pub file_name: String,
    pub code: String,
}

/// Replaces inline code in workflow steps with references to uploaded artifacts.
///
/// Steps are handled strictly in order and one upload at a time. Every code
/// step is validated before the first upload, so an invalid step never leaves
/// uploads behind; an upload failure stops before any later step is uploaded.
pub struct StepProcessor<'a> {
    uploader: &'a dyn CodeUploader,
    events: &'a dyn EventSink,
}

impl<'a> StepProcessor<'a> {
    pub fn new(uploader: &'a dyn CodeUploader, events: &'a dyn EventSink) -> Self {
        Self { uploader, events }
    }

    pub async fn process_steps(&self, steps: Vec<StepDefinition>) -> Result<Vec<StepDefinition>, ApiError> {
        let mut prepared = Vec::new();
        for (idx, step) in steps.iter().enumerate() {
            if step.is_code() {
                prepared.push(prepare_code_step(idx + 1, step)?);
            }
        }

        let mut pending = prepared.into_iter();
        let mut out = Vec::with_capacity(steps.len());
        for step in steps {
            if !step.is_code() {
                out.push(step);
                continue;
            }
            let Some(code) = pending.next() else {
                return Err(ApiError::unknown("code step bookkeeping mismatch", None, None));
            };
            out.push(self.upload_step(step, code).await?);
        }
        Ok(out)
    }

    async fn upload_step(&self, step: StepDefinition, code: PreparedCode) -> Result<StepDefinition, ApiError> {
        self.events.emit(Event::CodeUploadStarted {
            step_index: code.position,
            file_name: code.file_name.clone(),
            runtime: code.runtime,
        });
        let uploaded = self
            .uploader
            .upload(&code.file_name, &code.code, code.runtime)
            .await?;
        self.events.emit(Event::CodeUploaded {
            step_index: code.position,
            key: uploaded.key.clone(),
        });
        Ok(rewrite_code_step(step, code.runtime, &uploaded.key))
    }
}

/// Validates a code step at 1-based `position` and extracts what the upload needs.
pub fn prepare_code_step(position: usize, step: &StepDefinition) -> Result<PreparedCode, ApiError> {
    let Some(config) = step.config.as_object() else {
        return Err(rejection(position, StepRejection::InvalidConfig, "config must be an object"));
    };

    let runtime = match config.get(code_config::RUNTIME).and_then(JsonValue::as_str) {
        None => {
            return Err(rejection(
                position,
                StepRejection::MissingRuntime,
                format!("code steps require a runtime ({})", Runtime::supported_list()),
            ))
        }
        Some(raw) if raw.trim().is_empty() => {
            return Err(rejection(
                position,
                StepRejection::MissingRuntime,
                format!("code steps require a runtime ({})", Runtime::supported_list()),
            ))
        }
        Some(raw) => Runtime::from_str(raw)
            .map_err(|e| rejection(position, StepRejection::UnsupportedRuntime, e.to_string()))?,
    };

    let code = match config.get(code_config::CODE).and_then(JsonValue::as_str) {
        Some(code) if !code.trim().is_empty() => code.to_string(),
        _ => {
            return Err(rejection(
                position,
                StepRejection::MissingCode,
                "code steps require non-empty source code",
            ))
        }
    };
    validate_content_size(&code)
        .map_err(|e| rejection(position, StepRejection::CodeTooLarge, first_message(&e)))?;

    let file_name = match config.get(code_config::FILE_NAME).and_then(JsonValue::as_str) {
        Some(name) => {
            validate_file_name(name).map_err(|e| {
                rejection(position, StepRejection::InvalidFileName, first_message(&e))
            })?;
            name.to_string()
        }
        None => default_file_name(position, runtime),
    };

    Ok(PreparedCode {
        position,
        runtime,
        file_name,
        code,
    })
}

/// `step_<position>.<ext>`
pub fn default_file_name(position: usize, runtime: Runtime) -> String {
    format!("step_{position}.{}", runtime.extension())
}

/// Drops inline code and the file-name override, records the artifact key.
pub fn rewrite_code_step(mut step: StepDefinition, runtime: Runtime, key: &str) -> StepDefinition {
    if let Some(config) = step.config.as_object_mut() {
        config.remove(code_config::CODE);
        config.remove(code_config::FILE_NAME);
        config.insert(
            code_config::RUNTIME.to_string(),
            JsonValue::String(runtime.as_str().to_string()),
        );
        config.insert(code_config::CODE_KEY.to_string(), JsonValue::String(key.to_string()));
    }
    step
}

fn rejection(position: usize, reason: StepRejection, message: impl Into<String>) -> ApiError {
    let message = message.into();
    ApiError::validation(
        format!("step {position}: {message}"),
        Some(json!({ "step": position, "reason": reason.as_str() })),
    )
}

fn first_message(err: &autoflow_core::ValidationError) -> String {
    err.violations
        .first()
        .map(ToString::to_string)
        .unwrap_or_else(|| err.to_string())
}
