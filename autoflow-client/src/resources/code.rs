use async_trait::async_trait;
use autoflow_core::validate::{validate_content_size, validate_file_name};
use autoflow_core::{ApiError, CodeArtifact, Runtime, UploadedCode};
use serde_json::json;

use crate::endpoints;
use crate::executor::{Operation, RequestExecutor};
use crate::orchestrator::CodeUploader;

/// `/code`: storage for step source files.
#[derive(Clone, Copy)]
pub struct CodeApi<'a> {
    executor: &'a RequestExecutor,
}

impl<'a> CodeApi<'a> {
    pub fn new(executor: &'a RequestExecutor) -> Self {
        Self { executor }
    }

    pub async fn upload(
        &self,
        file_name: &str,
        content: &str,
        runtime: Runtime,
    ) -> Result<UploadedCode, ApiError> {
        validate_file_name(file_name)?;
        if content.trim().is_empty() {
            return Err(ApiError::validation("content must not be empty", None));
        }
        validate_content_size(content)?;

        let op = Operation::post(endpoints::CODE).body(json!({
            "fileName": file_name,
            "content": content,
            "language": runtime.as_str(),
        }));
        self.executor.execute_value(&op).await
    }

    pub async fn get(&self, key: &str) -> Result<CodeArtifact, ApiError> {
        let op = Operation::get(endpoints::code(key)?);
        self.executor.execute_value(&op).await
    }

    pub async fn delete(&self, key: &str) -> Result<(), ApiError> {
        let op = Operation::delete(endpoints::code(key)?);
        self.executor.execute_unit(&op).await
    }
}

#[async_trait]
impl CodeUploader for CodeApi<'_> {
    async fn upload(
        &self,
        file_name: &str,
        content: &str,
        runtime: Runtime,
    ) -> Result<UploadedCode, ApiError> {
        CodeApi::upload(self, file_name, content, runtime).await
    }
}
