mod steps;

use async_trait::async_trait;
use autoflow_core::{ApiError, Runtime, UploadedCode};

pub use steps::{
    default_file_name, prepare_code_step, rewrite_code_step, PreparedCode, StepProcessor,
    StepRejection,
};

/// Stores step source code and hands back an opaque key.
#[async_trait]
pub trait CodeUploader: Send + Sync {
    async fn upload(
        &self,
        file_name: &str,
        content: &str,
        runtime: Runtime,
    ) -> Result<UploadedCode, ApiError>;
}
