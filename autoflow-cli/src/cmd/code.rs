use std::path::Path;
use std::str::FromStr;

use autoflow_core::{ApiError, Runtime};

use crate::cmd::config::{build_client, read_file};
use crate::commands::CodeCommand;
use crate::output::{finish, finish_unit, report_api_error};
use crate::{ConnectionArgs, OutputArgs};

pub async fn code_cmd(command: CodeCommand, conn: &ConnectionArgs, output: OutputArgs) -> i32 {
    match command {
        CodeCommand::Upload {
            path,
            runtime,
            name,
        } => {
            let runtime = match resolve_runtime(&path, runtime.as_deref()) {
                Ok(r) => r,
                Err(e) => return report_api_error(&output, &e),
            };
            let file_name = match name.or_else(|| {
                path.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
            }) {
                Some(n) => n,
                None => {
                    let err = ApiError::validation("cannot derive a file name; pass --name", None);
                    return report_api_error(&output, &err);
                }
            };
            let content = match read_file(&path, &output) {
                Ok(c) => c,
                Err(code) => return code,
            };
            let client = match build_client(conn, &output) {
                Ok(c) => c,
                Err(code) => return code,
            };
            finish(&output, client.code().upload(&file_name, &content, runtime).await)
        }
        CodeCommand::Get { key } => {
            let client = match build_client(conn, &output) {
                Ok(c) => c,
                Err(code) => return code,
            };
            finish(&output, client.code().get(&key).await)
        }
        CodeCommand::Delete { key } => {
            let client = match build_client(conn, &output) {
                Ok(c) => c,
                Err(code) => return code,
            };
            let done = format!("deleted code {key}");
            finish_unit(&output, client.code().delete(&key).await, &done)
        }
    }
}

/// Explicit `--runtime` wins; otherwise the file extension decides.
fn resolve_runtime(path: &Path, flag: Option<&str>) -> Result<Runtime, ApiError> {
    if let Some(raw) = flag {
        return Runtime::from_str(raw).map_err(|e| ApiError::validation(e.to_string(), None));
    }
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    Runtime::ALL
        .into_iter()
        .find(|r| r.extension() == ext)
        .ok_or_else(|| {
            ApiError::validation(
                format!(
                    "cannot infer runtime from '{}'; pass --runtime ({})",
                    path.display(),
                    Runtime::supported_list()
                ),
                None,
            )
        })
}
