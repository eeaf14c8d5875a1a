use autoflow_core::ExecutionListParams;
use serde::Serialize;

use crate::cmd::config::build_client;
use crate::commands::ExecutionsCommand;
use crate::output::finish;
use crate::{ConnectionArgs, OutputArgs};

#[derive(Serialize)]
struct CancelResult {
    id: String,
    cancelled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<String>,
}

pub async fn executions_cmd(command: ExecutionsCommand, conn: &ConnectionArgs, output: OutputArgs) -> i32 {
    let client = match build_client(conn, &output) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let api = client.executions();

    match command {
        ExecutionsCommand::List {
            workflow_id,
            status,
            page,
        } => {
            let params = ExecutionListParams {
                workflow_id,
                status: status.map(Into::into),
                page: page.page,
                limit: page.limit,
            };
            finish(&output, api.list(params).await)
        }
        ExecutionsCommand::Get { id } => finish(&output, api.get(&id).await),
        ExecutionsCommand::Cancel { id } => {
            let result = api.cancel(&id).await.map(|echoed| CancelResult {
                id: id.clone(),
                cancelled: true,
                status: echoed.map(|e| e.status.as_str().to_string()),
            });
            finish(&output, result)
        }
    }
}
