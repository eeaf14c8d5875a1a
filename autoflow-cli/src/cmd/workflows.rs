use autoflow_core::{
    CreateWorkflowRequest, ExecuteWorkflowRequest, ListParams, Page, UpdateWorkflowRequest,
    Workflow,
};

use crate::cmd::config::{build_client, load_document, load_input};
use crate::commands::WorkflowsCommand;
use crate::exit_codes;
use crate::output::{finish, finish_unit, report_api_error, OutputFormat};
use crate::{ConnectionArgs, OutputArgs};

pub async fn workflows_cmd(command: WorkflowsCommand, conn: &ConnectionArgs, output: OutputArgs) -> i32 {
    let client = match build_client(conn, &output) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let api = client.workflows();

    match command {
        WorkflowsCommand::List { page } => {
            let params = ListParams {
                page: page.page,
                limit: page.limit,
            };
            match api.list(params).await {
                Ok(list) => {
                    print_list(&output, &list);
                    exit_codes::SUCCESS
                }
                Err(e) => report_api_error(&output, &e),
            }
        }
        WorkflowsCommand::Get { id } => finish(&output, api.get(&id).await),
        WorkflowsCommand::Create { path } => {
            let req = match load_document::<CreateWorkflowRequest>(&path, &output) {
                Ok(r) => r,
                Err(code) => return code,
            };
            finish(&output, api.create(req).await)
        }
        WorkflowsCommand::Update { id, path } => {
            let req = match load_document::<UpdateWorkflowRequest>(&path, &output) {
                Ok(r) => r,
                Err(code) => return code,
            };
            finish(&output, api.update(&id, req).await)
        }
        WorkflowsCommand::Delete { id } => {
            finish_unit(&output, api.delete(&id).await, &format!("deleted workflow {id}"))
        }
        WorkflowsCommand::Execute {
            id,
            input,
            set_inputs,
        } => {
            let input = match load_input(input.as_deref(), &set_inputs, &output) {
                Ok(i) => i,
                Err(code) => return code,
            };
            finish(&output, api.execute(&id, ExecuteWorkflowRequest { input }).await)
        }
        WorkflowsCommand::Activate { id } => finish(&output, api.activate(&id).await),
        WorkflowsCommand::Deactivate { id } => finish(&output, api.deactivate(&id).await),
    }
}

fn print_list(output: &OutputArgs, list: &Page<Workflow>) {
    if output.quiet {
        return;
    }
    match output.format {
        OutputFormat::Text => {
            if list.items.is_empty() {
                println!("no workflows");
            }
            for w in &list.items {
                let state = if w.active { "active" } else { "inactive" };
                println!("  - {} {} ({} steps, {state})", w.id, w.name, w.steps.len());
            }
            if let Some(total) = list.total {
                println!("total: {total}");
            }
        }
        OutputFormat::Json => crate::output::print_result(output.format, false, list),
    }
}
