use autoflow_core::{CreateApiKeyRequest, CreatedApiKey};

use crate::cmd::config::build_client;
use crate::commands::ApiKeysCommand;
use crate::exit_codes;
use crate::output::{finish, finish_unit, print_result, report_api_error, OutputFormat};
use crate::{ConnectionArgs, OutputArgs};

pub async fn api_keys_cmd(command: ApiKeysCommand, conn: &ConnectionArgs, output: OutputArgs) -> i32 {
    let client = match build_client(conn, &output) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let api = client.api_keys();

    match command {
        ApiKeysCommand::List => finish(&output, api.list().await),
        ApiKeysCommand::Create {
            name,
            scopes,
            expires_in_days,
        } => {
            let req = CreateApiKeyRequest {
                name,
                scopes,
                expires_in_days,
            };
            match api.create(req).await {
                Ok(created) => {
                    print_created(&output, &created);
                    exit_codes::SUCCESS
                }
                Err(e) => report_api_error(&output, &e),
            }
        }
        ApiKeysCommand::Revoke { id } => {
            finish_unit(&output, api.revoke(&id).await, &format!("revoked API key {id}"))
        }
    }
}

fn print_created(output: &OutputArgs, created: &CreatedApiKey) {
    if output.quiet {
        return;
    }
    match output.format {
        OutputFormat::Text => {
            println!("created API key {} ({})", created.api_key.id, created.api_key.name);
            println!("key: {}", created.key);
            println!("store it now; it will not be shown again");
        }
        OutputFormat::Json => print_result(output.format, false, created),
    }
}
