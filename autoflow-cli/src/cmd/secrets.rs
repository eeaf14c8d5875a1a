use std::io::Read;

use secrecy::SecretString;

use crate::cmd::config::build_client;
use crate::commands::SecretsCommand;
use crate::exit_codes;
use crate::output::{finish, finish_unit, print_error};
use crate::{ConnectionArgs, OutputArgs};

pub async fn secrets_cmd(command: SecretsCommand, conn: &ConnectionArgs, output: OutputArgs) -> i32 {
    let client = match build_client(conn, &output) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let api = client.secrets();

    match command {
        SecretsCommand::List => finish(&output, api.list().await),
        SecretsCommand::Set {
            name,
            value,
            update,
        } => {
            let value = match value {
                Some(v) => SecretString::from(v),
                None => match read_stdin() {
                    Ok(v) => v,
                    Err(e) => {
                        print_error(output.format, output.quiet, &format!("failed to read secret from stdin: {e}"));
                        return exit_codes::RUNTIME_ERROR;
                    }
                },
            };
            let result = if update {
                api.update(&name, &value).await
            } else {
                api.create(&name, &value).await
            };
            finish(&output, result)
        }
        SecretsCommand::Delete { name } => {
            finish_unit(&output, api.delete(&name).await, &format!("deleted secret {name}"))
        }
    }
}

fn read_stdin() -> std::io::Result<SecretString> {
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf)?;
    let trimmed = buf.trim_end_matches(['\r', '\n']).to_string();
    Ok(SecretString::from(trimmed))
}
