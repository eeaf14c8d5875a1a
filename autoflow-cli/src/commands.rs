use std::path::PathBuf;

use clap::Subcommand;

use crate::args::*;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check a workflow definition file without contacting the service.
    Validate { path: PathBuf },
    #[command(subcommand)]
    Workflows(WorkflowsCommand),
    #[command(subcommand)]
    Executions(ExecutionsCommand),
    #[command(subcommand)]
    Secrets(SecretsCommand),
    #[command(subcommand)]
    ApiKeys(ApiKeysCommand),
    #[command(subcommand)]
    Code(CodeCommand),
}

#[derive(Debug, Subcommand)]
pub enum WorkflowsCommand {
    List {
        #[command(flatten)]
        page: PageArgs,
    },
    Get {
        id: String,
    },
    /// Create a workflow from a JSON or YAML definition; inline code is uploaded first.
    Create {
        path: PathBuf,
    },
    /// Apply a partial update read from a JSON or YAML file.
    Update {
        id: String,
        path: PathBuf,
    },
    Delete {
        id: String,
    },
    Execute {
        id: String,
        /// Input document (JSON or YAML).
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set_inputs: Vec<String>,
    },
    Activate {
        id: String,
    },
    Deactivate {
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum ExecutionsCommand {
    List {
        #[arg(long)]
        workflow_id: Option<String>,
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
        #[command(flatten)]
        page: PageArgs,
    },
    Get {
        id: String,
    },
    Cancel {
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum SecretsCommand {
    List,
    /// Create a secret, or replace its value with `--update`. Reads stdin when `--value` is absent.
    Set {
        name: String,
        #[arg(long)]
        value: Option<String>,
        #[arg(long)]
        update: bool,
    },
    Delete {
        name: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum ApiKeysCommand {
    List,
    Create {
        name: String,
        #[arg(long = "scope")]
        scopes: Vec<String>,
        #[arg(long)]
        expires_in_days: Option<u32>,
    },
    Revoke {
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum CodeCommand {
    Upload {
        path: PathBuf,
        /// python, javascript or typescript (aliases accepted); guessed from the extension when omitted.
        #[arg(long)]
        runtime: Option<String>,
        /// Name stored on the service; defaults to the local file name.
        #[arg(long)]
        name: Option<String>,
    },
    Get {
        key: String,
    },
    Delete {
        key: String,
    },
}
