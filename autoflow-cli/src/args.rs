use autoflow_core::ExecutionStatus;
use clap::Args;

use crate::output::OutputFormat;

#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// Connection settings. Unset flags fall back to the `AUTOFLOW_*` environment.
#[derive(Debug, Args, Clone, Default)]
pub struct ConnectionArgs {
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,
    #[arg(long, global = true)]
    pub api_key: Option<String>,
    #[arg(long, global = true, value_name = "MS")]
    pub timeout_ms: Option<u64>,
    #[arg(long, global = true)]
    pub allow_insecure: bool,
}

#[derive(Debug, Args, Clone, Default)]
pub struct PageArgs {
    #[arg(long)]
    pub page: Option<u32>,
    #[arg(long)]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum StatusArg {
    Pending,
    Running,
    Succeeded,
    Failed,
    Cancelled,
}

impl From<StatusArg> for ExecutionStatus {
    fn from(s: StatusArg) -> Self {
        match s {
            StatusArg::Pending => ExecutionStatus::Pending,
            StatusArg::Running => ExecutionStatus::Running,
            StatusArg::Succeeded => ExecutionStatus::Succeeded,
            StatusArg::Failed => ExecutionStatus::Failed,
            StatusArg::Cancelled => ExecutionStatus::Cancelled,
        }
    }
}
