use clap::Parser;

mod args;
mod cmd;
mod commands;
mod exit_codes;
mod output;

pub use args::*;
use commands::Command;

#[derive(Debug, Parser)]
#[command(name = "autoflow", version, about = "Autoflow workflow-automation client")]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,
    #[command(flatten)]
    output: OutputArgs,
    /// Log request attempts and retries to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to create tokio runtime: {e}");
            std::process::exit(exit_codes::RUNTIME_ERROR);
        }
    };

    let exit_code = rt.block_on(run_command(cli.command, cli.connection, cli.output));
    std::process::exit(exit_code);
}

/// `RUST_LOG` wins; otherwise `warn`, or `debug` for this workspace with `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "warn,autoflow_client=debug,autoflow_cli=debug"
    } else {
        "warn"
    };
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default.into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

async fn run_command(command: Command, conn: ConnectionArgs, output: OutputArgs) -> i32 {
    match command {
        Command::Validate { path } => cmd::validate::validate_cmd(&path, output).await,
        Command::Workflows(sub) => cmd::workflows::workflows_cmd(sub, &conn, output).await,
        Command::Executions(sub) => cmd::executions::executions_cmd(sub, &conn, output).await,
        Command::Secrets(sub) => cmd::secrets::secrets_cmd(sub, &conn, output).await,
        Command::ApiKeys(sub) => cmd::api_keys::api_keys_cmd(sub, &conn, output).await,
        Command::Code(sub) => cmd::code::code_cmd(sub, &conn, output).await,
    }
}
