use autoflow_core::ApiError;
use serde::Serialize;

use crate::exit_codes;
use crate::OutputArgs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn print_result<T: Serialize>(format: OutputFormat, quiet: bool, result: &T) {
    if quiet {
        return;
    }
    let rendered = match format {
        OutputFormat::Text => serde_json::to_string_pretty(result),
        OutputFormat::Json => serde_json::to_string(result),
    };
    if let Ok(json) = rendered {
        println!("{json}");
    }
}

pub fn print_error(format: OutputFormat, quiet: bool, message: &str) {
    if quiet {
        return;
    }
    match format {
        OutputFormat::Text => eprintln!("error: {message}"),
        OutputFormat::Json => {
            let err = serde_json::json!({"error": message});
            eprintln!("{}", serde_json::to_string(&err).unwrap_or_default());
        }
    }
}

/// Prints an API error and returns the matching exit code.
pub fn report_api_error(output: &OutputArgs, err: &ApiError) -> i32 {
    if !output.quiet {
        match output.format {
            OutputFormat::Text => {
                eprintln!("error: {}", err.user_message());
                if let Some(status) = err.status {
                    eprintln!("  status: {status}");
                }
                if let Some(retry_after) = err.retry_after {
                    eprintln!("  retry after: {}s", retry_after.as_secs());
                }
                if let Some(details) = &err.details {
                    eprintln!("  details: {details}");
                }
            }
            OutputFormat::Json => {
                let body = serde_json::json!({
                    "error": {
                        "kind": format!("{:?}", err.kind),
                        "code": err.code,
                        "message": err.message,
                        "status": err.status,
                        "details": err.details,
                        "retryAfterSecs": err.retry_after.map(|d| d.as_secs()),
                    }
                });
                eprintln!("{}", serde_json::to_string(&body).unwrap_or_default());
            }
        }
    }
    exit_codes::for_error(err)
}

/// Prints `value` on success or reports the error; returns the exit code.
pub fn finish<T: Serialize>(output: &OutputArgs, result: Result<T, ApiError>) -> i32 {
    match result {
        Ok(value) => {
            print_result(output.format, output.quiet, &value);
            exit_codes::SUCCESS
        }
        Err(e) => report_api_error(output, &e),
    }
}

/// Like [`finish`] for calls with no payload; prints `done` in text mode.
pub fn finish_unit(output: &OutputArgs, result: Result<(), ApiError>, done: &str) -> i32 {
    match result {
        Ok(()) => {
            if !output.quiet {
                match output.format {
                    OutputFormat::Text => println!("ok: {done}"),
                    OutputFormat::Json => println!("{}", serde_json::json!({"ok": true})),
                }
            }
            exit_codes::SUCCESS
        }
        Err(e) => report_api_error(output, &e),
    }
}
