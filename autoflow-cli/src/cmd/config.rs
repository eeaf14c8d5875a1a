use std::path::Path;
use std::time::Duration;

use autoflow_client::config::ENV_API_KEY;
use autoflow_client::{AutoflowClient, ClientConfig};
use autoflow_core::{parse_str, ApiError, DocumentFormat};
use serde::de::DeserializeOwned;

use crate::exit_codes;
use crate::output::{print_error, report_api_error};
use crate::{ConnectionArgs, OutputArgs};

/// Flags win over the environment.
pub fn build_config(conn: &ConnectionArgs) -> Result<ClientConfig, ApiError> {
    let api_key = conn
        .api_key
        .clone()
        .or_else(|| std::env::var(ENV_API_KEY).ok())
        .ok_or_else(|| {
            ApiError::configuration(format!("missing API key: pass --api-key or set {ENV_API_KEY}"))
        })?;

    let mut builder = ClientConfig::builder(api_key).apply_env()?;
    if let Some(base_url) = conn.base_url.clone() {
        builder = builder.base_url(base_url);
    }
    if let Some(ms) = conn.timeout_ms {
        builder = builder.timeout(Duration::from_millis(ms));
    }
    if conn.allow_insecure {
        builder = builder.allow_insecure(true);
    }
    builder.build()
}

pub fn build_client(conn: &ConnectionArgs, output: &OutputArgs) -> Result<AutoflowClient, i32> {
    build_config(conn)
        .and_then(|config| {
            tracing::debug!(?config, "client configured");
            AutoflowClient::new(config)
        })
        .map_err(|e| report_api_error(output, &e))
}

pub fn read_file(path: &Path, output: &OutputArgs) -> Result<String, i32> {
    std::fs::read_to_string(path).map_err(|e| {
        print_error(
            output.format,
            output.quiet,
            &format!("failed to read {}: {e}", path.display()),
        );
        exit_codes::RUNTIME_ERROR
    })
}

/// Reads a JSON or YAML document of type `T`.
pub fn load_document<T: DeserializeOwned>(path: &Path, output: &OutputArgs) -> Result<T, i32> {
    let content = read_file(path, output)?;
    parse_str::<T>(&content, DocumentFormat::Auto)
        .map(|(doc, _)| doc)
        .map_err(|e| {
            print_error(
                output.format,
                output.quiet,
                &format!("{}: {e}", path.display()),
            );
            exit_codes::VALIDATION_FAILED
        })
}

/// Execution input from `--input` merged with `--set KEY=VALUE` pairs.
pub fn load_input(
    path: Option<&Path>,
    set_inputs: &[String],
    output: &OutputArgs,
) -> Result<Option<serde_json::Value>, i32> {
    let mut input = match path {
        Some(p) => Some(load_document::<serde_json::Value>(p, output)?),
        None => None,
    };
    merge_set_inputs(&mut input, set_inputs, output)?;
    Ok(input)
}

pub fn merge_set_inputs(
    inputs: &mut Option<serde_json::Value>,
    set_inputs: &[String],
    output: &OutputArgs,
) -> Result<(), i32> {
    if set_inputs.is_empty() {
        return Ok(());
    }
    let obj = inputs.get_or_insert(serde_json::json!({}));
    let Some(map) = obj.as_object_mut() else {
        print_error(output.format, output.quiet, "--set requires the input document to be an object");
        return Err(exit_codes::VALIDATION_FAILED);
    };
    for s in set_inputs {
        let Some((k, v)) = s.split_once('=') else {
            print_error(output.format, output.quiet, &format!("invalid --set '{s}': expected KEY=VALUE"));
            return Err(exit_codes::VALIDATION_FAILED);
        };
        // Values that parse as JSON keep their type; anything else is a string.
        let value = serde_json::from_str(v).unwrap_or_else(|_| serde_json::Value::String(v.to_string()));
        map.insert(k.to_string(), value);
    }
    Ok(())
}
