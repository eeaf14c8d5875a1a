pub mod api_keys;
pub mod code;
pub mod config;
pub mod executions;
pub mod secrets;
pub mod validate;
pub mod workflows;
