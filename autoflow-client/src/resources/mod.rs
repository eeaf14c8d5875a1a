mod api_keys;
mod code;
mod executions;
mod secrets;
mod workflows;

pub use api_keys::ApiKeysApi;
pub use code::CodeApi;
pub use executions::ExecutionsApi;
pub use secrets::SecretsApi;
pub use workflows::WorkflowsApi;
