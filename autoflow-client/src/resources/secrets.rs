use autoflow_core::validate::validate_secret_name;
use autoflow_core::{ApiError, Page, Secret};
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;

use crate::endpoints;
use crate::executor::{Operation, RequestExecutor};

/// `/secrets`. Values go out once and are never read back.
#[derive(Clone, Copy)]
pub struct SecretsApi<'a> {
    executor: &'a RequestExecutor,
}

impl<'a> SecretsApi<'a> {
    pub fn new(executor: &'a RequestExecutor) -> Self {
        Self { executor }
    }

    pub async fn list(&self) -> Result<Page<Secret>, ApiError> {
        let op = Operation::get(endpoints::SECRETS);
        Ok(self.executor.execute_json(&op).await?.unwrap_or_default())
    }

    pub async fn create(&self, name: &str, value: &SecretString) -> Result<Secret, ApiError> {
        validate_secret_name(name)?;
        let op = Operation::post(endpoints::SECRETS).body(json!({
            "name": name,
            "value": value.expose_secret(),
        }));
        self.executor.execute_value(&op).await
    }

    pub async fn update(&self, name: &str, value: &SecretString) -> Result<Secret, ApiError> {
        validate_secret_name(name)?;
        let op = Operation::put(endpoints::secret(name)?).body(json!({
            "value": value.expose_secret(),
        }));
        self.executor.execute_value(&op).await
    }

    pub async fn delete(&self, name: &str) -> Result<(), ApiError> {
        validate_secret_name(name)?;
        let op = Operation::delete(endpoints::secret(name)?);
        self.executor.execute_unit(&op).await
    }
}
