use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Step type whose configuration embeds source code.
pub const CODE_STEP_TYPE: &str = "code";

/// Keys inside a code step's `config` object.
pub mod code_config {
    pub const RUNTIME: &str = "runtime";
    pub const CODE: &str = "code";
    pub const FILE_NAME: &str = "fileName";
    pub const CODE_KEY: &str = "codeKey";
    pub const LIBRARIES: &str = "libraries";
}

/// A single node of a workflow definition.
///
/// `config` is free-form; its shape depends on `step_type`. Order of steps in a
/// workflow is significant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepDefinition {
    #[serde(rename = "type")]
    pub step_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default = "empty_config")]
    pub config: JsonValue,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

fn empty_config() -> JsonValue {
    JsonValue::Object(Map::new())
}

impl StepDefinition {
    pub fn new(step_type: impl Into<String>, config: JsonValue) -> Self {
        Self {
            step_type: step_type.into(),
            name: None,
            config,
            next: None,
            condition: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_next(mut self, next: impl Into<String>) -> Self {
        self.next = Some(next.into());
        self
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn is_code(&self) -> bool {
        self.step_type == CODE_STEP_TYPE
    }

    /// Looks up a string field of `config`.
    pub fn config_str(&self, key: &str) -> Option<&str> {
        self.config.get(key).and_then(JsonValue::as_str)
    }

    /// True when inline source is still present in the configuration.
    pub fn has_inline_code(&self) -> bool {
        self.is_code() && self.config.get(code_config::CODE).is_some()
    }
}
