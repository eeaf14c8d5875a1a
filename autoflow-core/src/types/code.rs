use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Languages the service can run inside a code step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Runtime {
    Python,
    JavaScript,
    TypeScript,
}

impl Runtime {
    pub const ALL: [Runtime; 3] = [Runtime::Python, Runtime::JavaScript, Runtime::TypeScript];

    /// Normalized language tag sent to the service.
    pub fn as_str(self) -> &'static str {
        match self {
            Runtime::Python => "python",
            Runtime::JavaScript => "javascript",
            Runtime::TypeScript => "typescript",
        }
    }

    /// Conventional file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Runtime::Python => "py",
            Runtime::JavaScript => "js",
            Runtime::TypeScript => "ts",
        }
    }

    pub fn supported_list() -> String {
        Self::ALL
            .iter()
            .map(|r| r.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedRuntime(pub String);

impl fmt::Display for UnsupportedRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unsupported runtime '{}' (expected one of: {})",
            self.0,
            Runtime::supported_list()
        )
    }
}

impl std::error::Error for UnsupportedRuntime {}

impl FromStr for Runtime {
    type Err = UnsupportedRuntime;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "python" | "python3" | "py" => Ok(Runtime::Python),
            "javascript" | "js" | "node" | "nodejs" => Ok(Runtime::JavaScript),
            "typescript" | "ts" => Ok(Runtime::TypeScript),
            _ => Err(UnsupportedRuntime(s.to_string())),
        }
    }
}

/// Reference returned by the code upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedCode {
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeArtifact {
    pub key: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}
