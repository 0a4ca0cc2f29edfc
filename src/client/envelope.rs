use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entity::de::flexible_i64;
use crate::error::is_success;

/// Wrapper the upstream puts around every response body.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Envelope<T = Value> {
    #[serde(deserialize_with = "flexible_i64")]
    pub code: i64,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub result: Option<T>,
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        is_success(self.code)
    }

    pub fn message(&self) -> &str {
        self.msg.as_deref().unwrap_or_default()
    }
}
