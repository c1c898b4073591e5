use serde::{Deserialize, Serialize};

use crate::history::HISTORY_LIMIT;

/// Storage keys and limits for an [`EditorContext`](crate::state::EditorContext).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")] // missing fields keep their defaults
pub struct StoreConfig {
    /// Key of the durable record
    pub durable_key: String,
    /// Key of the session colors record
    pub ephemeral_key: String,
    /// Maximum number of history snapshots, at least 1
    pub history_limit: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            durable_key: "store".to_string(),
            ephemeral_key: "sessionColors".to_string(),
            history_limit: HISTORY_LIMIT,
        }
    }
}

impl StoreConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
