use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_key() -> String {
    "words".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the key-value slots, platform data dir when unset
    pub data_dir: Option<PathBuf>,
    /// Slot holding the word collection
    #[serde(default = "default_key")]
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            key: default_key(),
        }
    }
}
