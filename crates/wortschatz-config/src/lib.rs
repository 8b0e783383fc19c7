use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use self::genai::GenAiConfig;
use self::speech::SpeechConfig;
use self::storage::StorageConfig;
use self::ui::UiConfig;

pub mod genai;
pub mod speech;
pub mod storage;
pub mod ui;

pub use self::speech::SpeechOutput;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub genai: GenAiConfig,
    pub speech: SpeechConfig,
    pub ui: UiConfig,
}

impl Config {
    /// Defaults with environment overrides applied.
    pub fn new() -> Self {
        let mut config = Config::default();
        config.apply_env();
        config
    }

    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    /// Applies overrides from any key lookup (the process env in practice).
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty("GEMINI_API_KEY").or_else(|| non_empty("API_KEY")) {
            self.genai.api_key = key;
        }

        if let Some(url) = non_empty("GEMINI_API_URL") {
            self.genai.api_url = url;
        }

        if let Some(dir) = non_empty("WORTSCHATZ_DATA_DIR") {
            self.storage.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(raw) = non_empty("GENAI_TIMEOUT_SECONDS") {
            match raw.parse() {
                Ok(seconds) => self.genai.timeout_seconds = seconds,
                Err(_) => tracing::warn!("Ignoring GENAI_TIMEOUT_SECONDS={raw}: not a number"),
            }
        }

        if let Some(raw) = non_empty("SPEECH_OUTPUT") {
            match raw.parse() {
                Ok(output) => self.speech.output = output,
                Err(e) => tracing::warn!("Ignoring SPEECH_OUTPUT: {e}"),
            }
        }
    }
}
