use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_api_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_text_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_speech_model() -> String {
    "gemini-2.5-flash-preview-tts".to_string()
}

fn default_voice() -> String {
    "Kore".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_source_language() -> String {
    "German".to_string()
}

fn default_learner_language() -> String {
    "English".to_string()
}

/// Generative-language service used for entry assist and speech.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct GenAiConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_text_model")]
    pub text_model: String,
    #[serde(default = "default_speech_model")]
    pub speech_model: String,
    /// Prebuilt voice used for speech synthesis
    #[serde(default = "default_voice")]
    pub voice: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Language being learned
    #[serde(default = "default_source_language")]
    pub source_language: String,
    /// Language of translations
    #[serde(default = "default_learner_language")]
    pub learner_language: String,
}

impl GenAiConfig {
    /// Requests are only worth sending with a key.
    pub fn is_usable(&self) -> bool {
        self.enabled && !self.api_key.trim().is_empty()
    }
}

impl Default for GenAiConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            api_key: String::new(),
            api_url: default_api_url(),
            text_model: default_text_model(),
            speech_model: default_speech_model(),
            voice: default_voice(),
            timeout_seconds: default_timeout_seconds(),
            source_language: default_source_language(),
            learner_language: default_learner_language(),
        }
    }
}
