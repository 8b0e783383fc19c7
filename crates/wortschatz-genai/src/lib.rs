mod gemini;
mod schema;

pub use gemini::GeminiClient;
pub use schema::AssistPayload;

use wortschatz_types::WordDraft;

/// Proposes entry fields from a free-text hint.
#[async_trait::async_trait]
pub trait EntryAssistant: Send + Sync {
    async fn suggest_entry(&self, hint: &str) -> Result<WordDraft, GenAiError>;
}

/// Turns text into spoken audio.
#[async_trait::async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<SpeechClip, GenAiError>;
}

/// Encoded audio as returned by the service.
#[derive(Debug, Clone)]
pub struct SpeechClip {
    /// Base64 of signed 16-bit little-endian mono PCM
    pub pcm_base64: String,
    pub mime_type: Option<String>,
    pub sample_rate: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum GenAiError {
    #[error("No API key configured")]
    MissingApiKey,

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Request timed out")]
    Timeout,

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error")]
    AuthenticationError,

    #[error("API error: HTTP {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Response had no usable content: {0}")]
    EmptyResponse(String),

    #[error("Response does not match the entry schema: {0}")]
    SchemaError(#[from] serde_json::Error),
}
