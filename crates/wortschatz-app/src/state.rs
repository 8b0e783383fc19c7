use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use wortschatz_audio::{AudioSink, NullSink, WavFileSink};
use wortschatz_config::{Config, SpeechOutput};
use wortschatz_genai::{EntryAssistant, GeminiClient, SpeechSynthesizer};

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    /// `None` when no API key is configured
    pub assistant: Option<Arc<dyn EntryAssistant>>,
    pub synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
    pub sink: Arc<dyn AudioSink>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let client = if config.genai.is_usable() {
            match GeminiClient::new(&config.genai) {
                Ok(client) => Some(Arc::new(
                    client.with_fallback_sample_rate(config.speech.sample_rate),
                )),
                Err(e) => {
                    tracing::error!("Failed to build Gemini client: {e}");
                    None
                }
            }
        } else {
            tracing::warn!("No Gemini API key configured, AI fill and speech are disabled");
            None
        };

        let assistant = client.clone().map(|c| c as Arc<dyn EntryAssistant>);
        let synthesizer = client
            .filter(|_| config.speech.enabled)
            .map(|c| c as Arc<dyn SpeechSynthesizer>);
        let sink = build_sink(&config);

        Self::with_services(config, assistant, synthesizer, sink)
    }

    pub fn with_services(
        config: Config,
        assistant: Option<Arc<dyn EntryAssistant>>,
        synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
        sink: Arc<dyn AudioSink>,
    ) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            assistant,
            synthesizer,
            sink,
        }
    }

    pub async fn request_timeout(&self) -> Duration {
        let config = self.config.read().await;
        Duration::from_secs(config.genai.timeout_seconds.max(1))
    }
}

fn wav_sink(config: &Config) -> Arc<dyn AudioSink> {
    let dir = config.speech.wav_dir.clone().or_else(|| {
        config
            .storage
            .data_dir
            .clone()
            .or_else(|| wortschatz_core::storage::default_data_dir().ok())
            .map(|dir| dir.join("speech"))
    });

    match dir {
        Some(dir) => {
            let sink = WavFileSink::new(dir);
            tracing::info!("Speech is written to WAV files in {}", sink.dir().display());
            Arc::new(sink)
        }
        None => {
            tracing::warn!("No directory for WAV output, speech output is off");
            Arc::new(NullSink)
        }
    }
}

fn build_sink(config: &Config) -> Arc<dyn AudioSink> {
    match config.speech.output {
        SpeechOutput::Off => Arc::new(NullSink),
        SpeechOutput::Wav => wav_sink(config),
        SpeechOutput::Speaker => speaker_sink(config),
    }
}

#[cfg(feature = "playback")]
fn speaker_sink(_config: &Config) -> Arc<dyn AudioSink> {
    Arc::new(wortschatz_audio::SpeakerSink)
}

#[cfg(not(feature = "playback"))]
fn speaker_sink(config: &Config) -> Arc<dyn AudioSink> {
    tracing::warn!("Built without the `playback` feature, writing speech to WAV files instead");
    wav_sink(config)
}
