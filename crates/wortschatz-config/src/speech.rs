use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_sample_rate() -> u32 {
    24_000
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeechOutput {
    /// Default audio output device
    #[default]
    Speaker,
    /// Write a WAV file per utterance
    Wav,
    Off,
}

impl FromStr for SpeechOutput {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "speaker" => Ok(SpeechOutput::Speaker),
            "wav" => Ok(SpeechOutput::Wav),
            "off" | "none" => Ok(SpeechOutput::Off),
            other => Err(format!("unknown speech output '{other}'")),
        }
    }
}

impl fmt::Display for SpeechOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SpeechOutput::Speaker => "speaker",
            SpeechOutput::Wav => "wav",
            SpeechOutput::Off => "off",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SpeechConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    pub output: SpeechOutput,
    /// Used when the response does not state its rate
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    /// Where WAV output lands, data dir when unset
    pub wav_dir: Option<PathBuf>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            output: SpeechOutput::default(),
            sample_rate: default_sample_rate(),
            wav_dir: None,
        }
    }
}
