use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use wortschatz_audio::{AudioBuffer, AudioSink, Error as AudioError};
use wortschatz_core::{MemoryKeyValueStore, WordStore};
use wortschatz_genai::{EntryAssistant, GenAiError, SpeechClip, SpeechSynthesizer};
use wortschatz_types::{EntryId, Gender, MasteryLevel, PartOfSpeech, WordDraft, WordEntry};

use crate::router::Model;

pub const KEY: &str = "words";

pub fn entry(id: &str, term: &str, translation: &str, level: i64, created_at: i64) -> WordEntry {
    WordEntry {
        id: EntryId::new(id),
        source_term: term.to_string(),
        translation: translation.to_string(),
        part_of_speech: PartOfSpeech::Noun,
        grammatical_gender: Some(Gender::Das),
        example_sentence: format!("Das ist {term}."),
        example_translation: format!("That is {translation}."),
        mastery_level: MasteryLevel::clamped(level),
        created_at,
    }
}

pub fn model(entries: Vec<WordEntry>) -> Model<MemoryKeyValueStore> {
    let store = WordStore::from_entries(MemoryKeyValueStore::new(), KEY, entries);
    Model::new(store, 50)
}

/// What the backend slot holds right now.
pub fn persisted(model: &Model<MemoryKeyValueStore>) -> Vec<WordEntry> {
    let raw = model.store.backend().get(KEY).expect("nothing persisted");
    serde_json::from_str(&raw).unwrap()
}

pub fn apple_draft() -> WordDraft {
    WordDraft {
        source_term: Some("der Apfel".into()),
        translation: Some("apple".into()),
        part_of_speech: Some(PartOfSpeech::Noun),
        grammatical_gender: Some(Gender::Der),
        example_sentence: Some("Der Apfel ist rot.".into()),
        example_translation: Some("The apple is red.".into()),
    }
}

/// Answers every hint with the same draft, or fails when `answer` is `None`.
pub struct FakeAssistant {
    pub answer: Option<WordDraft>,
    pub calls: AtomicUsize,
}

impl FakeAssistant {
    pub fn answering(draft: WordDraft) -> Self {
        Self {
            answer: Some(draft),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            answer: None,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl EntryAssistant for FakeAssistant {
    async fn suggest_entry(&self, _hint: &str) -> Result<WordDraft, GenAiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer
            .clone()
            .ok_or_else(|| GenAiError::EmptyResponse("test".into()))
    }
}

/// Two samples of PCM16: 0 and i16::MAX.
pub struct FakeSynthesizer;

#[async_trait]
impl SpeechSynthesizer for FakeSynthesizer {
    async fn synthesize(&self, _text: &str) -> Result<SpeechClip, GenAiError> {
        Ok(SpeechClip {
            pcm_base64: "AAD/fw==".to_string(),
            mime_type: Some("audio/L16;codec=pcm;rate=24000".to_string()),
            sample_rate: 24_000,
        })
    }
}

/// Synthesizers whose output never reaches a sink.
pub enum BrokenSynthesizer {
    Failing,
    /// One byte of PCM16, which cannot be decoded
    Garbled,
    Stalled,
}

#[async_trait]
impl SpeechSynthesizer for BrokenSynthesizer {
    async fn synthesize(&self, _text: &str) -> Result<SpeechClip, GenAiError> {
        match self {
            BrokenSynthesizer::Failing => Err(GenAiError::RateLimitExceeded),
            BrokenSynthesizer::Garbled => Ok(SpeechClip {
                pcm_base64: "AA==".to_string(),
                mime_type: None,
                sample_rate: 24_000,
            }),
            BrokenSynthesizer::Stalled => {
                tokio::time::sleep(std::time::Duration::from_secs(30)).await;
                Err(GenAiError::Timeout)
            }
        }
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub played: Mutex<Vec<AudioBuffer>>,
}

impl AudioSink for RecordingSink {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn play(&self, buffer: &AudioBuffer) -> Result<(), AudioError> {
        self.played.lock().unwrap().push(buffer.clone());
        Ok(())
    }
}
