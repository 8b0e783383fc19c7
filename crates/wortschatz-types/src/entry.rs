use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Opaque, immutable identifier of a word entry.
///
/// Entries created by this application carry a UUID v4; imported data may
/// carry any string (the seed set uses `"1"` and `"2"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown {kind}: '{value}'")]
pub struct ParseTagError {
    pub kind: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Phrase,
    Other,
}

impl PartOfSpeech {
    pub const ALL: [PartOfSpeech; 6] = [
        PartOfSpeech::Noun,
        PartOfSpeech::Verb,
        PartOfSpeech::Adjective,
        PartOfSpeech::Adverb,
        PartOfSpeech::Phrase,
        PartOfSpeech::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "Noun",
            PartOfSpeech::Verb => "Verb",
            PartOfSpeech::Adjective => "Adjective",
            PartOfSpeech::Adverb => "Adverb",
            PartOfSpeech::Phrase => "Phrase",
            PartOfSpeech::Other => "Other",
        }
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartOfSpeech {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|pos| pos.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseTagError {
                kind: "part of speech",
                value: s.to_string(),
            })
    }
}

/// Grammatical gender of a German noun, expressed by its definite article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Der,
    Die,
    Das,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Der, Gender::Die, Gender::Das];

    pub fn article(&self) -> &'static str {
        match self {
            Gender::Der => "der",
            Gender::Die => "die",
            Gender::Das => "das",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.article())
    }
}

impl FromStr for Gender {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|g| g.article().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseTagError {
                kind: "gender",
                value: s.to_string(),
            })
    }
}

/// Learner proficiency on one entry, always within `0..=MasteryLevel::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[derive(Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub struct MasteryLevel(u8);

impl MasteryLevel {
    pub const MIN: MasteryLevel = MasteryLevel(0);
    pub const MAX: MasteryLevel = MasteryLevel(5);

    /// Builds a level from any integer, clamping into range.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(Self::MIN.0 as i64, Self::MAX.0 as i64) as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn is_max(&self) -> bool {
        *self == Self::MAX
    }
}

impl From<i64> for MasteryLevel {
    fn from(value: i64) -> Self {
        Self::clamped(value)
    }
}

impl From<MasteryLevel> for u8 {
    fn from(level: MasteryLevel) -> Self {
        level.0
    }
}

impl fmt::Display for MasteryLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One vocabulary item, the sole persisted entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordEntry {
    pub id: EntryId,
    #[serde(alias = "german")]
    pub source_term: String,
    #[serde(alias = "english")]
    pub translation: String,
    #[serde(alias = "type")]
    pub part_of_speech: PartOfSpeech,
    #[serde(default, alias = "gender", skip_serializing_if = "Option::is_none")]
    pub grammatical_gender: Option<Gender>,
    pub example_sentence: String,
    pub example_translation: String,
    #[serde(default)]
    pub mastery_level: MasteryLevel,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
}

impl WordEntry {
    /// Drops a gender that is only meaningful for nouns.
    pub fn normalize_gender(&mut self) {
        if self.part_of_speech != PartOfSpeech::Noun {
            self.grammatical_gender = None;
        }
    }
}
