use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entry::{Gender, PartOfSpeech, ParseTagError};

/// In-progress entry: every field may still be missing.
///
/// Used both for the create form's state and for suggestions returned by the
/// entry assistant, which are applied with [`WordDraft::merge`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_term: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<PartOfSpeech>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grammatical_gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_sentence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_translation: Option<String>,
}

impl WordDraft {
    /// Starting point of the create form: a noun with `der`, text fields empty.
    pub fn form_default() -> Self {
        Self {
            source_term: Some(String::new()),
            translation: Some(String::new()),
            part_of_speech: Some(PartOfSpeech::Noun),
            grammatical_gender: Some(Gender::Der),
            example_sentence: Some(String::new()),
            example_translation: Some(String::new()),
        }
    }

    /// Field-by-field overwrite: every `Some` in `patch` replaces ours.
    pub fn merge(&mut self, patch: WordDraft) {
        let WordDraft {
            source_term,
            translation,
            part_of_speech,
            grammatical_gender,
            example_sentence,
            example_translation,
        } = patch;

        if source_term.is_some() {
            self.source_term = source_term;
        }
        if translation.is_some() {
            self.translation = translation;
        }
        if part_of_speech.is_some() {
            self.part_of_speech = part_of_speech;
        }
        if grammatical_gender.is_some() {
            self.grammatical_gender = grammatical_gender;
        }
        if example_sentence.is_some() {
            self.example_sentence = example_sentence;
        }
        if example_translation.is_some() {
            self.example_translation = example_translation;
        }
    }
}

/// Form fields addressable from the create view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    SourceTerm,
    Translation,
    PartOfSpeech,
    Gender,
    ExampleSentence,
    ExampleTranslation,
}

impl DraftField {
    pub const ALL: [DraftField; 6] = [
        DraftField::SourceTerm,
        DraftField::Translation,
        DraftField::PartOfSpeech,
        DraftField::Gender,
        DraftField::ExampleSentence,
        DraftField::ExampleTranslation,
    ];

    /// Name typed by the user in `set FIELD VALUE`.
    pub fn key(&self) -> &'static str {
        match self {
            DraftField::SourceTerm => "term",
            DraftField::Translation => "translation",
            DraftField::PartOfSpeech => "type",
            DraftField::Gender => "gender",
            DraftField::ExampleSentence => "example",
            DraftField::ExampleTranslation => "example-translation",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for DraftField {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        let field = match s.as_str() {
            "term" | "word" | "source" => DraftField::SourceTerm,
            "translation" | "meaning" => DraftField::Translation,
            "type" | "pos" => DraftField::PartOfSpeech,
            "gender" | "article" => DraftField::Gender,
            "example" | "sentence" => DraftField::ExampleSentence,
            "example-translation" | "example_translation" => DraftField::ExampleTranslation,
            _ => {
                return Err(ParseTagError {
                    kind: "field",
                    value: s,
                });
            }
        };
        Ok(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_overwrites_only_present_fields() {
        let mut draft = WordDraft::form_default();
        draft.example_sentence = Some("Mein eigener Satz.".into());

        draft.merge(WordDraft {
            source_term: Some("der Apfel".into()),
            translation: Some("apple".into()),
            part_of_speech: Some(PartOfSpeech::Noun),
            grammatical_gender: None,
            example_sentence: None,
            example_translation: Some("An apple a day.".into()),
        });

        assert_eq!(draft.source_term.as_deref(), Some("der Apfel"));
        assert_eq!(draft.translation.as_deref(), Some("apple"));
        assert_eq!(draft.grammatical_gender, Some(Gender::Der));
        assert_eq!(draft.example_sentence.as_deref(), Some("Mein eigener Satz."));
        assert_eq!(draft.example_translation.as_deref(), Some("An apple a day."));
    }

    #[test]
    fn parses_field_keys() {
        for field in DraftField::ALL {
            assert_eq!(field.key().parse::<DraftField>().unwrap(), field);
        }
        assert_eq!("Word".parse::<DraftField>().unwrap(), DraftField::SourceTerm);
        assert!("colour".parse::<DraftField>().is_err());
    }
}
