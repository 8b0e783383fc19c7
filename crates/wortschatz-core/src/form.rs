use wortschatz_types::{
    DraftField, EntryId, Gender, MasteryLevel, PartOfSpeech, WordDraft, WordEntry,
};

/// A validated draft, ready for [`crate::WordStore::insert`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub source_term: String,
    pub translation: String,
    pub part_of_speech: PartOfSpeech,
    pub grammatical_gender: Option<Gender>,
    pub example_sentence: String,
    pub example_translation: String,
}

impl NewEntry {
    pub fn into_entry(self, id: EntryId, created_at: i64) -> WordEntry {
        WordEntry {
            id,
            source_term: self.source_term,
            translation: self.translation,
            part_of_speech: self.part_of_speech,
            grammatical_gender: self.grammatical_gender,
            example_sentence: self.example_sentence,
            example_translation: self.example_translation,
            mastery_level: MasteryLevel::MIN,
            created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(DraftField),

    #[error("invalid {field}: {reason}")]
    Invalid { field: DraftField, reason: String },
}

fn required(
    value: &Option<String>,
    field: DraftField,
    errors: &mut Vec<ValidationError>,
) -> String {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => {
            errors.push(ValidationError::Missing(field));
            String::new()
        }
    }
}

/// Checks every required field, reporting all that are missing.
///
/// A gender on anything but a noun is dropped rather than rejected.
pub fn validate(draft: &WordDraft) -> Result<NewEntry, Vec<ValidationError>> {
    let mut errors = Vec::new();

    let source_term = required(&draft.source_term, DraftField::SourceTerm, &mut errors);
    let translation = required(&draft.translation, DraftField::Translation, &mut errors);
    let part_of_speech = draft.part_of_speech.unwrap_or_else(|| {
        errors.push(ValidationError::Missing(DraftField::PartOfSpeech));
        PartOfSpeech::Other
    });
    let example_sentence = required(
        &draft.example_sentence,
        DraftField::ExampleSentence,
        &mut errors,
    );
    let example_translation = required(
        &draft.example_translation,
        DraftField::ExampleTranslation,
        &mut errors,
    );

    if !errors.is_empty() {
        return Err(errors);
    }

    let grammatical_gender = match part_of_speech {
        PartOfSpeech::Noun => draft.grammatical_gender,
        _ => None,
    };

    Ok(NewEntry {
        source_term,
        translation,
        part_of_speech,
        grammatical_gender,
        example_sentence,
        example_translation,
    })
}

/// State of the create view.
#[derive(Debug, Clone)]
pub struct CreateForm {
    pub hint: String,
    pub draft: WordDraft,
    /// Id of the assist request whose answer this form is waiting for
    pub pending: Option<u64>,
    pub errors: Vec<ValidationError>,
}

impl Default for CreateForm {
    fn default() -> Self {
        Self::new()
    }
}

impl CreateForm {
    pub fn new() -> Self {
        Self {
            hint: String::new(),
            draft: WordDraft::form_default(),
            pending: None,
            errors: Vec::new(),
        }
    }

    pub fn is_assisting(&self) -> bool {
        self.pending.is_some()
    }

    /// Updates one field from user text. `gender none` clears the gender.
    pub fn set_field(&mut self, field: DraftField, value: &str) -> Result<(), ValidationError> {
        let text = value.trim();
        let invalid = |reason: String| ValidationError::Invalid { field, reason };

        match field {
            DraftField::SourceTerm => self.draft.source_term = Some(text.to_string()),
            DraftField::Translation => self.draft.translation = Some(text.to_string()),
            DraftField::ExampleSentence => self.draft.example_sentence = Some(text.to_string()),
            DraftField::ExampleTranslation => {
                self.draft.example_translation = Some(text.to_string())
            }
            DraftField::PartOfSpeech => {
                let pos = text.parse::<PartOfSpeech>().map_err(|e| invalid(e.to_string()))?;
                self.draft.part_of_speech = Some(pos);
            }
            DraftField::Gender => {
                if text.eq_ignore_ascii_case("none") || text.is_empty() {
                    self.draft.grammatical_gender = None;
                } else {
                    let gender = text.parse::<Gender>().map_err(|e| invalid(e.to_string()))?;
                    self.draft.grammatical_gender = Some(gender);
                }
            }
        }

        self.errors.clear();
        Ok(())
    }

    /// Applies an assist suggestion over the current draft.
    pub fn apply_suggestion(&mut self, suggestion: WordDraft) {
        self.draft.merge(suggestion);
        if !self.shows_gender() {
            self.draft.grammatical_gender = None;
        }
        self.errors.clear();
    }

    /// Validates the draft, remembering the errors for display on failure.
    pub fn submit(&mut self) -> Option<NewEntry> {
        match validate(&self.draft) {
            Ok(entry) => {
                self.errors.clear();
                Some(entry)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    pub fn shows_gender(&self) -> bool {
        self.draft.part_of_speech == Some(PartOfSpeech::Noun)
    }
}
