use wortschatz_types::{EntryId, Gender, MasteryLevel, PartOfSpeech, WordEntry};

/// Collection shown on first start, before anything was saved.
pub fn seed_entries(now_millis: i64) -> Vec<WordEntry> {
    vec![
        WordEntry {
            id: EntryId::new("1"),
            source_term: "die Herausforderung".to_string(),
            translation: "challenge".to_string(),
            part_of_speech: PartOfSpeech::Noun,
            grammatical_gender: Some(Gender::Die),
            example_sentence: "Das Lernen einer neuen Sprache ist eine große Herausforderung."
                .to_string(),
            example_translation: "Learning a new language is a big challenge.".to_string(),
            mastery_level: MasteryLevel::clamped(2),
            created_at: now_millis,
        },
        WordEntry {
            id: EntryId::new("2"),
            source_term: "überraschend".to_string(),
            translation: "surprising".to_string(),
            part_of_speech: PartOfSpeech::Adjective,
            grammatical_gender: None,
            example_sentence: "Das Ergebnis war sehr überraschend.".to_string(),
            example_translation: "The result was very surprising.".to_string(),
            mastery_level: MasteryLevel::clamped(4),
            created_at: now_millis - 1_000_000,
        },
    ]
}
