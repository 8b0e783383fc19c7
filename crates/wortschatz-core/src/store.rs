use std::time::{SystemTime, UNIX_EPOCH};

use wortschatz_types::{EntryId, MasteryLevel, Stats, WordEntry};

use crate::form::NewEntry;
use crate::mastery;
use crate::search;
use crate::seed::seed_entries;
use crate::stats;
use crate::storage::{KeyValueStore, StorageError};
use crate::study::MasteryTracker;

pub fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}

/// The word collection, mirrored to one key-value slot.
///
/// Every mutating operation persists the whole collection before returning.
/// Persistence is best effort: a failed write is logged and the in-memory
/// state stays authoritative.
pub struct WordStore<S: KeyValueStore> {
    backend: S,
    key: String,
    entries: Vec<WordEntry>,
}

impl<S: KeyValueStore> WordStore<S> {
    /// Reads the slot, falling back to the seed set when it is missing or unreadable.
    pub fn load(mut backend: S, key: impl Into<String>) -> Self {
        let key = key.into();

        let entries = match backend.read(&key) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<WordEntry>>(&raw) {
                Ok(mut entries) => {
                    entries.iter_mut().for_each(WordEntry::normalize_gender);
                    tracing::info!("Loaded {} entries from '{}'", entries.len(), key);
                    entries
                }
                Err(e) => {
                    tracing::warn!(
                        "Stored collection in '{key}' is unreadable, starting from seed: {e}"
                    );
                    let backup = format!("{key}-corrupt");
                    if let Err(e) = backend.write(&backup, &raw) {
                        tracing::error!("Failed to back up unreadable collection: {e}");
                    }
                    seed_entries(now_millis())
                }
            },
            Ok(None) => {
                tracing::info!("No stored collection in '{key}', starting from seed");
                seed_entries(now_millis())
            }
            Err(e) => {
                tracing::warn!("Failed to read '{key}', starting from seed: {e}");
                seed_entries(now_millis())
            }
        };

        Self {
            backend,
            key,
            entries,
        }
    }

    /// Wraps an existing collection without touching the backend.
    pub fn from_entries(backend: S, key: impl Into<String>, entries: Vec<WordEntry>) -> Self {
        Self {
            backend,
            key: key.into(),
            entries,
        }
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    pub fn get(&self, id: &EntryId) -> Option<&WordEntry> {
        self.entries.iter().find(|e| &e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Adds a new entry at the front with a fresh id, mastery 0 and the current time.
    pub fn insert(&mut self, new_entry: NewEntry) -> EntryId {
        let mut id = EntryId::generate();
        while self.get(&id).is_some() {
            id = EntryId::generate();
        }

        let entry = new_entry.into_entry(id.clone(), now_millis());
        tracing::debug!("Inserting '{}' as {}", entry.source_term, id);
        self.entries.insert(0, entry);
        self.save();
        id
    }

    /// Removes the entry; `false` (and no write) when it does not exist.
    pub fn remove(&mut self, id: &EntryId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| &e.id != id);

        if self.entries.len() == before {
            tracing::debug!("Remove of unknown entry {id} ignored");
            return false;
        }

        self.save();
        true
    }

    /// Applies a clamped mastery delta; `None` when the entry does not exist.
    pub fn adjust_mastery(&mut self, id: &EntryId, delta: i32) -> Option<MasteryLevel> {
        let entry = self.entries.iter_mut().find(|e| &e.id == id)?;
        entry.mastery_level = mastery::adjust(entry.mastery_level, delta);
        let level = entry.mastery_level;

        self.save();
        Some(level)
    }

    /// Writes the whole collection to the slot.
    pub fn persist(&mut self) -> Result<(), StorageError> {
        let json = serde_json::to_string(&self.entries)?;
        self.backend.write(&self.key, &json)
    }

    fn save(&mut self) {
        if let Err(e) = self.persist() {
            tracing::error!("Failed to persist collection to '{}': {e}", self.key);
        }
    }

    /// Filter/sort view over the collection.
    pub fn query(&self, search: &str) -> Vec<&WordEntry> {
        search::filter_sorted(&self.entries, search)
    }

    pub fn stats(&self) -> Stats {
        stats::compute(&self.entries)
    }

    /// Entries still worth studying, in collection order.
    pub fn study_deck(&self) -> Vec<WordEntry> {
        self.entries
            .iter()
            .filter(|e| !e.mastery_level.is_max())
            .cloned()
            .collect()
    }
}

impl<S: KeyValueStore> MasteryTracker for WordStore<S> {
    fn adjust_mastery(&mut self, id: &EntryId, delta: i32) -> Option<MasteryLevel> {
        WordStore::adjust_mastery(self, id, delta)
    }
}

#[cfg(test)]
mod tests {
    use wortschatz_types::{Gender, PartOfSpeech, WordDraft};

    use super::*;
    use crate::form::validate;
    use crate::storage::MemoryKeyValueStore;

    const KEY: &str = "words";

    fn new_entry(term: &str, translation: &str) -> NewEntry {
        let draft = WordDraft {
            source_term: Some(term.to_string()),
            translation: Some(translation.to_string()),
            part_of_speech: Some(PartOfSpeech::Noun),
            grammatical_gender: Some(Gender::Das),
            example_sentence: Some(format!("Das ist {term}.")),
            example_translation: Some(format!("That is {translation}.")),
        };
        validate(&draft).unwrap()
    }

    fn stored(backend: &MemoryKeyValueStore) -> Vec<WordEntry> {
        serde_json::from_str(&backend.get(KEY).unwrap()).unwrap()
    }

    fn empty_store() -> (WordStore<MemoryKeyValueStore>, MemoryKeyValueStore) {
        let backend = MemoryKeyValueStore::with_slot(KEY, "[]");
        (WordStore::load(backend.clone(), KEY), backend)
    }

    #[test]
    fn missing_slot_loads_seed_set() {
        let store = WordStore::load(MemoryKeyValueStore::new(), KEY);
        assert_eq!(store.len(), 2);
        assert_eq!(store.entries()[0].source_term, "die Herausforderung");
        assert_eq!(store.entries()[1].mastery_level.value(), 4);
    }

    #[test]
    fn unreadable_slot_falls_back_to_seed_and_keeps_a_backup() {
        let backend = MemoryKeyValueStore::with_slot(KEY, "{not json");
        let store = WordStore::load(backend.clone(), KEY);

        assert_eq!(store.len(), 2);
        assert_eq!(backend.get("words-corrupt").as_deref(), Some("{not json"));
    }

    #[test]
    fn empty_collection_round_trips() {
        let (store, _) = empty_store();
        assert!(store.is_empty());
    }

    #[test]
    fn collection_round_trips_through_the_slot() {
        let (mut store, backend) = empty_store();
        store.insert(new_entry("das Haus", "house"));
        store.insert(new_entry("das Auto", "car"));

        let reloaded = WordStore::load(backend, KEY);
        assert_eq!(reloaded.entries(), store.entries());
    }

    #[test]
    fn insert_assigns_fresh_fields_and_prepends() {
        let (mut store, backend) = empty_store();
        let first = store.insert(new_entry("das Haus", "house"));

        let before = now_millis();
        let second = store.insert(new_entry("das Auto", "car"));

        assert_ne!(first, second);
        let entry = store.get(&second).unwrap();
        assert_eq!(entry.mastery_level, MasteryLevel::MIN);
        assert!(entry.created_at >= before);
        assert_eq!(store.query("")[0].id, second);
        assert_eq!(store.entries()[0].id, second);
        assert_eq!(stored(&backend).len(), 2);
    }

    #[test]
    fn removing_unknown_id_is_a_no_op() {
        let (mut store, _) = empty_store();
        store.insert(new_entry("das Haus", "house"));

        assert!(!store.remove(&EntryId::new("missing")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_persists() {
        let (mut store, backend) = empty_store();
        let id = store.insert(new_entry("das Haus", "house"));

        assert!(store.remove(&id));
        assert!(stored(&backend).is_empty());
    }

    #[test]
    fn adjust_mastery_clamps_and_persists() {
        let (mut store, backend) = empty_store();
        let id = store.insert(new_entry("das Haus", "house"));

        assert_eq!(store.adjust_mastery(&id, -1), Some(MasteryLevel::MIN));
        assert_eq!(store.adjust_mastery(&id, 9), Some(MasteryLevel::MAX));
        assert_eq!(store.adjust_mastery(&EntryId::new("nope"), 1), None);
        assert_eq!(stored(&backend)[0].mastery_level, MasteryLevel::MAX);
    }

    #[test]
    fn loading_drops_gender_of_non_nouns() {
        let raw = r#"[{
            "id": "v",
            "sourceTerm": "gehen",
            "translation": "to go",
            "partOfSpeech": "Verb",
            "grammaticalGender": "der",
            "exampleSentence": "Wir gehen.",
            "exampleTranslation": "We go.",
            "masteryLevel": 1,
            "createdAt": 3
        }]"#;
        let store = WordStore::load(MemoryKeyValueStore::with_slot(KEY, raw), KEY);
        assert_eq!(store.entries()[0].grammatical_gender, None);
    }

    #[test]
    fn study_deck_skips_mastered_entries() {
        let (mut store, _) = empty_store();
        let id = store.insert(new_entry("das Haus", "house"));
        store.insert(new_entry("das Auto", "car"));
        store.adjust_mastery(&id, 5);

        let deck = store.study_deck();
        assert_eq!(deck.len(), 1);
        assert_eq!(deck[0].source_term, "das Auto");
    }

    #[test]
    fn stats_bucket_by_mastery() {
        let store = WordStore::load(MemoryKeyValueStore::new(), KEY);
        let stats = store.stats();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.learning, 1);
        assert_eq!(stats.mastered, 1);
        assert_eq!(stats.fresh, 0);
    }
}
