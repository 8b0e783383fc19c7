pub mod draft;
pub mod entry;
pub mod types;

pub use draft::{DraftField, WordDraft};
pub use entry::{EntryId, Gender, MasteryLevel, ParseTagError, PartOfSpeech, WordEntry};
pub use types::*;
