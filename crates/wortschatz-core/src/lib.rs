pub mod form;
pub mod mastery;
pub mod search;
pub mod seed;
pub mod stats;
pub mod storage;
pub mod store;
pub mod study;

pub use storage::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, StorageError};
pub use store::WordStore;
pub use study::{MasteryTracker, StudySession, StudyStep};
