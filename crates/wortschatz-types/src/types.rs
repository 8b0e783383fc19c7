use crate::draft::{DraftField, WordDraft};
use crate::entry::{EntryId, WordEntry};

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// User input, ui -> app
    Command(UiCommand),
    /// Result of a spawned assist request, posted back into the app loop
    AssistFinished {
        request: u64,
        hint: String,
        result: Result<WordDraft, String>,
    },
    /// Fresh frame after a state change, app -> ui
    Render(Frame),
    Shutdown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    Navigate(View),
    Search(String),
    Delete(EntryId),
    Speak(String),
    Flip,
    Next,
    Previous,
    Grade(i32),
    Assist(String),
    SetField(DraftField, String),
    Save,
    Cancel,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Library,
    Study,
    Create,
}

/// Dashboard counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    /// mastery >= 4
    pub mastered: usize,
    /// 1..=3
    pub learning: usize,
    /// mastery == 0
    pub fresh: usize,
}

#[derive(Debug, Clone)]
pub struct Frame {
    pub screen: Screen,
    pub notice: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Screen {
    Library(LibraryScreen),
    Study(StudyScreen),
    Create(CreateScreen),
}

impl Screen {
    pub fn view(&self) -> View {
        match self {
            Screen::Library(_) => View::Library,
            Screen::Study(_) => View::Study,
            Screen::Create(_) => View::Create,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LibraryScreen {
    pub search: String,
    pub stats: Stats,
    pub rows: Vec<WordEntry>,
    /// Matches beyond the rendered rows
    pub hidden: usize,
}

#[derive(Debug, Clone)]
pub struct StudyScreen {
    /// `None` when the session has nothing to study
    pub card: Option<StudyCard>,
}

#[derive(Debug, Clone)]
pub struct StudyCard {
    pub entry: WordEntry,
    pub position: usize,
    pub total: usize,
    pub revealed: bool,
}

#[derive(Debug, Clone)]
pub struct CreateScreen {
    pub hint: String,
    pub draft: WordDraft,
    pub assisting: bool,
    pub errors: Vec<String>,
}
