use wortschatz_core::form::CreateForm;
use wortschatz_core::{KeyValueStore, StudySession, WordStore};
use wortschatz_types::{CreateScreen, Frame, LibraryScreen, Screen, StudyCard, StudyScreen, View};

/// State of the active view. Leaving a view drops its state.
#[derive(Debug)]
pub enum ViewState {
    Library,
    Study(StudySession),
    Create(CreateForm),
}

impl ViewState {
    pub fn view(&self) -> View {
        match self {
            ViewState::Library => View::Library,
            ViewState::Study(_) => View::Study,
            ViewState::Create(_) => View::Create,
        }
    }
}

/// Everything the event loop owns: the store and the routed view.
pub struct Model<S: KeyValueStore> {
    pub store: WordStore<S>,
    pub view: ViewState,
    /// Library search, kept across view switches
    pub search: String,
    /// One-shot message shown with the next frame
    pub notice: Option<String>,
    list_limit: usize,
    next_request: u64,
}

impl<S: KeyValueStore> Model<S> {
    pub fn new(store: WordStore<S>, list_limit: usize) -> Self {
        Self {
            store,
            view: ViewState::Library,
            search: String::new(),
            notice: None,
            list_limit: list_limit.max(1),
            next_request: 0,
        }
    }

    /// Fresh id for an assist request. Ids are never reused, so a reopened form
    /// cannot match an answer meant for an earlier one.
    pub fn next_request_id(&mut self) -> u64 {
        self.next_request += 1;
        self.next_request
    }

    pub fn current_view(&self) -> View {
        self.view.view()
    }

    /// Switches views. Re-selecting the active view keeps its state.
    pub fn navigate(&mut self, view: View) {
        if self.current_view() == view {
            return;
        }

        tracing::debug!("Navigating {:?} -> {:?}", self.current_view(), view);
        self.view = match view {
            View::Library => ViewState::Library,
            View::Study => ViewState::Study(StudySession::new(self.store.study_deck())),
            View::Create => ViewState::Create(CreateForm::new()),
        };
    }

    pub fn study_mut(&mut self) -> Option<(&mut StudySession, &mut WordStore<S>)> {
        match &mut self.view {
            ViewState::Study(session) => Some((session, &mut self.store)),
            _ => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut CreateForm> {
        match &mut self.view {
            ViewState::Create(form) => Some(form),
            _ => None,
        }
    }

    pub fn screen(&self) -> Screen {
        match &self.view {
            ViewState::Library => {
                let found = self.store.query(&self.search);
                let hidden = found.len().saturating_sub(self.list_limit);
                Screen::Library(LibraryScreen {
                    search: self.search.clone(),
                    stats: self.store.stats(),
                    rows: found.into_iter().take(self.list_limit).cloned().collect(),
                    hidden,
                })
            }
            ViewState::Study(session) => {
                let card = session
                    .current()
                    .zip(session.position())
                    .map(|(entry, (position, total))| StudyCard {
                        entry: entry.clone(),
                        position,
                        total,
                        revealed: session.is_revealed(),
                    });
                Screen::Study(StudyScreen { card })
            }
            ViewState::Create(form) => Screen::Create(CreateScreen {
                hint: form.hint.clone(),
                draft: form.draft.clone(),
                assisting: form.is_assisting(),
                errors: form.errors.iter().map(ToString::to_string).collect(),
            }),
        }
    }

    /// Next frame; consumes the pending notice.
    pub fn frame(&mut self) -> Frame {
        Frame {
            screen: self.screen(),
            notice: self.notice.take(),
        }
    }
}
