use wortschatz_types::{EntryId, MasteryLevel, WordEntry};

/// Whatever owns mastery scores; the word store in practice.
pub trait MasteryTracker {
    fn adjust_mastery(&mut self, id: &EntryId, delta: i32) -> Option<MasteryLevel>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudyStep {
    Moved,
    /// Past the last card; the session is over
    Finished,
}

/// One flip-card pass over a fixed snapshot of entries.
#[derive(Debug, Clone)]
pub struct StudySession {
    entries: Vec<WordEntry>,
    cursor: usize,
    revealed: bool,
}

impl StudySession {
    /// Snapshots every entry below max mastery, keeping the given order.
    pub fn new(entries: impl IntoIterator<Item = WordEntry>) -> Self {
        let entries = entries
            .into_iter()
            .filter(|e| !e.mastery_level.is_max())
            .collect();

        Self {
            entries,
            cursor: 0,
            revealed: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    pub fn current(&self) -> Option<&WordEntry> {
        self.entries.get(self.cursor)
    }

    /// `(cursor, len)`, `None` for an empty session.
    pub fn position(&self) -> Option<(usize, usize)> {
        if self.is_empty() {
            return None;
        }
        Some((self.cursor, self.entries.len()))
    }

    /// Share of the session reached so far, counting the current card.
    pub fn progress(&self) -> f32 {
        match self.position() {
            Some((cursor, len)) => (cursor + 1) as f32 / len as f32,
            None => 0.0,
        }
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn flip(&mut self) {
        if !self.is_empty() {
            self.revealed = !self.revealed;
        }
    }

    pub fn advance(&mut self) -> StudyStep {
        self.revealed = false;
        if self.is_empty() {
            return StudyStep::Finished;
        }

        if self.cursor < self.entries.len() - 1 {
            self.cursor += 1;
            StudyStep::Moved
        } else {
            StudyStep::Finished
        }
    }

    pub fn retreat(&mut self) {
        self.revealed = false;
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    /// Scores the current card, then moves on.
    pub fn grade(&mut self, tracker: &mut impl MasteryTracker, delta: i32) -> StudyStep {
        let Some(current) = self.current() else {
            return StudyStep::Finished;
        };

        let id = current.id.clone();
        match tracker.adjust_mastery(&id, delta) {
            Some(level) => {
                tracing::debug!("Graded {id} by {delta:+}, mastery now {level}");
                if let Some(entry) = self.entries.get_mut(self.cursor) {
                    entry.mastery_level = level;
                }
            }
            None => tracing::warn!("Graded entry {id} no longer exists"),
        }

        self.advance()
    }
}
