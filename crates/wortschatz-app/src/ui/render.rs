use std::fmt::Write;

use wortschatz_config::Config;
use wortschatz_types::{
    CreateScreen, Frame, LibraryScreen, MasteryLevel, PartOfSpeech, Screen, StudyScreen, WordEntry,
};

const PROGRESS_WIDTH: usize = 20;

/// Display settings pulled from the config once per frame.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub show_examples: bool,
    pub source_language: String,
    pub learner_language: String,
}

impl RenderOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            show_examples: config.ui.show_examples,
            source_language: config.genai.source_language.clone(),
            learner_language: config.genai.learner_language.clone(),
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

pub fn render(frame: &Frame, options: &RenderOptions) -> String {
    let mut out = String::new();

    match &frame.screen {
        Screen::Library(screen) => library(&mut out, screen, options),
        Screen::Study(screen) => study(&mut out, screen, options),
        Screen::Create(screen) => create(&mut out, screen),
    }

    if let Some(notice) = &frame.notice {
        let _ = writeln!(out, "\n> {notice}");
    }

    out
}

/// `[der Noun]`, or just the type when there is no gender.
pub fn badge(entry: &WordEntry) -> String {
    match entry.grammatical_gender {
        Some(gender) => format!("[{} {}]", gender.article(), entry.part_of_speech),
        None => format!("[{}]", entry.part_of_speech),
    }
}

/// `●●○○○ Mastery 2/5`
pub fn mastery_bar(level: MasteryLevel) -> String {
    let filled = level.value() as usize;
    let empty = MasteryLevel::MAX.value() as usize - filled;
    format!(
        "{}{} Mastery {}/{}",
        "●".repeat(filled),
        "○".repeat(empty),
        level,
        MasteryLevel::MAX
    )
}

pub fn progress_bar(fraction: f32) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * PROGRESS_WIDTH as f32).round()) as usize;
    format!(
        "[{}{}]",
        "#".repeat(filled),
        "-".repeat(PROGRESS_WIDTH - filled)
    )
}

fn library(out: &mut String, screen: &LibraryScreen, options: &RenderOptions) {
    let stats = screen.stats;
    let _ = writeln!(out, "== My Collection ==");
    let _ = writeln!(
        out,
        "Total {} | Mastered {} | Learning {} | New {}",
        stats.total, stats.mastered, stats.learning, stats.fresh
    );

    if !screen.search.is_empty() {
        let _ = writeln!(out, "Search: \"{}\"", screen.search);
    }
    out.push('\n');

    if screen.rows.is_empty() {
        let _ = writeln!(out, "No words found.");
        if screen.search.is_empty() {
            let _ = writeln!(out, "Your collection is empty. Type :add to add your first word.");
        } else {
            let _ = writeln!(out, "Try another search, or / to clear it.");
        }
        return;
    }

    for (i, entry) in screen.rows.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}. {} {}  {}",
            i + 1,
            badge(entry),
            entry.source_term,
            entry.translation
        );
        if options.show_examples {
            let _ = writeln!(
                out,
                "     \"{}\" / \"{}\"",
                entry.example_sentence, entry.example_translation
            );
        }
        let _ = writeln!(out, "     {}", mastery_bar(entry.mastery_level));
    }

    if screen.hidden > 0 {
        let _ = writeln!(out, "\n({} more, narrow the search to see them)", screen.hidden);
    }
}

fn study(out: &mut String, screen: &StudyScreen, options: &RenderOptions) {
    let _ = writeln!(out, "== Study ==");

    let Some(card) = &screen.card else {
        let _ = writeln!(out, "No words to study yet!");
        let _ = writeln!(
            out,
            "Everything is mastered or the collection is empty. Type exit to go back."
        );
        return;
    };

    let fraction = (card.position + 1) as f32 / card.total as f32;
    let _ = writeln!(
        out,
        "Word {} of {}  {}\n",
        card.position + 1,
        card.total,
        progress_bar(fraction)
    );

    let entry = &card.entry;
    let _ = writeln!(out, "{}: {}", options.source_language, entry.source_term);

    if card.revealed {
        let _ = writeln!(out, "{}: {}", options.learner_language, entry.translation);
        let _ = writeln!(out, "{}", badge(entry));
        let _ = writeln!(
            out,
            "\"{}\"\n\"{}\"",
            entry.example_sentence, entry.example_translation
        );
        let _ = writeln!(out, "\nk I know it | x I forgot | n next | p previous");
    } else {
        let _ = writeln!(out, "\n(enter to flip)");
    }
}

fn create(out: &mut String, screen: &CreateScreen) {
    let draft = &screen.draft;
    let text = |value: &Option<String>| value.clone().unwrap_or_default();

    let _ = writeln!(out, "== Add New Word ==");
    if screen.assisting {
        let _ = writeln!(out, "AI fill: looking up \"{}\"...", screen.hint);
    } else {
        let _ = writeln!(out, "AI fill: ai WORD");
    }
    out.push('\n');

    let _ = writeln!(out, "term:                {}", text(&draft.source_term));
    let _ = writeln!(out, "translation:         {}", text(&draft.translation));
    let _ = writeln!(
        out,
        "type:                {}",
        draft.part_of_speech.map(|p| p.to_string()).unwrap_or_default()
    );
    if draft.part_of_speech == Some(PartOfSpeech::Noun) {
        let _ = writeln!(
            out,
            "gender:              {}",
            draft
                .grammatical_gender
                .map(|g| g.to_string())
                .unwrap_or_else(|| "none".to_string())
        );
    }
    let _ = writeln!(out, "example:             {}", text(&draft.example_sentence));
    let _ = writeln!(out, "example-translation: {}", text(&draft.example_translation));

    for error in &screen.errors {
        let _ = writeln!(out, "! {error}");
    }
}

#[cfg(test)]
mod tests {
    use wortschatz_types::{EntryId, Gender, Stats, StudyCard, WordDraft};

    use super::*;

    fn entry(term: &str, pos: PartOfSpeech, gender: Option<Gender>, level: i64) -> WordEntry {
        WordEntry {
            id: EntryId::new(term),
            source_term: term.to_string(),
            translation: format!("{term}-en"),
            part_of_speech: pos,
            grammatical_gender: gender,
            example_sentence: "Satz.".to_string(),
            example_translation: "Sentence.".to_string(),
            mastery_level: MasteryLevel::clamped(level),
            created_at: 0,
        }
    }

    #[test]
    fn bars() {
        assert_eq!(mastery_bar(MasteryLevel::clamped(2)), "●●○○○ Mastery 2/5");
        assert_eq!(mastery_bar(MasteryLevel::clamped(5)), "●●●●● Mastery 5/5");
        assert_eq!(progress_bar(0.5).matches('#').count(), PROGRESS_WIDTH / 2);
        assert_eq!(progress_bar(1.0), format!("[{}]", "#".repeat(PROGRESS_WIDTH)));
    }

    #[test]
    fn badge_shows_article_only_with_gender() {
        let noun = entry("Haus", PartOfSpeech::Noun, Some(Gender::Das), 0);
        let verb = entry("laufen", PartOfSpeech::Verb, None, 0);
        assert_eq!(badge(&noun), "[das Noun]");
        assert_eq!(badge(&verb), "[Verb]");
    }

    #[test]
    fn library_lists_rows_and_empty_state() {
        let frame = Frame {
            screen: Screen::Library(LibraryScreen {
                search: String::new(),
                stats: Stats {
                    total: 1,
                    mastered: 0,
                    learning: 1,
                    fresh: 0,
                },
                rows: vec![entry("Haus", PartOfSpeech::Noun, Some(Gender::Das), 2)],
                hidden: 0,
            }),
            notice: Some("Saved 'Haus'".into()),
        };

        let text = render(&frame, &RenderOptions::default());
        assert!(text.contains("1. [das Noun] Haus  Haus-en"));
        assert!(text.contains("●●○○○ Mastery 2/5"));
        assert!(text.contains("> Saved 'Haus'"));

        let empty = Frame {
            screen: Screen::Library(LibraryScreen {
                search: "zzz".into(),
                stats: Stats::default(),
                rows: Vec::new(),
                hidden: 0,
            }),
            notice: None,
        };
        assert!(render(&empty, &RenderOptions::default()).contains("No words found"));
    }

    #[test]
    fn study_hides_the_back_until_flipped() {
        let mut card = StudyCard {
            entry: entry("Haus", PartOfSpeech::Noun, Some(Gender::Das), 1),
            position: 1,
            total: 4,
            revealed: false,
        };
        let options = RenderOptions::default();

        let front = render(
            &Frame {
                screen: Screen::Study(StudyScreen {
                    card: Some(card.clone()),
                }),
                notice: None,
            },
            &options,
        );
        assert!(front.contains("Word 2 of 4"));
        assert!(front.contains("German: Haus"));
        assert!(!front.contains("Haus-en"));

        card.revealed = true;
        let back = render(
            &Frame {
                screen: Screen::Study(StudyScreen { card: Some(card) }),
                notice: None,
            },
            &options,
        );
        assert!(back.contains("English: Haus-en"));

        let empty = render(
            &Frame {
                screen: Screen::Study(StudyScreen { card: None }),
                notice: None,
            },
            &options,
        );
        assert!(empty.contains("No words to study yet!"));
    }

    #[test]
    fn gender_line_only_for_nouns() {
        let mut screen = CreateScreen {
            hint: String::new(),
            draft: WordDraft::form_default(),
            assisting: false,
            errors: vec!["term is required".into()],
        };

        let noun = render(
            &Frame {
                screen: Screen::Create(screen.clone()),
                notice: None,
            },
            &RenderOptions::default(),
        );
        assert!(noun.contains("gender:"));
        assert!(noun.contains("! term is required"));

        screen.draft.part_of_speech = Some(PartOfSpeech::Verb);
        let verb = render(
            &Frame {
                screen: Screen::Create(screen),
                notice: None,
            },
            &RenderOptions::default(),
        );
        assert!(!verb.contains("gender:"));
    }
}
