use wortschatz_types::{DraftField, UiCommand, View};

/// One parsed input line.
///
/// Row numbers are zero-based here; the screen shows them from 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Command(UiCommand),
    DeleteRow(usize),
    SpeakRow(usize),
    SpeakCurrent,
    Help,
    Nothing,
}

pub fn parse(view: View, line: &str) -> Result<Input, String> {
    let trimmed = line.trim();

    if let Some(input) = parse_global(trimmed)? {
        return Ok(input);
    }

    match view {
        View::Library => parse_library(line, trimmed),
        View::Study => parse_study(trimmed),
        View::Create => parse_create(trimmed),
    }
}

fn parse_global(line: &str) -> Result<Option<Input>, String> {
    let input = match line {
        "?" | ":h" | ":help" => Input::Help,
        ":l" | ":library" => Input::Command(UiCommand::Navigate(View::Library)),
        ":s" | ":study" => Input::Command(UiCommand::Navigate(View::Study)),
        ":a" | ":add" => Input::Command(UiCommand::Navigate(View::Create)),
        ":q" | ":quit" => Input::Command(UiCommand::Quit),
        other if other.starts_with(':') => return Err(format!("Unknown command {other}")),
        _ => return Ok(None),
    };
    Ok(Some(input))
}

fn split_word(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    }
}

fn row_number(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("Expected a row number, got '{raw}'")),
    }
}

fn parse_library(raw: &str, line: &str) -> Result<Input, String> {
    // Search text keeps inner and trailing spaces as typed
    if let Some(search) = raw.trim_start().strip_prefix('/') {
        let search = search.trim_end_matches(['\r', '\n']);
        return Ok(Input::Command(UiCommand::Search(search.to_string())));
    }

    let (head, rest) = split_word(line);
    match head {
        "" => Ok(Input::Nothing),
        "del" | "d" => row_number(rest).map(Input::DeleteRow),
        "say" => row_number(rest).map(Input::SpeakRow),
        _ => Err(format!("Unknown library command '{head}', try ?")),
    }
}

fn parse_study(line: &str) -> Result<Input, String> {
    let command = match line {
        "" | "f" | "flip" => UiCommand::Flip,
        "n" | "next" => UiCommand::Next,
        "p" | "prev" => UiCommand::Previous,
        "k" | "know" => UiCommand::Grade(1),
        "x" | "forgot" => UiCommand::Grade(-1),
        "exit" => UiCommand::Navigate(View::Library),
        "say" => return Ok(Input::SpeakCurrent),
        other => return Err(format!("Unknown study command '{other}', try ?")),
    };
    Ok(Input::Command(command))
}

fn parse_create(line: &str) -> Result<Input, String> {
    let (head, rest) = split_word(line);

    let command = match head {
        "" => return Ok(Input::Nothing),
        "ai" | "assist" => {
            if rest.is_empty() {
                return Err("Usage: ai WORD".to_string());
            }
            UiCommand::Assist(rest.to_string())
        }
        "set" => {
            let (field, value) = split_word(rest);
            if field.is_empty() {
                return Err("Usage: set FIELD VALUE".to_string());
            }
            let field = field.parse::<DraftField>().map_err(|e| e.to_string())?;
            UiCommand::SetField(field, value.to_string())
        }
        "save" => UiCommand::Save,
        "cancel" => UiCommand::Cancel,
        other => return Err(format!("Unknown form command '{other}', try ?")),
    };
    Ok(Input::Command(command))
}

pub fn help(view: View) -> String {
    let local = match view {
        View::Library => "/TEXT search (/ clears), del N delete row, say N pronounce row",
        View::Study => "enter or f flip, n next, p previous, k I know it, x I forgot, say, exit",
        View::Create => {
            "ai WORD fill with AI, \
             set FIELD VALUE (term, translation, type, gender, example, example-translation), \
             save, cancel"
        }
    };

    format!("Commands: {local}\nAnywhere: :library :study :add :help :quit")
}
