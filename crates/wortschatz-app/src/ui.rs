use std::io::Write;
use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use wortschatz_config::Config;
use wortschatz_types::{AppEvent, Frame, Screen, UiCommand, View, WordEntry};

pub mod input;
pub mod render;

use input::{Input, help, parse};
use render::{RenderOptions, render};

/// What the UI does with one line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Send(UiCommand),
    Print(String),
    Nothing,
}

/// Resolves a line against the last frame shown, so row numbers match what the user saw.
pub fn interpret(line: &str, last_frame: Option<&Frame>) -> Action {
    let view = last_frame.map(|f| f.screen.view()).unwrap_or(View::Library);

    let input = match parse(view, line) {
        Ok(input) => input,
        Err(message) => return Action::Print(message),
    };

    let screen = last_frame.map(|f| &f.screen);
    match input {
        Input::Command(command) => Action::Send(command),
        Input::Help => Action::Print(help(view)),
        Input::Nothing => Action::Nothing,
        Input::DeleteRow(row) => match library_row(screen, row) {
            Some(entry) => Action::Send(UiCommand::Delete(entry.id.clone())),
            None => Action::Print(format!("No row {}", row + 1)),
        },
        Input::SpeakRow(row) => match library_row(screen, row) {
            Some(entry) => Action::Send(UiCommand::Speak(entry.source_term.clone())),
            None => Action::Print(format!("No row {}", row + 1)),
        },
        Input::SpeakCurrent => match screen {
            Some(Screen::Study(study)) => match &study.card {
                Some(card) => Action::Send(UiCommand::Speak(card.entry.source_term.clone())),
                None => Action::Print("Nothing to pronounce".to_string()),
            },
            _ => Action::Nothing,
        },
    }
}

fn library_row(screen: Option<&Screen>, row: usize) -> Option<&WordEntry> {
    match screen {
        Some(Screen::Library(library)) => library.rows.get(row),
        _ => None,
    }
}

fn print(text: &str) {
    let mut stdout = std::io::stdout().lock();
    let _ = writeln!(stdout, "{text}");
    let _ = stdout.flush();
}

/// Terminal front end: draws frames and forwards parsed input lines.
pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    input_rx: AsyncReceiver<String>,
    config: Arc<RwLock<Config>>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut last_frame: Option<Frame> = None;
    let mut input_open = true;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!("[UI] Cancelled");
                break;
            }
            event = app_to_ui_rx.recv() => match event? {
                AppEvent::Render(frame) => {
                    let options = RenderOptions::from_config(&*config.read().await);
                    print(&render(&frame, &options));
                    last_frame = Some(frame);
                }
                AppEvent::Shutdown => {
                    tracing::debug!("[UI] Shutdown received");
                    break;
                }
                _ => {}
            },
            line = input_rx.recv(), if input_open => match line {
                Ok(line) => match interpret(&line, last_frame.as_ref()) {
                    Action::Send(command) => ui_to_app_tx.send(AppEvent::Command(command)).await?,
                    Action::Print(text) => print(&text),
                    Action::Nothing => {}
                },
                Err(_) => {
                    tracing::debug!("[UI] Input closed, quitting");
                    input_open = false;
                    ui_to_app_tx.send(AppEvent::Command(UiCommand::Quit)).await?;
                }
            },
        }
    }

    Ok(())
}
