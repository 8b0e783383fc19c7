use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio_util::sync::CancellationToken;
use wortschatz_core::KeyValueStore;
use wortschatz_types::{AppEvent, UiCommand};

use crate::router::{Model, ViewState};
use crate::state::AppState;

pub mod assist;
pub mod create;
pub mod library;
pub mod speech;
pub mod study;

use assist::spawn_assist;
use create::{handle_assist, handle_assist_finished, handle_cancel, handle_save, handle_set_field};
use library::{handle_delete, handle_search};
use speech::speak;
use study::{handle_flip, handle_grade, handle_next, handle_previous};

/// Work a handler asks the loop to start once the model is updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Assist { request: u64, hint: String },
    Speak(String),
    Exit,
}

/// App's main loop. Owns the model; every handled event is followed by a frame.
pub async fn event_loop<S>(
    state: Arc<AppState>,
    mut model: Model<S>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    loopback_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()>
where
    S: KeyValueStore + 'static,
{
    tracing::info!("[EVENT_LOOP] Starting with {} entries", model.store.len());
    app_to_ui_tx.send(AppEvent::Render(model.frame())).await?;

    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("[EVENT_LOOP] Cancelled");
                break;
            }
            event = ui_to_app_rx.recv() => event?,
        };

        tracing::debug!("[EVENT_LOOP] Event: {:?}", std::mem::discriminant(&event));

        let mut exit = false;
        for effect in handle_event(&mut model, event) {
            match effect {
                Effect::Exit => exit = true,
                effect => run_effect(&state, &mut model, &loopback_tx, effect).await,
            }
        }

        if exit {
            tracing::info!("[EVENT_LOOP] Quit requested");
            let _ = app_to_ui_tx.send(AppEvent::Shutdown).await;
            cancel.cancel();
            break;
        }

        app_to_ui_tx.send(AppEvent::Render(model.frame())).await?;
    }

    Ok(())
}

/// Applies one event to the model. Pure state transition, no I/O besides persistence.
pub fn handle_event<S: KeyValueStore>(model: &mut Model<S>, event: AppEvent) -> Vec<Effect> {
    match event {
        AppEvent::Command(command) => handle_command(model, command),
        AppEvent::AssistFinished {
            request,
            hint,
            result,
        } => {
            handle_assist_finished(model, request, &hint, result);
            Vec::new()
        }
        AppEvent::Render(_) | AppEvent::Shutdown => {
            // UI-only events
            Vec::new()
        }
    }
}

fn handle_command<S: KeyValueStore>(model: &mut Model<S>, command: UiCommand) -> Vec<Effect> {
    match command {
        UiCommand::Navigate(view) => model.navigate(view),
        UiCommand::Search(text) => handle_search(model, text),
        UiCommand::Delete(id) => handle_delete(model, &id),
        UiCommand::Speak(text) => {
            let text = text.trim();
            if !text.is_empty() {
                return vec![Effect::Speak(text.to_string())];
            }
        }
        UiCommand::Flip => handle_flip(model),
        UiCommand::Next => handle_next(model),
        UiCommand::Previous => handle_previous(model),
        UiCommand::Grade(delta) => handle_grade(model, delta),
        UiCommand::Assist(hint) => return handle_assist(model, &hint).into_iter().collect(),
        UiCommand::SetField(field, value) => handle_set_field(model, field, &value),
        UiCommand::Save => handle_save(model),
        UiCommand::Cancel => handle_cancel(model),
        UiCommand::Quit => return vec![Effect::Exit],
    }

    Vec::new()
}

async fn run_effect<S: KeyValueStore>(
    state: &AppState,
    model: &mut Model<S>,
    loopback_tx: &AsyncSender<AppEvent>,
    effect: Effect,
) {
    let timeout = state.request_timeout().await;

    match effect {
        Effect::Assist { request, hint } => match &state.assistant {
            Some(assistant) => {
                spawn_assist(assistant.clone(), request, hint, timeout, loopback_tx.clone());
            }
            None => {
                if let ViewState::Create(form) = &mut model.view {
                    form.pending = None;
                }
                model.notice = Some("AI fill is unavailable: no API key configured".to_string());
            }
        },
        Effect::Speak(text) => match &state.synthesizer {
            Some(synthesizer) => {
                tokio::spawn(speak(
                    synthesizer.clone(),
                    state.sink.clone(),
                    text,
                    timeout,
                ));
            }
            None => model.notice = Some("Speech is unavailable".to_string()),
        },
        Effect::Exit => {}
    }
}
