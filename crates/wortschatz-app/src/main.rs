use std::sync::Arc;

use anyhow::bail;
use clap::Parser;
use tokio::signal;
use wortschatz_config::Config;
use wortschatz_core::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, WordStore};

mod cli;
mod controller;
mod events;
mod logging;
mod profile;
mod router;
mod state;
mod ui;

#[cfg(test)]
mod tests;

use self::cli::{Cli, Command};
use self::controller::{AppController, spawn_stdin_reader};
use self::router::Model;
use self::state::AppState;
use self::ui::render::{badge, mastery_bar};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    logging::init_tracing(cli.log_format);

    let mut config = profile::load_config(&cli.profile)?;
    if let Some(dir) = cli.data_dir {
        config.storage.data_dir = Some(dir);
    }

    let command = cli.command.unwrap_or(Command::Run);
    if cli.ephemeral {
        dispatch(command, config, MemoryKeyValueStore::new()).await
    } else {
        let backend = FileKeyValueStore::from_config(&config.storage)?;
        tracing::info!("Data directory: {}", backend.root().display());
        dispatch(command, config, backend).await
    }
}

async fn dispatch<S>(command: Command, config: Config, backend: S) -> anyhow::Result<()>
where
    S: KeyValueStore + 'static,
{
    let store = WordStore::load(backend, config.storage.key.clone());

    match command {
        Command::Run => run(config, store).await,
        Command::List { search } => {
            list(&store, search.as_deref().unwrap_or_default());
            Ok(())
        }
        Command::Stats => {
            let stats = store.stats();
            println!(
                "Total {} | Mastered {} | Learning {} | New {}",
                stats.total, stats.mastered, stats.learning, stats.fresh
            );
            Ok(())
        }
        Command::Say { text } => say(config, text).await,
    }
}

pub async fn run<S>(config: Config, store: WordStore<S>) -> anyhow::Result<()>
where
    S: KeyValueStore + 'static,
{
    let model = Model::new(store, config.ui.list_limit);
    let state = Arc::new(AppState::new(config));
    let controller = AppController::new(state);

    let input_rx = spawn_stdin_reader()?;
    let mut tasks = controller.spawn_tasks(model, input_rx);

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::info!("Task finished, shutting down"),
                Ok(Err(e)) => tracing::error!("Task exited: {e}"),
                Err(e) => tracing::error!("Task panicked: {e}"),
            }
        }
    }

    controller.shutdown();
    while let Some(result) = tasks.join_next().await {
        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::error!("Task exited: {e}"),
            Err(e) => tracing::error!("Task panicked: {e}"),
        }
    }

    Ok(())
}

fn list<S: KeyValueStore>(store: &WordStore<S>, search: &str) {
    let rows = store.query(search);
    if rows.is_empty() {
        println!("No words found.");
        return;
    }

    for entry in rows {
        println!(
            "{} {}  {}  {}",
            badge(entry),
            entry.source_term,
            entry.translation,
            mastery_bar(entry.mastery_level)
        );
    }
}

async fn say(config: Config, text: String) -> anyhow::Result<()> {
    let text = text.trim().to_string();
    if text.is_empty() {
        bail!("Nothing to say");
    }

    let state = AppState::new(config);
    let Some(synthesizer) = state.synthesizer.clone() else {
        bail!("Speech needs a Gemini API key (set GEMINI_API_KEY)");
    };

    let timeout = state.request_timeout().await;
    events::speech::speak(synthesizer, state.sink.clone(), text, timeout).await;
    Ok(())
}
