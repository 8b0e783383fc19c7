use std::sync::Arc;
use std::time::Duration;

use kanal::AsyncSender;
use wortschatz_genai::EntryAssistant;
use wortschatz_types::AppEvent;

/// Runs the request off the loop and posts the outcome back as `AssistFinished`.
pub fn spawn_assist(
    assistant: Arc<dyn EntryAssistant>,
    request: u64,
    hint: String,
    timeout: Duration,
    loopback_tx: AsyncSender<AppEvent>,
) {
    tokio::spawn(async move {
        tracing::debug!("[ASSIST] Request #{} for '{}'", request, hint);

        let result = match tokio::time::timeout(timeout, assistant.suggest_entry(&hint)).await {
            Ok(Ok(draft)) => Ok(draft),
            Ok(Err(e)) => Err(e.to_string()),
            Err(_) => Err(format!("no answer within {}s", timeout.as_secs())),
        };

        if let Err(e) = loopback_tx
            .send(AppEvent::AssistFinished {
                request,
                hint,
                result,
            })
            .await
        {
            tracing::debug!("[ASSIST] Event loop gone, dropping result: {e}");
        }
    });
}
