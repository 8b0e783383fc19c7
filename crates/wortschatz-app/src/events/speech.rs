use std::sync::Arc;
use std::time::Duration;

use wortschatz_audio::{AudioSink, decode_base64_pcm16};
use wortschatz_genai::SpeechSynthesizer;

/// Synthesizes and outputs `text`. Failures are logged, never surfaced.
pub async fn speak(
    synthesizer: Arc<dyn SpeechSynthesizer>,
    sink: Arc<dyn AudioSink>,
    text: String,
    timeout: Duration,
) {
    tracing::debug!("[SPEECH] Synthesizing '{}'", text);

    let clip = match tokio::time::timeout(timeout, synthesizer.synthesize(&text)).await {
        Ok(Ok(clip)) => clip,
        Ok(Err(e)) => {
            tracing::warn!("[SPEECH] Synthesis failed for '{text}': {e}");
            return;
        }
        Err(_) => {
            tracing::warn!("[SPEECH] Synthesis timed out for '{text}'");
            return;
        }
    };

    let buffer = match decode_base64_pcm16(&clip.pcm_base64, clip.sample_rate) {
        Ok(buffer) => buffer,
        Err(e) => {
            tracing::warn!("[SPEECH] Undecodable audio for '{text}': {e}");
            return;
        }
    };

    tracing::debug!(
        "[SPEECH] {:.2}s of audio to '{}' sink",
        buffer.duration_secs(),
        sink.name()
    );

    match tokio::task::spawn_blocking(move || sink.play(&buffer)).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::warn!("[SPEECH] Output failed: {e}"),
        Err(e) => tracing::error!("[SPEECH] Output task panicked: {e}"),
    }
}
