use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;

use super::support::{BrokenSynthesizer, FakeSynthesizer, RecordingSink};
use crate::events::speech::speak;

async fn speak_with(synthesizer: BrokenSynthesizer) -> Arc<RecordingSink> {
    let sink = Arc::new(RecordingSink::default());
    let run = speak(
        Arc::new(synthesizer),
        sink.clone(),
        "Haus".to_string(),
        Duration::from_millis(50),
    );

    timeout(Duration::from_secs(2), run)
        .await
        .expect("Timeout - speak never returned");
    sink
}

#[tokio::test]
async fn failed_synthesis_plays_nothing() {
    let sink = speak_with(BrokenSynthesizer::Failing).await;
    assert!(sink.played.lock().unwrap().is_empty());
}

#[tokio::test]
async fn undecodable_audio_plays_nothing() {
    let sink = speak_with(BrokenSynthesizer::Garbled).await;
    assert!(sink.played.lock().unwrap().is_empty());
}

#[tokio::test]
async fn slow_synthesis_is_cut_off() {
    let sink = speak_with(BrokenSynthesizer::Stalled).await;
    assert!(sink.played.lock().unwrap().is_empty());
}

#[tokio::test]
async fn decoded_audio_is_played_once() {
    let sink = Arc::new(RecordingSink::default());
    speak(
        Arc::new(FakeSynthesizer),
        sink.clone(),
        "Haus".to_string(),
        Duration::from_secs(1),
    )
    .await;

    let played = sink.played.lock().unwrap();
    assert_eq!(played.len(), 1);
    assert_eq!(played[0].samples.len(), 2);
}
