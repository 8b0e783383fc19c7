use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::{AudioBuffer, Error, f32_to_i16};

/// Destination for synthesized speech. Calls block until output is done.
pub trait AudioSink: Send + Sync {
    fn name(&self) -> &'static str;

    fn play(&self, buffer: &AudioBuffer) -> Result<(), Error>;
}

/// Discards everything.
pub struct NullSink;

impl AudioSink for NullSink {
    fn name(&self) -> &'static str {
        "off"
    }

    fn play(&self, buffer: &AudioBuffer) -> Result<(), Error> {
        tracing::debug!("Discarding {:.2}s of audio", buffer.duration_secs());
        Ok(())
    }
}

/// Writes each utterance to `<dir>/speech-<millis>-<n>.wav`.
pub struct WavFileSink {
    dir: PathBuf,
    counter: AtomicU64,
}

impl WavFileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            counter: AtomicU64::new(0),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn write(&self, buffer: &AudioBuffer) -> Result<PathBuf, Error> {
        fs::create_dir_all(&self.dir)?;

        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        let path = self.dir.join(format!("speech-{millis}-{n}.wav"));

        let spec = hound::WavSpec {
            channels: AudioBuffer::CHANNELS,
            sample_rate: buffer.sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut writer = hound::WavWriter::create(&path, spec)?;
        for &sample in &buffer.samples {
            writer.write_sample(f32_to_i16(sample))?;
        }
        writer.finalize()?;

        Ok(path)
    }
}

impl AudioSink for WavFileSink {
    fn name(&self) -> &'static str {
        "wav"
    }

    fn play(&self, buffer: &AudioBuffer) -> Result<(), Error> {
        let path = self.write(buffer)?;
        tracing::info!("Speech written to {}", path.display());
        Ok(())
    }
}

/// Default output device via rodio.
#[cfg(feature = "playback")]
pub struct SpeakerSink;

#[cfg(feature = "playback")]
impl AudioSink for SpeakerSink {
    fn name(&self) -> &'static str {
        "speaker"
    }

    fn play(&self, buffer: &AudioBuffer) -> Result<(), Error> {
        let mut stream = rodio::OutputStreamBuilder::open_default_stream()
            .map_err(|e| Error::Output(e.to_string()))?;
        stream.log_on_drop(false);

        let sink = rodio::Sink::connect_new(stream.mixer());
        sink.append(rodio::buffer::SamplesBuffer::new(
            AudioBuffer::CHANNELS,
            buffer.sample_rate,
            buffer.samples.clone(),
        ));
        sink.sleep_until_end();
        Ok(())
    }
}
