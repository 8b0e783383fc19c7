use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::{AudioBuffer, Error};

const I16_SCALE: f32 = 32768.0;

/// Little-endian signed 16-bit PCM to floats in `[-1, 1]`.
pub fn pcm16le_to_f32(data: &[u8]) -> Result<Vec<f32>, Error> {
    if data.len() % 2 != 0 {
        return Err(Error::OddLength(data.len()));
    }

    Ok(data
        .chunks_exact(2)
        .map(|chunk| {
            let sample = i16::from_le_bytes([chunk[0], chunk[1]]);
            sample as f32 / I16_SCALE
        })
        .collect())
}

pub fn f32_to_i16(sample: f32) -> i16 {
    (sample * I16_SCALE).clamp(i16::MIN as f32, i16::MAX as f32) as i16
}

/// Decodes a base64 PCM16 mono payload into a playable buffer.
pub fn decode_base64_pcm16(payload: &str, sample_rate: u32) -> Result<AudioBuffer, Error> {
    if sample_rate == 0 {
        return Err(Error::InvalidSampleRate(sample_rate));
    }

    let bytes = STANDARD.decode(payload.trim())?;
    let samples = pcm16le_to_f32(&bytes)?;

    Ok(AudioBuffer {
        samples,
        sample_rate,
    })
}
