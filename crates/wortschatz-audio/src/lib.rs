mod error;
mod pcm;
mod sink;

pub use error::*;
pub use pcm::*;
pub use sink::*;

/// Mono waveform ready for output, samples in `[-1, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl AudioBuffer {
    pub const CHANNELS: u16 = 1;

    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }
}
