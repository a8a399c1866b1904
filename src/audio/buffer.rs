use super::decode::{downmix_to_mono, DecodedAudio};
use crate::{Error, Result};
use std::io::{Seek, Write};
use std::path::Path;

/// Mono waveform in the host's `[batch, channels, samples]` layout, with batch and
/// channel dimensions both fixed at 1.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    waveform: Vec<f32>,
    sample_rate: u32,
}

impl AudioBuffer {
    pub fn new(waveform: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            waveform,
            sample_rate,
        }
    }

    pub fn from_decoded(decoded: DecodedAudio) -> Self {
        let waveform = if decoded.channels > 1 {
            downmix_to_mono(&decoded.samples, decoded.channels)
        } else {
            decoded.samples
        };
        Self::new(waveform, decoded.sample_rate)
    }

    /// `[1, 1, N]`.
    pub fn shape(&self) -> [usize; 3] {
        [1, 1, self.waveform.len()]
    }

    pub fn num_samples(&self) -> usize {
        self.waveform.len()
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Flat sample data; row-major over [`shape`](Self::shape).
    pub fn samples(&self) -> &[f32] {
        &self.waveform
    }

    pub fn into_samples(self) -> Vec<f32> {
        self.waveform
    }

    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.waveform.len() as f64 / self.sample_rate as f64
    }

    /// Write as 32-bit float mono WAV.
    pub fn write_wav<W: Write + Seek>(&self, writer: W) -> Result<()> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let mut wav = hound::WavWriter::new(writer, spec).map_err(wav_error)?;
        for &s in &self.waveform {
            wav.write_sample(s).map_err(wav_error)?;
        }
        wav.finalize().map_err(wav_error)
    }

    pub fn save_wav(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        self.write_wav(std::io::BufWriter::new(file))
    }
}

fn wav_error(e: hound::Error) -> Error {
    match e {
        hound::Error::IoError(io) => Error::Io(io),
        other => Error::Io(std::io::Error::other(other)),
    }
}
