// Audio ingestion module
// Decodes WAV bytes into a per-channel Waveform with normalized samples

use hound::{SampleFormat, WavReader};
use std::io::Cursor;
use thiserror::Error;

use crate::audio::waveform::Waveform;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("Failed to read WAV file: {0}")]
    WavReadError(#[from] hound::Error),

    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),
}

/// Format details of a decoded WAV file, kept for logging and reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavInfo {
    pub sample_rate: u32,
    pub channels: u16,
    pub bit_depth: u16,
}

/// Decode a WAV file from raw bytes
pub fn ingest_wav(data: &[u8]) -> Result<(Waveform, WavInfo), AudioError> {
    let mut reader = WavReader::new(Cursor::new(data))?;

    let spec = reader.spec();
    let info = WavInfo {
        sample_rate: spec.sample_rate,
        channels: spec.channels,
        bit_depth: spec.bits_per_sample,
    };

    // Read and normalize samples to f32 [-1.0, 1.0]
    let samples: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Int, 8) => {
            // hound already re-centres unsigned 8-bit PCM to [-128, 127]
            reader
                .samples::<i8>()
                .map(|s| s.map(|s| s as f32 / 128.0))
                .collect::<Result<_, _>>()?
        }
        (SampleFormat::Int, 16) => reader
            .samples::<i16>()
            .map(|s| s.map(|s| s as f32 / 32768.0))
            .collect::<Result<_, _>>()?,
        (SampleFormat::Int, 24) => reader
            .samples::<i32>()
            .map(|s| s.map(|s| s as f32 / 8388608.0))
            .collect::<Result<_, _>>()?,
        (SampleFormat::Int, 32) => reader
            .samples::<i32>()
            .map(|s| s.map(|s| s as f32 / 2147483648.0))
            .collect::<Result<_, _>>()?,
        (SampleFormat::Float, 32) => reader.samples::<f32>().collect::<Result<_, _>>()?,
        (format, bits) => {
            return Err(AudioError::UnsupportedFormat(format!(
                "{:?} {}-bit audio",
                format, bits
            )));
        }
    };

    let waveform = Waveform::from_interleaved(&samples, spec.channels as usize, spec.sample_rate);

    log::debug!(
        "Decoded WAV: {} Hz, {} channels, {} bit, {} frames",
        info.sample_rate,
        info.channels,
        info.bit_depth,
        waveform.frame_count()
    );

    Ok((waveform, info))
}
