// Decoded audio containers
// Waveform holds per-channel samples; MonoSignal is the single-channel view used by detection

use std::borrow::Cow;

use crate::detect::DetectError;

/// Decoded audio as separate per-channel sample arrays
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    /// One array per channel, samples normalized to [-1.0, 1.0]
    channels: Vec<Vec<f32>>,

    /// Sample rate in Hz
    sample_rate: u32,
}

impl Waveform {
    /// Build a waveform from per-channel samples
    /// Every channel must have the same length
    pub fn new(channels: Vec<Vec<f32>>, sample_rate: u32) -> Result<Self, DetectError> {
        if let Some(first) = channels.first() {
            let expected = first.len();
            if let Some((channel, samples)) = channels
                .iter()
                .enumerate()
                .find(|(_, c)| c.len() != expected)
            {
                return Err(DetectError::ChannelLengthMismatch {
                    channel,
                    expected,
                    actual: samples.len(),
                });
            }
        }

        Ok(Waveform {
            channels,
            sample_rate,
        })
    }

    pub fn mono(samples: Vec<f32>, sample_rate: u32) -> Self {
        Waveform {
            channels: vec![samples],
            sample_rate,
        }
    }

    /// Split interleaved frames ([L, R, L, R, ...]) into channels
    /// A trailing incomplete frame is dropped
    pub fn from_interleaved(samples: &[f32], channel_count: usize, sample_rate: u32) -> Self {
        if channel_count == 0 {
            return Waveform {
                channels: Vec::new(),
                sample_rate,
            };
        }

        let frame_count = samples.len() / channel_count;
        let mut channels = vec![Vec::with_capacity(frame_count); channel_count];
        for frame in samples.chunks_exact(channel_count) {
            for (ch, &sample) in frame.iter().enumerate() {
                channels[ch].push(sample);
            }
        }

        Waveform {
            channels,
            sample_rate,
        }
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }

    /// Samples per channel
    pub fn frame_count(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Get duration in seconds as f64
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frame_count() as f64 / self.sample_rate as f64
    }
}

/// Single-channel amplitude sequence
/// Borrows the source channel for mono input, owns a new buffer after a mixdown
#[derive(Debug, Clone, PartialEq)]
pub struct MonoSignal<'a> {
    samples: Cow<'a, [f32]>,
    sample_rate: u32,
}

impl<'a> MonoSignal<'a> {
    pub fn borrowed(samples: &'a [f32], sample_rate: u32) -> Self {
        MonoSignal {
            samples: Cow::Borrowed(samples),
            sample_rate,
        }
    }

    pub fn owned(samples: Vec<f32>, sample_rate: u32) -> MonoSignal<'static> {
        MonoSignal {
            samples: Cow::Owned(samples),
            sample_rate,
        }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// True if the samples alias the source waveform
    pub fn is_borrowed(&self) -> bool {
        matches!(self.samples, Cow::Borrowed(_))
    }

    pub fn into_owned(self) -> Vec<f32> {
        self.samples.into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ragged_channels_rejected() {
        let result = Waveform::new(vec![vec![0.0; 4], vec![0.0; 3]], 44100);
        assert_eq!(
            result,
            Err(DetectError::ChannelLengthMismatch {
                channel: 1,
                expected: 4,
                actual: 3,
            })
        );
    }

    #[test]
    fn test_any_channel_count_accepted_at_construction() {
        let waveform = Waveform::new(vec![vec![0.0; 2]; 3], 44100).unwrap();
        assert_eq!(waveform.channel_count(), 3);

        let empty = Waveform::new(Vec::new(), 44100).unwrap();
        assert_eq!(empty.channel_count(), 0);
        assert_eq!(empty.frame_count(), 0);
    }

    #[test]
    fn test_from_interleaved() {
        let stereo = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7];
        let waveform = Waveform::from_interleaved(&stereo, 2, 44100);

        assert_eq!(waveform.channel_count(), 2);
        assert_eq!(waveform.channel(0).unwrap(), &[0.1, 0.3, 0.5]);
        assert_eq!(waveform.channel(1).unwrap(), &[0.2, 0.4, 0.6]);
    }

    #[test]
    fn test_duration_secs() {
        let waveform = Waveform::mono(vec![0.0; 22050], 44100);
        assert_eq!(waveform.duration_secs(), 0.5);
    }

    #[test]
    fn test_mono_signal_borrowing() {
        let data = vec![0.25f32; 8];
        let signal = MonoSignal::borrowed(&data, 8000);
        assert!(signal.is_borrowed());
        assert_eq!(signal.len(), 8);

        let owned = MonoSignal::owned(vec![0.5; 2], 8000);
        assert!(!owned.is_borrowed());
        assert_eq!(owned.into_owned(), vec![0.5, 0.5]);
    }
}
