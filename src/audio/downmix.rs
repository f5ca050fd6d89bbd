// Channel downmixing
// Reduces a mono or stereo waveform to one amplitude sequence

use crate::audio::waveform::{MonoSignal, Waveform};
use crate::detect::DetectError;

/// Convert a waveform to mono
/// Mono input is returned as a borrow of channel 0, stereo is averaged per sample.
/// Any other channel count is rejected without touching the samples.
pub fn downmix(waveform: &Waveform) -> Result<MonoSignal<'_>, DetectError> {
    let sample_rate = waveform.sample_rate();

    match waveform.channels() {
        [mono] => Ok(MonoSignal::borrowed(mono, sample_rate)),
        [left, right] => {
            let mixed = left
                .iter()
                .zip(right.iter())
                .map(|(l, r)| (l + r) / 2.0)
                .collect();
            Ok(MonoSignal::owned(mixed, sample_rate))
        }
        other => Err(DetectError::UnsupportedChannelLayout(other.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mono_passthrough_is_bit_exact() {
        let samples = vec![0.1, -0.7, 1.0, -1.0, f32::MIN_POSITIVE, 0.333_333_34];
        let waveform = Waveform::mono(samples.clone(), 44100);

        let mono = downmix(&waveform).unwrap();
        assert!(mono.is_borrowed());
        assert_eq!(mono.sample_rate(), 44100);
        for (a, b) in mono.samples().iter().zip(samples.iter()) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn test_stereo_average() {
        let left = vec![0.1, 0.3, 0.5, 1.0];
        let right = vec![0.2, 0.4, 0.6, -1.0];
        let waveform = Waveform::new(vec![left.clone(), right.clone()], 48000).unwrap();

        let mono = downmix(&waveform).unwrap();
        assert_eq!(mono.len(), 4);
        assert!(!mono.is_borrowed());
        for i in 0..4 {
            assert_eq!(mono.samples()[i], (left[i] + right[i]) / 2.0);
        }
        assert_eq!(mono.samples()[3], 0.0);
    }

    #[test]
    fn test_unsupported_layouts() {
        let three = Waveform::new(vec![vec![0.0; 4]; 3], 44100).unwrap();
        assert_eq!(downmix(&three), Err(DetectError::UnsupportedChannelLayout(3)));

        let none = Waveform::new(Vec::new(), 44100).unwrap();
        assert_eq!(downmix(&none), Err(DetectError::UnsupportedChannelLayout(0)));
    }

    #[test]
    fn test_empty_stereo() {
        let waveform = Waveform::new(vec![Vec::new(), Vec::new()], 44100).unwrap();
        let mono = downmix(&waveform).unwrap();
        assert!(mono.is_empty());
    }
}
