// Energy windowing
// Splits a mono signal into fixed 50 ms windows and measures mean absolute amplitude

/// Window length in seconds, independent of difficulty
pub const WINDOW_SECS: f64 = 0.05;

/// One analysis window of the mono signal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyWindow {
    /// Index of the first sample in the window
    pub start: usize,

    /// Actual number of samples (the last window may be shorter)
    pub len: usize,

    /// Mean absolute amplitude over `len` samples
    pub mean_abs: f64,
}

/// Nominal window length in samples: round(sample_rate * 0.05), at least 1
pub fn window_samples(sample_rate: u32) -> usize {
    ((sample_rate as f64 * WINDOW_SECS).round() as usize).max(1)
}

/// Mean of |x| over `samples`, 0.0 for an empty slice
pub fn mean_abs(samples: &[f32]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f64 = samples.iter().map(|s| s.abs() as f64).sum();
    sum / samples.len() as f64
}

/// Iterate over consecutive, non-overlapping energy windows
pub fn windows(samples: &[f32], sample_rate: u32) -> impl Iterator<Item = EnergyWindow> + '_ {
    let size = window_samples(sample_rate);
    samples
        .chunks(size)
        .enumerate()
        .map(move |(n, chunk)| EnergyWindow {
            start: n * size,
            len: chunk.len(),
            mean_abs: mean_abs(chunk),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_samples() {
        assert_eq!(window_samples(44100), 2205);
        assert_eq!(window_samples(48000), 2400);
        // 22050 * 0.05 = 1102.5 rounds up
        assert_eq!(window_samples(22050), 1103);
        assert_eq!(window_samples(1), 1);
    }

    #[test]
    fn test_mean_abs() {
        assert_eq!(mean_abs(&[]), 0.0);
        assert!((mean_abs(&[0.5, -0.5, 1.0, -1.0]) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_partial_window_uses_actual_length() {
        // 100 Hz -> 5 samples per window; 7 samples gives one full and one partial window
        let samples = vec![0.0, 0.0, 0.0, 0.0, 0.0, 1.0, -1.0];
        let windows: Vec<_> = windows(&samples, 100).collect();

        assert_eq!(windows.len(), 2);
        assert_eq!(windows[0].start, 0);
        assert_eq!(windows[0].len, 5);
        assert_eq!(windows[0].mean_abs, 0.0);

        assert_eq!(windows[1].start, 5);
        assert_eq!(windows[1].len, 2);
        assert_eq!(windows[1].mean_abs, 1.0);
    }

    #[test]
    fn test_empty_signal_has_no_windows() {
        assert_eq!(windows(&[], 44100).count(), 0);
    }
}
