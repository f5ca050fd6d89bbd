// Beat detection types
// Peaks, per-window decisions, and detection errors

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while validating detection input
/// All of these are detected before any numeric work starts
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DetectError {
    #[error("Unsupported channel layout: {0} channels (expected 1 or 2)")]
    UnsupportedChannelLayout(usize),

    #[error("Invalid sample rate: {0} Hz")]
    InvalidSampleRate(u32),

    #[error("Channel {channel} has {actual} samples, expected {expected}")]
    ChannelLengthMismatch {
        channel: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid detection config: {0}")]
    InvalidConfig(String),
}

/// A detected beat: the start of a window whose energy crossed the threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Peak {
    /// Window start in seconds from the beginning of the signal
    pub time: f64,

    /// Window start as a sample index into the mono signal
    pub sample_index: usize,

    /// Mean absolute amplitude of the window
    pub energy: f64,
}

/// Why a window was or was not turned into a peak
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowVerdict {
    Accepted,

    /// Energy did not exceed the dynamic threshold
    BelowThreshold,

    /// Loud enough, but too close to the previously accepted peak
    WithinMinInterval,
}

/// Detection outcome for one energy window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowDecision {
    pub sample_index: usize,
    pub time: f64,
    pub energy: f64,
    pub verdict: WindowVerdict,
}

impl WindowDecision {
    pub fn is_accepted(&self) -> bool {
        self.verdict == WindowVerdict::Accepted
    }

    /// The peak this window produced, if it was accepted
    pub fn to_peak(&self) -> Option<Peak> {
        if self.is_accepted() {
            Some(Peak {
                time: self.time,
                sample_index: self.sample_index,
                energy: self.energy,
            })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_window_has_no_peak() {
        let decision = WindowDecision {
            sample_index: 2205,
            time: 0.05,
            energy: 0.01,
            verdict: WindowVerdict::BelowThreshold,
        };
        assert!(!decision.is_accepted());
        assert!(decision.to_peak().is_none());
    }

    #[test]
    fn test_accepted_window_to_peak() {
        let decision = WindowDecision {
            sample_index: 44100,
            time: 1.0,
            energy: 1.0,
            verdict: WindowVerdict::Accepted,
        };
        let peak = decision.to_peak().unwrap();
        assert_eq!(peak.sample_index, 44100);
        assert_eq!(peak.time, 1.0);
    }

    #[test]
    fn test_error_messages() {
        let err = DetectError::UnsupportedChannelLayout(3);
        assert!(err.to_string().contains("3 channels"));

        let err = DetectError::InvalidSampleRate(0);
        assert!(err.to_string().contains("0 Hz"));
    }

    #[test]
    fn test_verdict_serializes_snake_case() {
        let json = serde_json::to_string(&WindowVerdict::WithinMinInterval).unwrap();
        assert_eq!(json, "\"within_min_interval\"");
    }
}
