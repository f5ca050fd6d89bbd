// Adaptive peak picking
// Global-average threshold with a minimum gap between accepted windows

use crate::detect::config::DetectionConfig;
use crate::detect::energy::{self, EnergyWindow};
use crate::detect::types::{DetectError, Peak, WindowDecision, WindowVerdict};

/// Threshold derived from the whole signal for one detection run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdInfo {
    /// Mean absolute amplitude of the entire signal
    pub avg_volume: f64,

    /// avg_volume * (1 + threshold)
    pub dynamic_threshold: f64,

    /// Minimum gap between peaks in samples
    pub min_samples: usize,

    /// Nominal window length in samples
    pub window_samples: usize,
}

impl ThresholdInfo {
    pub fn compute(samples: &[f32], sample_rate: u32, config: &DetectionConfig) -> Self {
        let avg_volume = energy::mean_abs(samples);
        ThresholdInfo {
            avg_volume,
            dynamic_threshold: avg_volume * (1.0 + config.threshold),
            min_samples: config.min_interval_samples(sample_rate),
            window_samples: energy::window_samples(sample_rate),
        }
    }
}

fn validate(sample_rate: u32, config: &DetectionConfig) -> Result<(), DetectError> {
    if sample_rate == 0 {
        return Err(DetectError::InvalidSampleRate(sample_rate));
    }
    config.validate()
}

/// Walks the windows and applies the threshold + gap rule
struct Gate {
    dynamic_threshold: f64,
    min_samples: i64,
    last_accepted: i64,
    sample_rate: f64,
}

impl Gate {
    fn new(info: &ThresholdInfo, sample_rate: u32) -> Self {
        let min_samples = info.min_samples as i64;
        Gate {
            dynamic_threshold: info.dynamic_threshold,
            min_samples,
            // Nothing accepted yet
            last_accepted: -min_samples,
            sample_rate: sample_rate as f64,
        }
    }

    fn decide(&mut self, window: EnergyWindow) -> WindowDecision {
        let index = window.start as i64;
        let verdict = if window.mean_abs <= self.dynamic_threshold {
            WindowVerdict::BelowThreshold
        } else if index - self.last_accepted <= self.min_samples {
            WindowVerdict::WithinMinInterval
        } else {
            self.last_accepted = index;
            WindowVerdict::Accepted
        };

        WindowDecision {
            sample_index: window.start,
            time: window.start as f64 / self.sample_rate,
            energy: window.mean_abs,
            verdict,
        }
    }
}

/// Decide every window of the signal, accepted or not
pub fn explain_windows(
    samples: &[f32],
    sample_rate: u32,
    config: &DetectionConfig,
) -> Result<Vec<WindowDecision>, DetectError> {
    validate(sample_rate, config)?;

    let info = ThresholdInfo::compute(samples, sample_rate, config);
    let mut gate = Gate::new(&info, sample_rate);

    Ok(energy::windows(samples, sample_rate)
        .map(|window| gate.decide(window))
        .collect())
}

/// Detect peaks in a mono signal
/// Returns window start times in strictly increasing order, at least
/// `min_interval_ms` apart
pub fn pick_peaks(
    samples: &[f32],
    sample_rate: u32,
    config: &DetectionConfig,
) -> Result<Vec<Peak>, DetectError> {
    validate(sample_rate, config)?;

    if samples.is_empty() {
        return Ok(Vec::new());
    }

    let info = ThresholdInfo::compute(samples, sample_rate, config);
    if info.avg_volume == 0.0 {
        log::warn!("Signal of {} samples is completely silent", samples.len());
    }
    log::debug!(
        "avg_volume={:.6} dynamic_threshold={:.6} min_samples={} window={}",
        info.avg_volume,
        info.dynamic_threshold,
        info.min_samples,
        info.window_samples
    );

    let mut gate = Gate::new(&info, sample_rate);
    let peaks: Vec<Peak> = energy::windows(samples, sample_rate)
        .filter_map(|window| gate.decide(window).to_peak())
        .collect();

    log::debug!("Accepted {} peaks", peaks.len());
    Ok(peaks)
}
