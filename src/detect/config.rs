// Detection configuration and difficulty presets

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::detect::types::DetectError;

/// Named `(threshold, min_interval_ms)` pair controlling note density
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyPreset {
    pub threshold: f64,
    pub min_interval_ms: u32,
}

pub const EASY: DifficultyPreset = DifficultyPreset {
    threshold: 0.8,
    min_interval_ms: 500,
};

pub const NORMAL: DifficultyPreset = DifficultyPreset {
    threshold: 0.5,
    min_interval_ms: 300,
};

pub const HARD: DifficultyPreset = DifficultyPreset {
    threshold: 0.3,
    min_interval_ms: 150,
};

/// Difficulty levels, fewest notes first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn preset(&self) -> DifficultyPreset {
        match self {
            Difficulty::Easy => EASY,
            Difficulty::Normal => NORMAL,
            Difficulty::Hard => HARD,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = DetectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            other => Err(DetectError::InvalidConfig(format!(
                "unknown difficulty '{}'",
                other
            ))),
        }
    }
}

/// Parameters for a single detection run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Multiplicative sensitivity over the average volume
    /// Threshold = avg_volume * (1 + threshold); 0 triggers at exactly average energy
    pub threshold: f64,

    /// Minimum time between two peaks in milliseconds
    pub min_interval_ms: u32,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        DetectionConfig {
            threshold: 0.6,
            min_interval_ms: 300,
        }
    }
}

impl From<DifficultyPreset> for DetectionConfig {
    fn from(preset: DifficultyPreset) -> Self {
        DetectionConfig {
            threshold: preset.threshold,
            min_interval_ms: preset.min_interval_ms,
        }
    }
}

impl From<Difficulty> for DetectionConfig {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.preset().into()
    }
}

impl DetectionConfig {
    pub fn new(threshold: f64, min_interval_ms: u32) -> Self {
        DetectionConfig {
            threshold,
            min_interval_ms,
        }
    }

    /// Reject values the peak picker cannot work with
    /// Nothing is clamped or replaced here
    pub fn validate(&self) -> Result<(), DetectError> {
        if !self.threshold.is_finite() {
            return Err(DetectError::InvalidConfig(format!(
                "threshold must be finite, got {}",
                self.threshold
            )));
        }
        if self.threshold <= -1.0 {
            return Err(DetectError::InvalidConfig(format!(
                "threshold must be greater than -1, got {}",
                self.threshold
            )));
        }
        Ok(())
    }

    /// Minimum gap in samples: floor(sample_rate * min_interval_ms / 1000)
    pub fn min_interval_samples(&self, sample_rate: u32) -> usize {
        (sample_rate as u64 * self.min_interval_ms as u64 / 1000) as usize
    }
}
