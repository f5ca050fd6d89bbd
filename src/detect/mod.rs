// Beat detection module
// Energy windowing, adaptive thresholding, and peak picking

pub mod config;
pub mod energy;
pub mod peaks;
pub mod types;

pub use config::{Difficulty, DifficultyPreset, DetectionConfig, EASY, HARD, NORMAL};
pub use energy::{window_samples, EnergyWindow, WINDOW_SECS};
pub use peaks::{explain_windows, pick_peaks, ThresholdInfo};
pub use types::{DetectError, Peak, WindowDecision, WindowVerdict};
