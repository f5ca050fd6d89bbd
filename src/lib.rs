// Beatchart - audio to rhythm game note charts
// Module declarations

pub mod audio;
pub mod chart;
pub mod commands;
pub mod detect;
pub mod pipeline;

pub use audio::{downmix, MonoSignal, Waveform};
pub use chart::{map_notes, parse_chart_text, to_chart_text, Key, Note};
pub use detect::{pick_peaks, DetectError, DetectionConfig, Difficulty, Peak};
pub use pipeline::{detect_file, detect_notes, run_pipeline, ChartRun, PipelineError};
