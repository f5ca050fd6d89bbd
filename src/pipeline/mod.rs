// Pipeline execution and monitoring module
// Orchestrates the waveform-to-chart pipeline

pub mod run;
pub mod trace;

pub use run::{detect_file, detect_notes, detect_wav_bytes, run_pipeline, ChartRun, PipelineError};
pub use trace::{read_trace_file, Stage, TraceBuilder, TraceEntry, TraceError, TraceWriter};
