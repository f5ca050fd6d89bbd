// Audio processing module
// Handles WAV file ingestion and channel downmixing

pub mod downmix;
pub mod ingest;
pub mod waveform;

pub use downmix::downmix;
pub use ingest::{ingest_wav, AudioError, WavInfo};
pub use waveform::{MonoSignal, Waveform};
