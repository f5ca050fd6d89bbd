// Chart pipeline
// Waveform -> mono -> peaks -> notes, with optional JSONL tracing

use serde::Serialize;
use std::path::Path;
use thiserror::Error;
use uuid::Uuid;

use crate::audio::{self, AudioError, Waveform};
use crate::chart::{self, Note};
use crate::detect::{self, DetectError, DetectionConfig, Peak};
use crate::pipeline::trace::{Stage, TraceBuilder, TraceEntry, TraceWriter};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Detect(#[from] DetectError),

    #[error("Failed to decode audio: {0}")]
    Audio(#[from] AudioError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Everything produced by one detection run
#[derive(Debug, Clone, Serialize)]
pub struct ChartRun {
    pub run_id: Uuid,
    pub config: DetectionConfig,
    pub sample_rate: u32,
    pub channel_count: usize,
    pub duration_secs: f64,
    pub peaks: Vec<Peak>,
    pub notes: Vec<Note>,
}

impl ChartRun {
    pub fn chart_text(&self) -> String {
        chart::to_chart_text(&self.notes)
    }
}

/// Detect notes in a decoded waveform
pub fn detect_notes(waveform: &Waveform, config: &DetectionConfig) -> Result<Vec<Note>, DetectError> {
    Ok(run_pipeline(waveform, config, None)?.notes)
}

/// Run the full pipeline on a decoded waveform
/// Input is validated before any sample is read. Trace write failures are
/// logged and do not fail the run.
pub fn run_pipeline(
    waveform: &Waveform,
    config: &DetectionConfig,
    trace: Option<&TraceWriter>,
) -> Result<ChartRun, DetectError> {
    run_with_id(Uuid::new_v4(), waveform, config, trace)
}

fn run_with_id(
    run_id: Uuid,
    waveform: &Waveform,
    config: &DetectionConfig,
    trace: Option<&TraceWriter>,
) -> Result<ChartRun, DetectError> {
    let sample_rate = waveform.sample_rate();
    if sample_rate == 0 {
        return Err(DetectError::InvalidSampleRate(sample_rate));
    }
    config.validate()?;

    let tracer = Tracer { run_id, writer: trace };

    let mono = audio::downmix(waveform)?;
    tracer.record(
        TraceBuilder::stage(run_id, Stage::Downmix).complete_with_data(
            format!("Downmixed {} channel(s)", waveform.channel_count()),
            serde_json::json!({ "samples": mono.len() }),
        ),
    );

    let peaks = detect::pick_peaks(mono.samples(), sample_rate, config)?;
    tracer.record(
        TraceBuilder::stage(run_id, Stage::PeakDetection).complete_with_data(
            format!("Detected {} peaks", peaks.len()),
            serde_json::json!({
                "threshold": config.threshold,
                "min_interval_ms": config.min_interval_ms,
            }),
        ),
    );

    let notes = chart::map_notes(&peaks);
    tracer.record(
        TraceBuilder::stage(run_id, Stage::NoteMapping)
            .complete(format!("Mapped {} notes", notes.len())),
    );

    log::info!(
        "Run {}: {} notes from {:.2}s of audio (threshold {}, min interval {} ms)",
        run_id,
        notes.len(),
        waveform.duration_secs(),
        config.threshold,
        config.min_interval_ms
    );

    Ok(ChartRun {
        run_id,
        config: *config,
        sample_rate,
        channel_count: waveform.channel_count(),
        duration_secs: waveform.duration_secs(),
        peaks,
        notes,
    })
}

/// Decode WAV bytes and run the pipeline
pub fn detect_wav_bytes(
    data: &[u8],
    config: &DetectionConfig,
    trace: Option<&TraceWriter>,
) -> Result<ChartRun, PipelineError> {
    let run_id = Uuid::new_v4();
    let (waveform, info) = audio::ingest_wav(data)?;
    log::info!(
        "Loaded audio: {} Hz, {} channels, {} bit",
        info.sample_rate,
        info.channels,
        info.bit_depth
    );

    Tracer { run_id, writer: trace }.record(
        TraceBuilder::stage(run_id, Stage::Decode).complete_with_data(
            "Decoded WAV",
            serde_json::json!({
                "sample_rate": info.sample_rate,
                "channels": info.channels,
                "bit_depth": info.bit_depth,
            }),
        ),
    );

    Ok(run_with_id(run_id, &waveform, config, trace)?)
}

/// Read a WAV file and run the pipeline
/// Reading the file is the only await point; detection itself is synchronous
pub async fn detect_file(
    path: &Path,
    config: &DetectionConfig,
    trace: Option<&TraceWriter>,
) -> Result<ChartRun, PipelineError> {
    let data = tokio::fs::read(path).await?;
    log::debug!("Read {} bytes from {}", data.len(), path.display());
    detect_wav_bytes(&data, config, trace)
}

struct Tracer<'a> {
    run_id: Uuid,
    writer: Option<&'a TraceWriter>,
}

impl Tracer<'_> {
    fn record(&self, entry: TraceEntry) {
        if let Some(writer) = self.writer {
            if let Err(e) = writer.write(&entry) {
                log::warn!("Run {}: failed to write trace entry: {}", self.run_id, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::Key;
    use crate::detect::Difficulty;
    use crate::pipeline::trace::read_trace_file;
    use tempfile::TempDir;

    fn one_second_burst() -> Vec<f32> {
        let mut samples = vec![0.0f32; 88200];
        for s in &mut samples[44100..44100 + 2205] {
            *s = 1.0;
        }
        samples
    }

    #[test]
    fn test_burst_produces_single_d_note() {
        let waveform = Waveform::mono(one_second_burst(), 44100);
        let notes = detect_notes(&waveform, &Difficulty::Normal.into()).unwrap();

        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].key, Key::D);
        assert!((notes[0].time - 1.0).abs() < 1e-9);
        assert_eq!(chart::to_chart_text(&notes), "1.000,D");
    }

    #[test]
    fn test_stereo_matches_mono_when_channels_equal() {
        let samples = one_second_burst();
        let mono = Waveform::mono(samples.clone(), 44100);
        let stereo = Waveform::new(vec![samples.clone(), samples], 44100).unwrap();
        let config = DetectionConfig::default();

        assert_eq!(
            detect_notes(&mono, &config).unwrap(),
            detect_notes(&stereo, &config).unwrap()
        );
    }

    #[test]
    fn test_three_channels_rejected() {
        let waveform = Waveform::new(vec![vec![0.5; 100]; 3], 44100).unwrap();
        assert_eq!(
            detect_notes(&waveform, &DetectionConfig::default()),
            Err(DetectError::UnsupportedChannelLayout(3))
        );
    }

    #[test]
    fn test_zero_sample_rate_checked_first() {
        // Both the layout and the rate are invalid; the rate is reported
        let waveform = Waveform::new(vec![vec![0.5; 100]; 3], 0).unwrap();
        assert_eq!(
            detect_notes(&waveform, &DetectionConfig::default()),
            Err(DetectError::InvalidSampleRate(0))
        );
    }

    #[test]
    fn test_run_metadata_and_trace() {
        let temp_dir = TempDir::new().unwrap();
        let writer = TraceWriter::new(temp_dir.path().join("trace.jsonl"));
        let waveform = Waveform::mono(one_second_burst(), 44100);

        let run = run_pipeline(&waveform, &Difficulty::Hard.into(), Some(&writer)).unwrap();
        assert_eq!(run.sample_rate, 44100);
        assert_eq!(run.channel_count, 1);
        assert_eq!(run.duration_secs, 2.0);
        assert_eq!(run.peaks.len(), run.notes.len());
        assert_eq!(run.chart_text(), "1.000,D");

        let entries = read_trace_file(writer.path()).unwrap();
        let stages: Vec<Stage> = entries.iter().map(|e| e.stage).collect();
        assert_eq!(stages, vec![Stage::Downmix, Stage::PeakDetection, Stage::NoteMapping]);
        let progress: Vec<f32> = entries.iter().map(|e| e.progress).collect();
        assert_eq!(progress, vec![0.4, 0.7, 0.9]);
        assert!(entries.iter().all(|e| e.run_id == run.run_id));
    }

    #[test]
    fn test_empty_waveform_is_valid() {
        let waveform = Waveform::mono(Vec::new(), 44100);
        let run = run_pipeline(&waveform, &DetectionConfig::default(), None).unwrap();
        assert!(run.notes.is_empty());
        assert_eq!(run.chart_text(), "");
    }

    #[test]
    fn test_invalid_wav_bytes() {
        let result = detect_wav_bytes(b"RIFF", &DetectionConfig::default(), None);
        assert!(matches!(result, Err(PipelineError::Audio(_))));
    }

    #[tokio::test]
    async fn test_detect_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = detect_file(
            &temp_dir.path().join("missing.wav"),
            &DetectionConfig::default(),
            None,
        )
        .await;
        assert!(matches!(result, Err(PipelineError::Io(_))));
    }
}
