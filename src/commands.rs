// Chart commands
// Resolve configuration, run detection on a WAV file, export the chart

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

use crate::chart::Note;
use crate::detect::{DetectionConfig, Difficulty};
use crate::pipeline::{self, Stage, TraceBuilder, TraceWriter};

#[derive(Debug, Serialize)]
pub struct CommandError {
    message: String,
}

impl CommandError {
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl<E: std::error::Error> From<E> for CommandError {
    fn from(error: E) -> Self {
        CommandError {
            message: error.to_string(),
        }
    }
}

pub type CommandResult<T> = Result<T, CommandError>;

/// Where detection parameters come from
/// Applied in order, later wins: config file, preset, explicit overrides
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigSource {
    pub config_file: Option<PathBuf>,
    pub difficulty: Option<Difficulty>,
    pub threshold: Option<f64>,
    pub min_interval_ms: Option<u32>,
}

impl ConfigSource {
    pub fn resolve(&self) -> CommandResult<DetectionConfig> {
        let mut config = match &self.config_file {
            Some(path) => load_config_file(path)?,
            None => DetectionConfig::default(),
        };

        if let Some(difficulty) = self.difficulty {
            config = difficulty.into();
        }
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        if let Some(min_interval_ms) = self.min_interval_ms {
            config.min_interval_ms = min_interval_ms;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Load a JSON detection config; missing fields fall back to defaults
pub fn load_config_file(path: &Path) -> CommandResult<DetectionConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| CommandError {
        message: format!("Failed to read config {}: {}", path.display(), e),
    })?;
    serde_json::from_str(&contents).map_err(|e| CommandError {
        message: format!("Invalid config {}: {}", path.display(), e),
    })
}

#[derive(Debug, Clone, Deserialize)]
pub struct DetectChartInput {
    pub audio_path: PathBuf,

    /// Chart destination; when absent the chart text is only returned
    pub output_path: Option<PathBuf>,

    pub trace_path: Option<PathBuf>,

    #[serde(default)]
    pub config: ConfigSource,
}

#[derive(Debug, Serialize)]
pub struct ChartResult {
    pub run_id: String,
    pub input_sha256: String,
    pub config: DetectionConfig,
    pub sample_rate: u32,
    pub channel_count: usize,
    pub duration_secs: f64,
    pub total_count: usize,
    pub notes: Vec<Note>,
    pub chart_text: String,
    pub output_path: Option<PathBuf>,
}

/// Detect notes in a WAV file and optionally write the chart next to it
pub async fn detect_chart(input: DetectChartInput) -> CommandResult<ChartResult> {
    let config = input.config.resolve()?;

    let audio_data = tokio::fs::read(&input.audio_path)
        .await
        .map_err(|e| CommandError {
            message: format!("Failed to read {}: {}", input.audio_path.display(), e),
        })?;
    let input_sha256 = calculate_sha256(&audio_data);

    let trace_writer = input.trace_path.clone().map(TraceWriter::new);
    let run = pipeline::detect_wav_bytes(&audio_data, &config, trace_writer.as_ref()).map_err(
        |e| CommandError {
            message: format!("Failed to detect beats in {}: {}", input.audio_path.display(), e),
        },
    )?;

    let chart_text = run.chart_text();

    if let Some(ref output_path) = input.output_path {
        tokio::fs::write(output_path, chart_text.as_bytes())
            .await
            .map_err(|e| CommandError {
                message: format!("Failed to write chart {}: {}", output_path.display(), e),
            })?;
        log::info!("Wrote {} notes to {}", run.notes.len(), output_path.display());

        if let Some(ref writer) = trace_writer {
            let entry = TraceBuilder::stage(run.run_id, Stage::Export).complete_with_data(
                format!("Exported chart to {}", output_path.display()),
                serde_json::json!({ "bytes": chart_text.len() }),
            );
            if let Err(e) = writer.write(&entry) {
                log::warn!("Failed to write trace entry: {}", e);
            }
        }
    }

    Ok(ChartResult {
        run_id: run.run_id.to_string(),
        input_sha256,
        config: run.config,
        sample_rate: run.sample_rate,
        channel_count: run.channel_count,
        duration_secs: run.duration_secs,
        total_count: run.notes.len(),
        notes: run.notes,
        chart_text,
        output_path: input.output_path,
    })
}

/// List the difficulty presets with their parameters
pub fn list_presets() -> Vec<(Difficulty, DetectionConfig)> {
    Difficulty::ALL
        .iter()
        .map(|&d| (d, DetectionConfig::from(d)))
        .collect()
}

/// Hex-encoded SHA256 of the input audio, identifies which file a chart came from
pub fn calculate_sha256(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}
