// Pipeline progress tracing
// Append-only JSONL trace file, one entry per chart pipeline stage

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during trace operations
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Pipeline stages in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Decode,
    Downmix,
    PeakDetection,
    NoteMapping,
    Export,
}

impl Stage {
    /// Overall pipeline progress when this stage begins
    pub fn start_progress(&self) -> f32 {
        match self {
            Stage::Decode => 0.0,
            Stage::Downmix => 0.2,
            Stage::PeakDetection => 0.4,
            Stage::NoteMapping => 0.7,
            Stage::Export => 0.9,
        }
    }

    /// Overall pipeline progress once this stage has finished
    pub fn progress(&self) -> f32 {
        match self {
            Stage::Decode => 0.2,
            Stage::Downmix => 0.4,
            Stage::PeakDetection => 0.7,
            Stage::NoteMapping => 0.9,
            Stage::Export => 1.0,
        }
    }
}

/// A single trace entry in the pipeline execution log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEntry {
    /// When this entry was created
    pub timestamp: DateTime<Utc>,

    /// Run this entry belongs to
    pub run_id: Uuid,

    pub stage: Stage,

    /// Progress [0.0, 1.0]
    pub progress: f32,

    pub message: String,

    /// Optional structured data (e.g. peak count, threshold values)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl TraceEntry {
    /// Create a new trace entry with current timestamp
    pub fn new(run_id: Uuid, stage: Stage, progress: f32, message: String) -> Self {
        TraceEntry {
            timestamp: Utc::now(),
            run_id,
            stage,
            progress: progress.clamp(0.0, 1.0),
            message,
            data: None,
        }
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Serialize to JSON line (with newline)
    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        let json = serde_json::to_string(self)?;
        Ok(format!("{}\n", json))
    }
}

/// Pipeline trace writer
/// Appends to a JSONL file, creating it on first write
#[derive(Debug, Clone)]
pub struct TraceWriter {
    file_path: PathBuf,
}

impl TraceWriter {
    pub fn new(file_path: PathBuf) -> Self {
        TraceWriter { file_path }
    }

    pub fn write(&self, entry: &TraceEntry) -> Result<(), TraceError> {
        self.write_batch(std::slice::from_ref(entry))
    }

    pub fn write_batch(&self, entries: &[TraceEntry]) -> Result<(), TraceError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file_path)?;

        for entry in entries {
            file.write_all(entry.to_json_line()?.as_bytes())?;
        }

        file.flush()?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

/// Helper builder for creating trace entries of one run and stage
#[derive(Debug, Clone, Copy)]
pub struct TraceBuilder {
    run_id: Uuid,
    stage: Stage,
}

impl TraceBuilder {
    pub fn stage(run_id: Uuid, stage: Stage) -> Self {
        TraceBuilder { run_id, stage }
    }

    /// Entry marking the stage as started
    pub fn start(self, message: impl Into<String>) -> TraceEntry {
        TraceEntry::new(self.run_id, self.stage, self.stage.start_progress(), message.into())
    }

    /// Entry marking the stage as finished
    pub fn complete(self, message: impl Into<String>) -> TraceEntry {
        TraceEntry::new(self.run_id, self.stage, self.stage.progress(), message.into())
    }

    /// Finished entry carrying structured data
    pub fn complete_with_data(
        self,
        message: impl Into<String>,
        data: serde_json::Value,
    ) -> TraceEntry {
        self.complete(message).with_data(data)
    }
}

/// Read trace entries from a JSONL file
pub fn read_trace_file(path: &Path) -> Result<Vec<TraceEntry>, TraceError> {
    let contents = std::fs::read_to_string(path)?;
    let mut entries = Vec::new();

    for line in contents.lines() {
        if line.trim().is_empty() {
            continue;
        }
        entries.push(serde_json::from_str(line)?);
    }

    Ok(entries)
}
