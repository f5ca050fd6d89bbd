// Flat text chart format
// One "<seconds with 3 decimals>,<key>" record per line

use thiserror::Error;

use crate::chart::types::{Key, Note, UnknownKey};

#[derive(Debug, Error, PartialEq)]
pub enum ChartError {
    #[error("Line {line}: expected '<time>,<key>', got '{content}'")]
    MalformedLine { line: usize, content: String },

    #[error("Line {line}: invalid time '{value}'")]
    InvalidTime { line: usize, value: String },

    #[error("Line {line}: {source}")]
    InvalidKey {
        line: usize,
        source: UnknownKey,
    },
}

/// Render notes as newline-joined records, no header and no trailing newline
pub fn to_chart_text(notes: &[Note]) -> String {
    notes
        .iter()
        .map(|note| format!("{},{}", format_time(note.time), note.key))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Three decimals, exact halves rounded away from zero
fn format_time(time: f64) -> String {
    // A binary value sits exactly halfway between two thousandths only when it
    // is an odd multiple of 1/16
    let sixteenths = time.abs() * 16.0;
    if sixteenths < 1e12 && sixteenths % 2.0 == 1.0 {
        let millis = (sixteenths as u64 * 125 + 1) / 2;
        let sign = if time < 0.0 { "-" } else { "" };
        return format!("{}{}.{:03}", sign, millis / 1000, millis % 1000);
    }
    format!("{:.3}", time)
}

/// Parse a chart produced by [`to_chart_text`]
/// Blank lines and surrounding whitespace are ignored
pub fn parse_chart_text(text: &str) -> Result<Vec<Note>, ChartError> {
    let mut notes = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let content = raw.trim();
        if content.is_empty() {
            continue;
        }

        let (time, key) = content
            .split_once(',')
            .ok_or_else(|| ChartError::MalformedLine {
                line,
                content: content.to_string(),
            })?;

        let time: f64 = time
            .trim()
            .parse()
            .ok()
            .filter(|t: &f64| t.is_finite() && *t >= 0.0)
            .ok_or_else(|| ChartError::InvalidTime {
                line,
                value: time.trim().to_string(),
            })?;

        let key: Key = key
            .trim()
            .parse()
            .map_err(|source| ChartError::InvalidKey { line, source })?;

        notes.push(Note::new(time, key));
    }

    Ok(notes)
}
