// Chart types
// Gameplay keys and timed notes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Gameplay key a note is played on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    D,
    F,
    J,
    K,
}

/// Keys in lane order; notes cycle through this alphabet
pub const KEY_ALPHABET: [Key; 4] = [Key::D, Key::F, Key::J, Key::K];

impl Key {
    pub fn as_str(&self) -> &'static str {
        match self {
            Key::D => "D",
            Key::F => "F",
            Key::J => "J",
            Key::K => "K",
        }
    }

    /// Key for the note at `index` in a chart
    pub fn for_index(index: usize) -> Key {
        KEY_ALPHABET[index % KEY_ALPHABET.len()]
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a key symbol outside the alphabet
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown key '{0}'")]
pub struct UnknownKey(pub String);

impl FromStr for Key {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "D" => Ok(Key::D),
            "F" => Ok(Key::F),
            "J" => Ok(Key::J),
            "K" => Ok(Key::K),
            other => Err(UnknownKey(other.to_string())),
        }
    }
}

/// A timed note in a chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Seconds from the start of the song
    pub time: f64,

    pub key: Key,
}

impl Note {
    pub fn new(time: f64, key: Key) -> Self {
        Note { time, key }
    }
}
