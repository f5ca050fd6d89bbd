// Peak to note mapping
// Round-robin key assignment over the fixed alphabet

use crate::chart::types::{Key, Note};
use crate::detect::Peak;

/// One note per peak, in order, keys cycling D, F, J, K
pub fn map_notes(peaks: &[Peak]) -> Vec<Note> {
    peaks
        .iter()
        .enumerate()
        .map(|(i, peak)| Note::new(peak.time, Key::for_index(i)))
        .collect()
}
