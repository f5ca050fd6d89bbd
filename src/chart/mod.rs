// Note chart module
// Key assignment and the flat text chart format

pub mod format;
pub mod mapper;
pub mod types;

pub use format::{parse_chart_text, to_chart_text, ChartError};
pub use mapper::map_notes;
pub use types::{Key, Note, UnknownKey, KEY_ALPHABET};
