use crate::kernel::strings::Strings;
use serde::{Deserialize, Serialize};

pub const DEFAULT_NEW_FILE_NAME: &str = "Untitled.js";
pub const DEFAULT_DIRTY_MARKER: &str = "\u{2022}";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Placeholder name for `file.new`.
    pub new_file_name: String,
    /// Extensions offered by the open prompt; empty means any file.
    pub open_extensions: Vec<String>,
    pub dirty_marker: String,
    pub strings: Strings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            new_file_name: DEFAULT_NEW_FILE_NAME.to_string(),
            open_extensions: ["htm", "html", "js", "css"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            dirty_marker: DEFAULT_DIRTY_MARKER.to_string(),
            strings: Strings::default(),
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/settings.rs"]
mod tests;
