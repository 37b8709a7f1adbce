//! User-facing strings and `{N}` placeholder formatting.

use crate::kernel::services::ports::FileErrorCode;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Strings {
    pub open_file: String,
    pub save_close_title: String,
    pub save_close_message: String,
    pub error_opening_file_title: String,
    pub error_opening_file: String,
    pub error_saving_file_title: String,
    pub error_saving_file: String,
    pub not_found_err: String,
    pub not_readable_err: String,
    pub no_modification_allowed_err: String,
    pub generic_error: String,
}

impl Default for Strings {
    fn default() -> Self {
        Self {
            open_file: "Open File".to_string(),
            save_close_title: "Save Changes".to_string(),
            save_close_message: "Do you want to save the changes you made in the document {0}?"
                .to_string(),
            error_opening_file_title: "Error opening file".to_string(),
            error_opening_file: "An error occurred when trying to open the file {0}. {1}"
                .to_string(),
            error_saving_file_title: "Error saving file".to_string(),
            error_saving_file: "An error occurred when trying to save the file {0}. {1}"
                .to_string(),
            not_found_err: "The file could not be found.".to_string(),
            not_readable_err: "The file could not be read.".to_string(),
            no_modification_allowed_err: "Permission denied: the file cannot be modified."
                .to_string(),
            generic_error: "(error {0})".to_string(),
        }
    }
}

impl Strings {
    /// Message for a file error code; unmapped codes get the generic form.
    pub fn error_string(&self, code: FileErrorCode) -> String {
        match code {
            FileErrorCode::NotFound => self.not_found_err.clone(),
            FileErrorCode::NotReadable => self.not_readable_err.clone(),
            FileErrorCode::NoModificationAllowed => self.no_modification_allowed_err.clone(),
            other => format(&self.generic_error, &[&other.code()]),
        }
    }
}

/// Replaces `{0}`, `{1}`, ... with the matching argument. Placeholders without
/// an argument, and unbalanced braces, are kept as written.
pub fn format(template: &str, args: &[&dyn Display]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };

        let arg = after[..close]
            .parse::<usize>()
            .ok()
            .and_then(|idx| args.get(idx));
        match arg {
            Some(arg) => out.push_str(&arg.to_string()),
            None => out.push_str(&rest[open..open + close + 2]),
        }
        rest = &after[close + 1..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/strings.rs"]
mod tests;
