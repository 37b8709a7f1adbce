use std::path::{Path, PathBuf};

/// The one active-file slot: which file is current, how it is titled and
/// whether it has unsaved changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveFileState {
    current_path: Option<PathBuf>,
    display_path: Option<PathBuf>,
    is_dirty: bool,
}

impl ActiveFileState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    pub fn display_path(&self) -> Option<&Path> {
        self.display_path.as_deref()
    }

    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    pub fn has_file(&self) -> bool {
        self.current_path.is_some()
    }

    pub fn is_current(&self, path: &Path) -> bool {
        self.current_path.as_deref() == Some(path)
    }

    /// Current path, only when it carries unsaved changes.
    pub fn dirty_path(&self) -> Option<&Path> {
        self.current_path().filter(|_| self.is_dirty)
    }

    pub(crate) fn set_file(&mut self, path: PathBuf, display_path: PathBuf, is_dirty: bool) {
        self.current_path = Some(path);
        self.display_path = Some(display_path);
        self.is_dirty = is_dirty;
    }

    pub(crate) fn clear(&mut self) {
        self.current_path = None;
        self.display_path = None;
        self.is_dirty = false;
    }

    pub(crate) fn set_dirty(&mut self, dirty: bool) {
        self.is_dirty = dirty && self.current_path.is_some();
    }

    /// `display_path`, followed by `marker` when dirty; empty without a file.
    pub fn title(&self, marker: &str) -> String {
        match self.display_path.as_deref() {
            Some(path) if self.is_dirty && !marker.is_empty() => {
                format!("{} {}", path.display(), marker)
            }
            Some(path) => path.display().to_string(),
            None => String::new(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/state.rs"]
mod tests;
