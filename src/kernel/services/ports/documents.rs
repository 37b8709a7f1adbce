use ropey::Rope;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentInfo {
    pub path: PathBuf,
    pub is_dirty: bool,
}

impl DocumentInfo {
    pub fn new(path: impl Into<PathBuf>, is_dirty: bool) -> Self {
        Self {
            path: path.into(),
            is_dirty,
        }
    }
}

/// Open documents, the editors bound to them and the working set.
///
/// Implementations report changes of the current document and of dirty flags
/// through the document bus (`kernel::services::bus`).
pub trait DocumentManager: Send {
    fn current_document(&self) -> Option<DocumentInfo>;

    fn has_editor_for(&self, path: &Path) -> bool;

    /// Creates the document and its editor, and makes it current.
    fn create_editor(&mut self, path: &Path, content: String);

    /// Makes the existing editor for `path` current.
    fn show_editor(&mut self, path: &Path);

    fn destroy_editor(&mut self, path: &Path);

    fn is_editor_dirty(&self, path: &Path) -> bool;

    fn mark_editor_clean(&mut self, path: &Path);

    fn editor_contents(&self, path: &Path) -> Option<Rope>;

    fn focus_editor(&mut self);

    fn set_document_dirty(&mut self, path: &Path, dirty: bool);

    fn close_document(&mut self, path: &Path);

    fn add_to_working_set(&mut self, path: &Path);

    fn working_set(&self) -> Vec<PathBuf>;
}
