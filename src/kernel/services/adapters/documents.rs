//! 内存文档管理
//!
//! Documents keep their text in a `Rope`. The most recently shown document is
//! current; closing it falls back to the previous one. Every change of the
//! current document or of a dirty flag is published on the document bus.

use crate::kernel::services::bus::DocumentBusSender;
use crate::kernel::services::ports::{DocumentInfo, DocumentManager};
use ropey::Rope;
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};

#[derive(Debug)]
struct OpenDocument {
    rope: Rope,
    is_dirty: bool,
    has_editor: bool,
}

pub struct DocumentStore {
    documents: FxHashMap<PathBuf, OpenDocument>,
    /// Shown order, most recent last. The last entry is the current document.
    history: Vec<PathBuf>,
    working_set: Vec<PathBuf>,
    focused: Option<PathBuf>,
    focus_requests: usize,
    bus: DocumentBusSender,
}

impl DocumentStore {
    pub fn new(bus: DocumentBusSender) -> Self {
        Self {
            documents: FxHashMap::default(),
            history: Vec::new(),
            working_set: Vec::new(),
            focused: None,
            focus_requests: 0,
            bus,
        }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn is_open(&self, path: &Path) -> bool {
        self.documents.contains_key(path)
    }

    /// Editor that last received focus.
    pub fn focused(&self) -> Option<&Path> {
        self.focused.as_deref()
    }

    pub fn focus_requests(&self) -> usize {
        self.focus_requests
    }

    pub fn text(&self, path: &Path) -> Option<String> {
        self.documents.get(path).map(|doc| doc.rope.to_string())
    }

    /// Inserts `text` at char index `char_idx` (clamped to the end).
    pub fn insert(&mut self, path: &Path, char_idx: usize, text: &str) -> bool {
        let Some(doc) = self.documents.get_mut(path) else {
            return false;
        };
        let idx = char_idx.min(doc.rope.len_chars());
        doc.rope.insert(idx, text);
        self.set_document_dirty(path, true);
        true
    }

    pub fn append(&mut self, path: &Path, text: &str) -> bool {
        let end = match self.documents.get(path) {
            Some(doc) => doc.rope.len_chars(),
            None => return false,
        };
        self.insert(path, end, text)
    }

    /// Removes the chars in `start..end` (clamped).
    pub fn delete(&mut self, path: &Path, start: usize, end: usize) -> bool {
        let Some(doc) = self.documents.get_mut(path) else {
            return false;
        };
        let len = doc.rope.len_chars();
        let (start, end) = (start.min(len), end.min(len));
        if start >= end {
            return false;
        }
        doc.rope.remove(start..end);
        self.set_document_dirty(path, true);
        true
    }

    fn current_path(&self) -> Option<&PathBuf> {
        self.history.last()
    }

    fn info(&self, path: &Path) -> Option<DocumentInfo> {
        self.documents
            .get(path)
            .map(|doc| DocumentInfo::new(path, doc.is_dirty))
    }

    fn current_info(&self) -> Option<DocumentInfo> {
        self.current_path().and_then(|path| self.info(path))
    }

    /// Moves `path` to the top of the history, publishing the change.
    fn make_current(&mut self, path: &Path) {
        if self.current_path().is_some_and(|current| current == path) {
            return;
        }
        self.history.retain(|p| p != path);
        self.history.push(path.to_path_buf());
        self.bus.current_document_changed(self.current_info());
    }
}

impl DocumentManager for DocumentStore {
    fn current_document(&self) -> Option<DocumentInfo> {
        self.current_info()
    }

    fn has_editor_for(&self, path: &Path) -> bool {
        self.documents.get(path).is_some_and(|doc| doc.has_editor)
    }

    fn create_editor(&mut self, path: &Path, content: String) {
        self.documents.insert(
            path.to_path_buf(),
            OpenDocument {
                rope: Rope::from_str(&content),
                is_dirty: false,
                has_editor: true,
            },
        );
        self.make_current(path);
    }

    fn show_editor(&mut self, path: &Path) {
        match self.documents.get_mut(path) {
            Some(doc) => {
                doc.has_editor = true;
                self.make_current(path);
            }
            None => tracing::warn!(path = %path.display(), "show_editor for unknown document"),
        }
    }

    fn destroy_editor(&mut self, path: &Path) {
        if let Some(doc) = self.documents.get_mut(path) {
            doc.has_editor = false;
        }
        if self.focused.as_deref() == Some(path) {
            self.focused = None;
        }
    }

    fn is_editor_dirty(&self, path: &Path) -> bool {
        self.documents.get(path).is_some_and(|doc| doc.is_dirty)
    }

    fn mark_editor_clean(&mut self, path: &Path) {
        self.set_document_dirty(path, false);
    }

    fn editor_contents(&self, path: &Path) -> Option<Rope> {
        self.documents
            .get(path)
            .filter(|doc| doc.has_editor)
            .map(|doc| doc.rope.clone())
    }

    fn focus_editor(&mut self) {
        self.focus_requests += 1;
        self.focused = self
            .current_path()
            .filter(|path| self.has_editor_for(path))
            .cloned();
    }

    fn set_document_dirty(&mut self, path: &Path, dirty: bool) {
        let Some(doc) = self.documents.get_mut(path) else {
            return;
        };
        if doc.is_dirty == dirty {
            return;
        }
        doc.is_dirty = dirty;
        self.bus.dirty_flag_changed(DocumentInfo::new(path, dirty));
    }

    fn close_document(&mut self, path: &Path) {
        if self.documents.remove(path).is_none() {
            return;
        }
        self.working_set.retain(|p| p != path);

        let was_current = self.current_path().is_some_and(|current| current == path);
        self.history.retain(|p| p != path);
        if was_current {
            self.bus.current_document_changed(self.current_info());
        }
    }

    fn add_to_working_set(&mut self, path: &Path) {
        if !self.working_set.iter().any(|p| p == path) {
            self.working_set.push(path.to_path_buf());
        }
    }

    fn working_set(&self) -> Vec<PathBuf> {
        self.working_set.clone()
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/documents.rs"]
mod tests;
