//! 当前文件控制器
//!
//! Owns the active-file slot and runs the open / save / close / new commands
//! against the collaborator ports. Everything runs on one control thread; the
//! only suspension points are file I/O and modal dialogs.

use crate::kernel::command::FileCommand;
use crate::kernel::error::{CommandError, Result};
use crate::kernel::services::bus::{DocumentBusReceiver, DocumentEvent};
use crate::kernel::services::ports::{
    DialogButton, DialogPresenter, DocumentInfo, DocumentManager, FileError, FileErrorCode,
    FileSystem, OpenDialogRequest, ProjectManager, Settings, TitleSink,
};
use crate::kernel::state::ActiveFileState;
use crate::kernel::strings::{self, Strings};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Collaborators other than the document manager.
pub struct ControllerPorts {
    pub fs: Arc<dyn FileSystem>,
    pub project: Box<dyn ProjectManager>,
    pub dialogs: Arc<dyn DialogPresenter>,
    pub title: Box<dyn TitleSink>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerOptions {
    pub strings: Strings,
    pub new_file_name: String,
    pub open_extensions: Vec<String>,
    pub dirty_marker: String,
}

impl ControllerOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            strings: settings.strings.clone(),
            new_file_name: settings.new_file_name.clone(),
            open_extensions: settings.open_extensions.clone(),
            dirty_marker: settings.dirty_marker.clone(),
        }
    }
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileOp {
    Open,
    Save,
}

pub struct ActiveFileController<D: DocumentManager> {
    state: ActiveFileState,
    documents: D,
    events: DocumentBusReceiver,
    fs: Arc<dyn FileSystem>,
    project: Box<dyn ProjectManager>,
    dialogs: Arc<dyn DialogPresenter>,
    title: Box<dyn TitleSink>,
    options: ControllerOptions,
}

impl<D: DocumentManager> ActiveFileController<D> {
    /// Subscribes to `events` (published by `documents`) and syncs with any
    /// notifications already queued.
    pub fn new(
        documents: D,
        events: DocumentBusReceiver,
        ports: ControllerPorts,
        options: ControllerOptions,
    ) -> Self {
        let mut controller = Self {
            state: ActiveFileState::new(),
            documents,
            events,
            fs: ports.fs,
            project: ports.project,
            dialogs: ports.dialogs,
            title: ports.title,
            options,
        };
        controller.update_title();
        controller.pump_notifications();
        controller
    }

    pub fn state(&self) -> &ActiveFileState {
        &self.state
    }

    pub fn title(&self) -> String {
        self.state.title(&self.options.dirty_marker)
    }

    pub fn documents(&self) -> &D {
        &self.documents
    }

    /// Edits made through this reference are picked up on the next
    /// `pump_notifications`.
    pub fn documents_mut(&mut self) -> &mut D {
        &mut self.documents
    }

    pub fn project(&self) -> &dyn ProjectManager {
        self.project.as_ref()
    }

    pub fn project_mut(&mut self) -> &mut dyn ProjectManager {
        self.project.as_mut()
    }

    /// Applies every queued document notification; returns how many ran.
    pub fn pump_notifications(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.events.try_recv() {
            match event {
                DocumentEvent::CurrentDocumentChanged(doc) => {
                    self.on_current_document_changed(doc.as_ref())
                }
                DocumentEvent::DirtyFlagChanged(doc) => self.on_dirty_changed(&doc),
            }
            handled += 1;
        }
        handled
    }

    pub fn on_current_document_changed(&mut self, doc: Option<&DocumentInfo>) {
        match doc {
            Some(doc) => {
                let display = self.project.make_project_relative_if_possible(&doc.path);
                let dirty = self.documents.is_editor_dirty(&doc.path);
                self.state.set_file(doc.path.clone(), display, dirty);
            }
            None => self.state.clear(),
        }
        tracing::debug!(
            path = ?self.state.current_path(),
            dirty = self.state.is_dirty(),
            "current document changed"
        );
        self.update_title();
    }

    pub fn on_dirty_changed(&mut self, doc: &DocumentInfo) {
        if self.state.is_current(&doc.path) {
            self.state.set_dirty(doc.is_dirty);
            self.update_title();
        } else {
            tracing::debug!(
                changed = %doc.path.display(),
                current = ?self.state.current_path(),
                "rejected dirty change for non-current document"
            );
        }
    }

    pub async fn execute(&mut self, command: FileCommand) -> Result<()> {
        tracing::debug!(command = command.name(), "execute");
        match command {
            FileCommand::Open(path) => self.handle_open(path).await,
            FileCommand::AddToWorkingSet(path) => self.handle_add_to_working_set(path).await,
            FileCommand::New => self.handle_new_in_project().await.map(|_| ()),
            FileCommand::Save => self.handle_save().await,
            FileCommand::Close => self.handle_close().await,
        }
    }

    pub async fn handle_open(&mut self, path: Option<PathBuf>) -> Result<()> {
        let result = self.open_with_optional_path(path).await;
        self.pump_notifications();
        self.documents.focus_editor();
        result
    }

    pub async fn handle_add_to_working_set(&mut self, path: PathBuf) -> Result<()> {
        self.handle_open(Some(path.clone())).await?;
        self.documents.add_to_working_set(&path);
        Ok(())
    }

    /// Creates the placeholder file next to the selected file, inside the
    /// selected directory, or at the project root.
    pub async fn handle_new_in_project(&mut self) -> Result<PathBuf> {
        let selected = self
            .project
            .selected_item()
            .unwrap_or_else(|| self.project.project_root());
        let base_dir = selected.containing_dir();
        let name = self.options.new_file_name.clone();

        match self.project.create_new_item(base_dir, name, false).await {
            Ok(path) => {
                tracing::info!(path = %path.display(), "created new file");
                Ok(path)
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to create new file");
                Err(CommandError::Project(e))
            }
        }
    }

    pub async fn handle_save(&mut self) -> Result<()> {
        let result = self.save_current().await;
        self.pump_notifications();
        self.documents.focus_editor();
        result
    }

    pub async fn handle_close(&mut self) -> Result<()> {
        let Some(path) = self.state.current_path().map(Path::to_path_buf) else {
            self.documents.focus_editor();
            return Ok(());
        };

        if self.state.is_dirty() {
            let display = self
                .state
                .display_path()
                .unwrap_or(path.as_path())
                .display()
                .to_string();
            let strings = &self.options.strings;
            let title = strings.save_close_title.clone();
            let message = strings::format(&strings.save_close_message, &[&display]);

            match self.dialogs.confirm_save_close(title, message).await {
                DialogButton::Cancel => {
                    tracing::debug!(path = %path.display(), "close cancelled");
                    return Err(CommandError::Cancelled);
                }
                DialogButton::Ok => self.handle_save().await?,
                DialogButton::DontSave => {
                    tracing::info!(path = %path.display(), "closing without saving");
                }
            }
        }

        self.close(&path);
        self.documents.focus_editor();
        Ok(())
    }

    async fn open_with_optional_path(&mut self, path: Option<PathBuf>) -> Result<()> {
        let path = match path {
            Some(path) => path,
            None => self.prompt_for_file().await?,
        };
        self.open(path).await
    }

    async fn prompt_for_file(&self) -> Result<PathBuf> {
        let request = OpenDialogRequest {
            allow_multiple: false,
            choose_directories: false,
            title: self.options.strings.open_file.clone(),
            initial_dir: self.project.project_root().path,
            extensions: self.options.open_extensions.clone(),
        };
        let files = self.fs.show_open_dialog(request).await?;
        files.into_iter().next().ok_or(CommandError::NoSelection)
    }

    async fn open(&mut self, path: PathBuf) -> Result<()> {
        if path.as_os_str().is_empty() {
            tracing::warn!("open called without a path");
            return Err(CommandError::InvalidPath);
        }

        if self.documents.has_editor_for(&path) {
            self.documents.show_editor(&path);
            return Ok(());
        }

        match self.fs.read_text(path.clone()).await {
            Ok(text) => {
                tracing::info!(path = %path.display(), bytes = text.len(), "opened file");
                self.documents.create_editor(&path, text);
                Ok(())
            }
            Err(e) => {
                self.report_error(FileOp::Open, &e).await;
                Err(CommandError::Io(e))
            }
        }
    }

    async fn save_current(&mut self) -> Result<()> {
        let Some(path) = self.state.dirty_path().map(Path::to_path_buf) else {
            return Ok(());
        };

        let content = match self.documents.editor_contents(&path) {
            Some(content) => content,
            None => {
                let e = FileError::new(FileErrorCode::InvalidState, &path)
                    .with_detail("no editor for the current document");
                self.report_error(FileOp::Save, &e).await;
                return Err(CommandError::Io(e));
            }
        };

        match self.fs.write_text(path.clone(), content).await {
            Ok(()) => {
                tracing::info!(path = %path.display(), "saved file");
                self.documents.mark_editor_clean(&path);
                Ok(())
            }
            Err(e) => {
                self.report_error(FileOp::Save, &e).await;
                Err(CommandError::Io(e))
            }
        }
    }

    fn close(&mut self, path: &Path) {
        let was_current = self
            .documents
            .current_document()
            .is_some_and(|doc| doc.path == path);

        // The document is going away; clear its flag for anyone still holding it.
        self.documents.set_document_dirty(path, false);
        self.documents.destroy_editor(path);
        self.documents.close_document(path);

        if was_current {
            if let Some(next) = self.documents.current_document() {
                self.documents.show_editor(&next.path);
            }
            self.documents.focus_editor();
        }

        tracing::info!(path = %path.display(), "closed file");
        self.pump_notifications();
    }

    async fn report_error(&self, op: FileOp, err: &FileError) {
        tracing::error!(op = ?op, error = %err, "file operation failed");

        let strings = &self.options.strings;
        let (title, template) = match op {
            FileOp::Open => (&strings.error_opening_file_title, &strings.error_opening_file),
            FileOp::Save => (&strings.error_saving_file_title, &strings.error_saving_file),
        };
        let path = err.path.display().to_string();
        let reason = strings.error_string(err.code);
        let message = strings::format(template, &[&path, &reason]);

        self.dialogs.show_error(title.clone(), message).await;
    }

    fn update_title(&mut self) {
        let text = self.state.title(&self.options.dirty_marker);
        self.title.set_title(&text);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/controller.rs"]
mod tests;
