//! 本地项目：以一个目录为根

use crate::kernel::services::ports::file::{FileAccess, FileError, FileErrorCode, Result};
use crate::kernel::services::ports::{BoxFuture, ProjectItem, ProjectManager};
use std::path::{Path, PathBuf};

pub struct LocalProjectManager {
    root: PathBuf,
    selected: Option<ProjectItem>,
}

impl LocalProjectManager {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            selected: None,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Selects `path`, reading from disk whether it is a file.
    pub fn select_path(&mut self, path: &Path) {
        self.selected = Some(project_item_for(&self.root, path));
    }
}

/// Item for `path`, resolved against `root` when relative.
pub fn project_item_for(root: &Path, path: &Path) -> ProjectItem {
    let path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    };
    ProjectItem {
        is_file: path.is_file(),
        path,
    }
}

impl ProjectManager for LocalProjectManager {
    fn project_root(&self) -> ProjectItem {
        ProjectItem::dir(&self.root)
    }

    fn selected_item(&self) -> Option<ProjectItem> {
        self.selected.clone()
    }

    fn select_item(&mut self, item: Option<ProjectItem>) {
        self.selected = item;
    }

    fn make_project_relative_if_possible(&self, path: &Path) -> PathBuf {
        match path.strip_prefix(&self.root) {
            Ok(relative) if !relative.as_os_str().is_empty() => relative.to_path_buf(),
            _ => path.to_path_buf(),
        }
    }

    // TODO: pick a unique name (Untitled-1, Untitled-2, ...) instead of failing with PathExists.
    fn create_new_item(
        &mut self,
        base_dir: PathBuf,
        name: String,
        is_folder: bool,
    ) -> BoxFuture<'_, Result<PathBuf>> {
        Box::pin(async move {
            validate_item_name(&name).map_err(|detail| {
                FileError::new(FileErrorCode::Syntax, base_dir.join(&name)).with_detail(detail)
            })?;

            let path = base_dir.join(&name);
            let created = if is_folder {
                tokio::fs::create_dir(&path).await
            } else {
                tokio::fs::OpenOptions::new()
                    .write(true)
                    .create_new(true)
                    .open(&path)
                    .await
                    .map(|_| ())
            };
            created.map_err(|e| FileError::from_io(e, &path, FileAccess::Write))?;

            self.selected = Some(ProjectItem {
                path: path.clone(),
                is_file: !is_folder,
            });
            Ok(path)
        })
    }
}

fn validate_item_name(name: &str) -> std::result::Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("empty name");
    }
    if name == "." || name == ".." {
        return Err("reserved name");
    }
    if name.contains(['/', '\\']) {
        return Err("name contains a path separator");
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/project.rs"]
mod tests;
