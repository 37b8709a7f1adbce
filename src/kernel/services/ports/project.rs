use super::file::Result;
use super::runtime::BoxFuture;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectItem {
    pub path: PathBuf,
    pub is_file: bool,
}

impl ProjectItem {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            is_file: true,
        }
    }

    pub fn dir(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            is_file: false,
        }
    }

    /// Directory a new sibling item would be created in.
    pub fn containing_dir(&self) -> PathBuf {
        if self.is_file {
            self.path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| self.path.clone())
        } else {
            self.path.clone()
        }
    }
}

pub trait ProjectManager: Send {
    fn project_root(&self) -> ProjectItem;

    fn selected_item(&self) -> Option<ProjectItem>;

    fn select_item(&mut self, item: Option<ProjectItem>);

    /// Project-relative form of `path` when it lives under the root, else `path`.
    fn make_project_relative_if_possible(&self, path: &Path) -> PathBuf;

    /// Creates `name` inside `base_dir`, selects it and resolves with its path.
    fn create_new_item(
        &mut self,
        base_dir: PathBuf,
        name: String,
        is_folder: bool,
    ) -> BoxFuture<'_, Result<PathBuf>>;
}
