//! 本地文件系统
//!
//! 读用 tokio::fs，写在阻塞线程上按 rope chunk 写出；打开对话框在终端里提示输入路径

use super::prompt::prompt_line;
use crate::kernel::services::ports::file::{
    FileAccess, FileError, FileErrorCode, FileSystem, OpenDialogRequest, Result,
};
use crate::kernel::services::ports::BoxFuture;
use ropey::Rope;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFileSystem {
    fn show_open_dialog(&self, request: OpenDialogRequest) -> BoxFuture<'_, Result<Vec<PathBuf>>> {
        Box::pin(async move {
            let filter = if request.extensions.is_empty() {
                String::from("*")
            } else {
                request.extensions.join(", ")
            };
            let prompt = format!(
                "{} [{}] ({}): ",
                request.title,
                request.initial_dir.display(),
                filter
            );
            let line = prompt_line(prompt)
                .await
                .map_err(|e| FileError::from_io(e, &request.initial_dir, FileAccess::Read))?;
            Ok(resolve_selection(line.as_deref().unwrap_or(""), &request))
        })
    }

    fn read_text(&self, path: PathBuf) -> BoxFuture<'_, Result<String>> {
        Box::pin(async move {
            let meta = tokio::fs::metadata(&path)
                .await
                .map_err(|e| FileError::from_io(e, &path, FileAccess::Read))?;
            if meta.is_dir() {
                return Err(FileError::new(FileErrorCode::TypeMismatch, path)
                    .with_detail("is a directory"));
            }
            tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| FileError::from_io(e, &path, FileAccess::Read))
        })
    }

    fn write_text(&self, path: PathBuf, content: Rope) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            let target = path.clone();
            match tokio::task::spawn_blocking(move || write_rope_to_path(&target, &content)).await
            {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => Err(FileError::from_io(e, path, FileAccess::Write)),
                Err(e) => Err(FileError::new(FileErrorCode::Abort, path).with_detail(e.to_string())),
            }
        })
    }
}

/// Turns the prompt answer into the selected files: blank means dismissed,
/// relative paths resolve against the initial directory, filtered-out
/// extensions are not selectable.
pub fn resolve_selection(answer: &str, request: &OpenDialogRequest) -> Vec<PathBuf> {
    let answer = answer.trim();
    if answer.is_empty() {
        return Vec::new();
    }

    let path = Path::new(answer);
    let path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        request.initial_dir.join(path)
    };

    if !request.accepts(&path) {
        tracing::warn!(path = %path.display(), "selection filtered out by extension");
        return Vec::new();
    }
    vec![path]
}

fn write_rope_to_path(path: &Path, rope: &Rope) -> std::io::Result<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = std::io::BufWriter::new(file);
    for chunk in rope.chunks() {
        writer.write_all(chunk.as_bytes())?;
    }
    writer.flush()
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/file.rs"]
mod tests;
