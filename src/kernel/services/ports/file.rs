//! 文件系统 port
//!
//! 打开对话框、读、写三个异步操作，错误统一为带错误码的 `FileError`

use super::runtime::BoxFuture;
use ropey::Rope;
use std::io;
use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, FileError>;

/// Error codes reported by the file system, numbered like the classic
/// `FileError` constants so the generic message can show them verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileErrorCode {
    NotFound,
    Security,
    Abort,
    NotReadable,
    Encoding,
    NoModificationAllowed,
    InvalidState,
    Syntax,
    InvalidModification,
    QuotaExceeded,
    TypeMismatch,
    PathExists,
    Os(i32),
}

/// Direction of the operation that failed; permission errors map differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAccess {
    Read,
    Write,
}

impl FileErrorCode {
    pub fn code(&self) -> i32 {
        match self {
            FileErrorCode::NotFound => 1,
            FileErrorCode::Security => 2,
            FileErrorCode::Abort => 3,
            FileErrorCode::NotReadable => 4,
            FileErrorCode::Encoding => 5,
            FileErrorCode::NoModificationAllowed => 6,
            FileErrorCode::InvalidState => 7,
            FileErrorCode::Syntax => 8,
            FileErrorCode::InvalidModification => 9,
            FileErrorCode::QuotaExceeded => 10,
            FileErrorCode::TypeMismatch => 11,
            FileErrorCode::PathExists => 12,
            FileErrorCode::Os(code) => *code,
        }
    }

    pub fn from_io(err: &io::Error, access: FileAccess) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => FileErrorCode::NotFound,
            io::ErrorKind::PermissionDenied => match access {
                FileAccess::Read => FileErrorCode::NotReadable,
                FileAccess::Write => FileErrorCode::NoModificationAllowed,
            },
            io::ErrorKind::InvalidData => FileErrorCode::NotReadable,
            io::ErrorKind::AlreadyExists => FileErrorCode::PathExists,
            io::ErrorKind::InvalidInput => FileErrorCode::Syntax,
            _ => err
                .raw_os_error()
                .map(FileErrorCode::Os)
                .unwrap_or(FileErrorCode::InvalidState),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileError {
    pub code: FileErrorCode,
    pub path: PathBuf,
    pub detail: String,
}

impl FileError {
    pub fn new(code: FileErrorCode, path: impl Into<PathBuf>) -> Self {
        Self {
            code,
            path: path.into(),
            detail: String::new(),
        }
    }

    pub fn from_io(err: io::Error, path: impl Into<PathBuf>, access: FileAccess) -> Self {
        Self {
            code: FileErrorCode::from_io(&err, access),
            path: path.into(),
            detail: err.to_string(),
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }
}

impl std::fmt::Display for FileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "file error {} at {}",
            self.code.code(),
            self.path.display()
        )?;
        if !self.detail.is_empty() {
            write!(f, ": {}", self.detail)?;
        }
        Ok(())
    }
}

impl std::error::Error for FileError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenDialogRequest {
    pub allow_multiple: bool,
    pub choose_directories: bool,
    pub title: String,
    pub initial_dir: PathBuf,
    /// Extensions without the leading dot; empty accepts every file.
    pub extensions: Vec<String>,
}

impl OpenDialogRequest {
    pub fn accepts(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.extensions
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(ext))
            })
    }
}

pub trait FileSystem: Send + Sync {
    /// Resolves with the chosen files; an empty list means the user dismissed it.
    fn show_open_dialog(&self, request: OpenDialogRequest) -> BoxFuture<'_, Result<Vec<PathBuf>>>;

    fn read_text(&self, path: PathBuf) -> BoxFuture<'_, Result<String>>;

    /// Replaces the whole file with `content`.
    fn write_text(&self, path: PathBuf, content: Rope) -> BoxFuture<'_, Result<()>>;
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/file.rs"]
mod tests;
