use crate::kernel::services::ports::FileError;

pub type Result<T> = std::result::Result<T, CommandError>;

/// Why a file command was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The user cancelled a confirmation.
    Cancelled,
    /// The open prompt was dismissed without a file.
    NoSelection,
    InvalidPath,
    Io(FileError),
    Project(FileError),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::Cancelled => write!(f, "Cancelled by user"),
            CommandError::NoSelection => write!(f, "No file selected"),
            CommandError::InvalidPath => write!(f, "Invalid path"),
            CommandError::Io(e) => write!(f, "IO error: {}", e),
            CommandError::Project(e) => write!(f, "Project error: {}", e),
        }
    }
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CommandError::Io(e) | CommandError::Project(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FileError> for CommandError {
    fn from(e: FileError) -> Self {
        CommandError::Io(e)
    }
}
