//! Service adapters: local implementations of the ports (IO/async).

pub mod dialogs;
pub mod documents;
pub mod file;
pub mod paths;
pub mod project;
pub mod prompt;
pub mod settings;

pub use dialogs::TerminalDialogs;
pub use documents::DocumentStore;
pub use file::LocalFileSystem;
pub use paths::{ensure_log_dir, get_log_dir};
pub use project::LocalProjectManager;
pub use settings::{ensure_settings_file, get_settings_path, load_settings, load_settings_from};
