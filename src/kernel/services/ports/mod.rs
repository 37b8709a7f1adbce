//! Service ports: traits + data contracts.
//!
//! Every collaborator of the file-command controller is reached through one of
//! these traits, so the controller can run against local adapters or fakes.

pub mod dialog;
pub mod documents;
pub mod file;
pub mod project;
pub mod runtime;
pub mod settings;

pub use dialog::{DialogButton, DialogPresenter, TitleSink};
pub use documents::{DocumentInfo, DocumentManager};
pub use file::{
    FileAccess, FileError, FileErrorCode, FileSystem, OpenDialogRequest, Result as FileResult,
};
pub use project::{ProjectItem, ProjectManager};
pub use runtime::BoxFuture;
pub use settings::Settings;
