use super::runtime::BoxFuture;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogButton {
    /// Save, then continue.
    Ok,
    DontSave,
    Cancel,
}

pub trait DialogPresenter: Send + Sync {
    /// Three-way Save / Don't Save / Cancel prompt.
    fn confirm_save_close(&self, title: String, message: String) -> BoxFuture<'_, DialogButton>;

    /// Resolves once the user has dismissed the error.
    fn show_error(&self, title: String, message: String) -> BoxFuture<'_, ()>;
}

/// Where the active-file title is displayed.
pub trait TitleSink: Send {
    fn set_title(&mut self, text: &str);
}
