//! 终端对话框：保存确认、错误提示

use super::prompt::prompt_line;
use crate::kernel::services::ports::{BoxFuture, DialogButton, DialogPresenter};

#[derive(Debug, Default)]
pub struct TerminalDialogs;

impl TerminalDialogs {
    pub fn new() -> Self {
        Self
    }
}

impl DialogPresenter for TerminalDialogs {
    fn confirm_save_close(&self, title: String, message: String) -> BoxFuture<'_, DialogButton> {
        Box::pin(async move {
            println!("== {} ==", title);
            println!("{}", message);
            loop {
                match prompt_line("[s]ave, [d]on't save, [c]ancel: ".to_string()).await {
                    Ok(Some(answer)) => match parse_choice(&answer) {
                        Some(choice) => return choice,
                        None => continue,
                    },
                    Ok(None) => return DialogButton::Cancel,
                    Err(e) => {
                        tracing::warn!(error = %e, "confirmation prompt failed");
                        return DialogButton::Cancel;
                    }
                }
            }
        })
    }

    fn show_error(&self, title: String, message: String) -> BoxFuture<'_, ()> {
        Box::pin(async move {
            eprintln!("== {} ==", title);
            eprintln!("{}", message);
        })
    }
}

pub fn parse_choice(answer: &str) -> Option<DialogButton> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "s" | "save" | "y" | "yes" => Some(DialogButton::Ok),
        "d" | "dont" | "don't" | "don't save" | "n" | "no" => Some(DialogButton::DontSave),
        "c" | "cancel" => Some(DialogButton::Cancel),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/dialogs.rs"]
mod tests;
