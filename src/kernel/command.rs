//! 文件命令：open / addToWorkingSet / new / save / close

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FileCommand {
    /// Opens `path`, or prompts for a file when absent.
    Open(Option<PathBuf>),
    AddToWorkingSet(PathBuf),
    New,
    Save,
    Close,
}

impl FileCommand {
    pub fn name(&self) -> &'static str {
        match self {
            FileCommand::Open(_) => "file.open",
            FileCommand::AddToWorkingSet(_) => "file.addToWorkingSet",
            FileCommand::New => "file.new",
            FileCommand::Save => "file.save",
            FileCommand::Close => "file.close",
        }
    }

    /// Builds a command from its name (full or short form) and optional argument.
    pub fn from_name(name: &str, arg: Option<&str>) -> Option<Self> {
        let name = name.strip_prefix("file.").unwrap_or(name);
        let arg = arg.map(str::trim).filter(|a| !a.is_empty());
        match name {
            "open" => Some(FileCommand::Open(arg.map(PathBuf::from))),
            "addToWorkingSet" | "add" => arg.map(|a| FileCommand::AddToWorkingSet(PathBuf::from(a))),
            "new" => Some(FileCommand::New),
            "save" => Some(FileCommand::Save),
            "close" => Some(FileCommand::Close),
            _ => None,
        }
    }

    /// Parses a `name [argument]` line.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, Some(rest)),
            None => (line, None),
        };
        Self::from_name(name, arg)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/command.rs"]
mod tests;
