//! Headless file-command core: active-file state, commands, controller.

pub mod command;
pub mod controller;
pub mod error;
pub mod services;
pub mod state;
pub mod strings;

pub use command::FileCommand;
pub use controller::{ActiveFileController, ControllerOptions, ControllerPorts};
pub use error::{CommandError, Result};
pub use state::ActiveFileState;
pub use strings::Strings;
