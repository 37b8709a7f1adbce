//scribe/src/main.rs
use std::io::{self, BufRead, Write};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use scribe::kernel::services::adapters::{
    ensure_settings_file, load_settings, DocumentStore, LocalFileSystem, LocalProjectManager,
    TerminalDialogs,
};
use scribe::kernel::services::adapters::project::project_item_for;
use scribe::kernel::services::document_bus;
use scribe::kernel::services::ports::{DocumentManager, Settings, TitleSink};
use scribe::kernel::{
    ActiveFileController, CommandError, ControllerOptions, ControllerPorts, FileCommand,
};

mod logging;

const HELP: &str = "\
commands:
  open [PATH]        open a file (prompts when PATH is omitted)
  add PATH           open PATH and add it to the working set
  new                create the placeholder file next to the selection
  save               save the current file
  close              close the current file
  select PATH        select a project item
  type TEXT          append a line to the current file
  print              show the current file
  ws                 list the working set
  quit";

type Controller = ActiveFileController<DocumentStore>;

struct ConsoleTitle;

impl TitleSink for ConsoleTitle {
    fn set_title(&mut self, text: &str) {
        if text.is_empty() {
            println!("-- no file --");
        } else {
            println!("-- {} --", text);
        }
    }
}

fn main() -> io::Result<()> {
    let _logging = logging::init();

    let args: Vec<String> = env::args().collect();
    let root = match args.get(1) {
        Some(root) => PathBuf::from(root),
        None => env::current_dir()?,
    };

    let settings = load_startup_settings();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let (bus, events) = document_bus();
    let ports = ControllerPorts {
        fs: Arc::new(LocalFileSystem::new()),
        project: Box::new(LocalProjectManager::new(root.clone())),
        dialogs: Arc::new(TerminalDialogs::new()),
        title: Box::new(ConsoleTitle),
    };
    let mut controller = ActiveFileController::new(
        DocumentStore::new(bus),
        events,
        ports,
        ControllerOptions::from_settings(&settings),
    );
    tracing::info!(root = %root.display(), "project opened");

    if let Some(file) = args.get(2) {
        run_command(
            &runtime,
            &mut controller,
            FileCommand::Open(Some(root.join(file))),
        );
    }

    println!("{}", HELP);
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        let (verb, arg) = match line.split_once(' ') {
            Some((verb, arg)) => (verb, arg.trim()),
            None => (line, ""),
        };

        match verb {
            "" => {}
            "help" => println!("{}", HELP),
            "quit" | "exit" => {
                if run_command(&runtime, &mut controller, FileCommand::Close) {
                    break;
                }
            }
            "select" => select(&mut controller, &root, arg),
            "type" => append_line(&mut controller, arg),
            "print" => print_current(&controller),
            "ws" => {
                for path in controller.documents().working_set() {
                    println!("  {}", path.display());
                }
            }
            _ => match FileCommand::parse(line) {
                Some(command) => {
                    run_command(&runtime, &mut controller, resolve_paths(command, &root));
                }
                None => println!("unknown command: {}", verb),
            },
        }
    }

    tracing::info!("exiting");
    Ok(())
}

fn load_startup_settings() -> Settings {
    if let Err(e) = ensure_settings_file() {
        tracing::warn!(error = %e, "could not create settings file");
    }
    load_settings().unwrap_or_default()
}

fn run_command(
    runtime: &tokio::runtime::Runtime,
    controller: &mut Controller,
    command: FileCommand,
) -> bool {
    let name = command.name();
    match runtime.block_on(controller.execute(command)) {
        Ok(()) => true,
        Err(CommandError::Cancelled) => false,
        Err(e) => {
            // IO failures already went through the error dialog.
            if !matches!(e, CommandError::Io(_)) {
                println!("{} failed: {}", name, e);
            }
            false
        }
    }
}

/// Relative paths typed at the prompt are relative to the project root.
fn resolve_paths(command: FileCommand, root: &Path) -> FileCommand {
    match command {
        FileCommand::Open(Some(path)) => FileCommand::Open(Some(root.join(path))),
        FileCommand::AddToWorkingSet(path) => FileCommand::AddToWorkingSet(root.join(path)),
        other => other,
    }
}

fn select(controller: &mut Controller, root: &Path, arg: &str) {
    let item = (!arg.is_empty()).then(|| project_item_for(root, Path::new(arg)));
    controller.project_mut().select_item(item);
}

fn append_line(controller: &mut Controller, text: &str) {
    let Some(path) = controller.state().current_path().map(|p| p.to_path_buf()) else {
        println!("no file open");
        return;
    };
    controller.documents_mut().append(&path, &format!("{}\n", text));
    controller.pump_notifications();
}

fn print_current(controller: &Controller) {
    match controller
        .state()
        .current_path()
        .and_then(|path| controller.documents().text(path))
    {
        Some(text) => print!("{}", text),
        None => println!("no file open"),
    }
}
