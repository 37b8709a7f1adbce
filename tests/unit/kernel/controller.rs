use super::*;
use crate::kernel::services::adapters::{DocumentStore, LocalProjectManager};
use crate::kernel::services::document_bus;
use crate::kernel::services::ports::{BoxFuture, FileResult, ProjectItem};
use ropey::Rope;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;

const ROOT: &str = "/proj";

fn block_on<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

#[derive(Default)]
struct FakeFs {
    files: Mutex<HashMap<PathBuf, std::result::Result<String, FileErrorCode>>>,
    reads: Mutex<Vec<PathBuf>>,
    writes: Mutex<Vec<(PathBuf, String)>>,
    write_error: Mutex<Option<FileErrorCode>>,
    selection: Mutex<Vec<PathBuf>>,
    dialog_requests: Mutex<Vec<OpenDialogRequest>>,
}

impl FakeFs {
    fn with_file(self, path: &str, text: &str) -> Self {
        self.files
            .lock()
            .unwrap()
            .insert(PathBuf::from(path), Ok(text.to_string()));
        self
    }

    fn with_error(self, path: &str, code: FileErrorCode) -> Self {
        self.files
            .lock()
            .unwrap()
            .insert(PathBuf::from(path), Err(code));
        self
    }

    fn reads(&self) -> Vec<PathBuf> {
        self.reads.lock().unwrap().clone()
    }

    fn writes(&self) -> Vec<(PathBuf, String)> {
        self.writes.lock().unwrap().clone()
    }

    fn fail_writes(&self, code: FileErrorCode) {
        *self.write_error.lock().unwrap() = Some(code);
    }

    fn select(&self, paths: &[&str]) {
        *self.selection.lock().unwrap() = paths.iter().map(PathBuf::from).collect();
    }
}

impl FileSystem for FakeFs {
    fn show_open_dialog(&self, request: OpenDialogRequest) -> BoxFuture<'_, FileResult<Vec<PathBuf>>> {
        Box::pin(async move {
            self.dialog_requests.lock().unwrap().push(request);
            Ok(self.selection.lock().unwrap().clone())
        })
    }

    fn read_text(&self, path: PathBuf) -> BoxFuture<'_, FileResult<String>> {
        Box::pin(async move {
            self.reads.lock().unwrap().push(path.clone());
            match self.files.lock().unwrap().get(&path) {
                Some(Ok(text)) => Ok(text.clone()),
                Some(Err(code)) => Err(FileError::new(*code, path)),
                None => Err(FileError::new(FileErrorCode::NotFound, path)),
            }
        })
    }

    fn write_text(&self, path: PathBuf, content: Rope) -> BoxFuture<'_, FileResult<()>> {
        Box::pin(async move {
            if let Some(code) = *self.write_error.lock().unwrap() {
                return Err(FileError::new(code, path));
            }
            self.writes.lock().unwrap().push((path, content.to_string()));
            Ok(())
        })
    }
}

struct FakeDialogs {
    answer: Mutex<DialogButton>,
    confirmations: Mutex<Vec<(String, String)>>,
    errors: Mutex<Vec<(String, String)>>,
}

impl FakeDialogs {
    fn new(answer: DialogButton) -> Self {
        Self {
            answer: Mutex::new(answer),
            confirmations: Mutex::new(Vec::new()),
            errors: Mutex::new(Vec::new()),
        }
    }

    fn answer(&self, answer: DialogButton) {
        *self.answer.lock().unwrap() = answer;
    }

    fn confirmations(&self) -> Vec<(String, String)> {
        self.confirmations.lock().unwrap().clone()
    }

    fn errors(&self) -> Vec<(String, String)> {
        self.errors.lock().unwrap().clone()
    }
}

impl DialogPresenter for FakeDialogs {
    fn confirm_save_close(&self, title: String, message: String) -> BoxFuture<'_, DialogButton> {
        Box::pin(async move {
            self.confirmations.lock().unwrap().push((title, message));
            *self.answer.lock().unwrap()
        })
    }

    fn show_error(&self, title: String, message: String) -> BoxFuture<'_, ()> {
        Box::pin(async move {
            self.errors.lock().unwrap().push((title, message));
        })
    }
}

#[derive(Clone, Default)]
struct SharedTitle(Arc<Mutex<Vec<String>>>);

impl SharedTitle {
    fn last(&self) -> String {
        self.0.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

impl TitleSink for SharedTitle {
    fn set_title(&mut self, text: &str) {
        self.0.lock().unwrap().push(text.to_string());
    }
}

struct Harness {
    controller: ActiveFileController<DocumentStore>,
    fs: Arc<FakeFs>,
    dialogs: Arc<FakeDialogs>,
    title: SharedTitle,
}

impl Harness {
    fn new(fs: FakeFs) -> Self {
        let fs = Arc::new(fs);
        let dialogs = Arc::new(FakeDialogs::new(DialogButton::Cancel));
        let title = SharedTitle::default();
        let (bus, events) = document_bus();
        let ports = ControllerPorts {
            fs: fs.clone(),
            project: Box::new(LocalProjectManager::new(ROOT)),
            dialogs: dialogs.clone(),
            title: Box::new(title.clone()),
        };
        let controller = ActiveFileController::new(
            DocumentStore::new(bus),
            events,
            ports,
            ControllerOptions::default(),
        );
        Self {
            controller,
            fs,
            dialogs,
            title,
        }
    }

    fn open(&mut self, path: &str) -> Result<()> {
        block_on(self.controller.handle_open(Some(PathBuf::from(path))))
    }

    fn edit(&mut self, path: &str, text: &str) {
        self.controller
            .documents_mut()
            .append(Path::new(path), text);
        self.controller.pump_notifications();
    }
}

#[test]
fn starts_without_file_and_empty_title() {
    let h = Harness::new(FakeFs::default());
    assert_eq!(h.controller.state(), &ActiveFileState::new());
    assert_eq!(h.title.last(), "");
}

#[test]
fn open_sets_current_path_and_project_relative_title() {
    let mut h = Harness::new(FakeFs::default().with_file("/proj/src/a.js", "let a;\n"));

    h.open("/proj/src/a.js").unwrap();

    let state = h.controller.state();
    assert_eq!(state.current_path(), Some(Path::new("/proj/src/a.js")));
    assert_eq!(state.display_path(), Some(Path::new("src/a.js")));
    assert!(!state.is_dirty());
    assert_eq!(h.title.last(), "src/a.js");
    assert_eq!(
        h.controller.documents().text(Path::new("/proj/src/a.js")),
        Some("let a;\n".to_string())
    );
}

#[test]
fn open_outside_project_shows_absolute_path() {
    let mut h = Harness::new(FakeFs::default().with_file("/tmp/notes.txt", "x"));

    h.open("/tmp/notes.txt").unwrap();

    assert_eq!(
        h.controller.state().display_path(),
        Some(Path::new("/tmp/notes.txt"))
    );
    assert_eq!(h.title.last(), "/tmp/notes.txt");
}

#[test]
fn open_always_refocuses_editor() {
    let mut h = Harness::new(FakeFs::default().with_file("/proj/a.js", ""));

    h.open("/proj/a.js").unwrap();
    assert_eq!(h.controller.documents().focus_requests(), 1);
    assert_eq!(
        h.controller.documents().focused(),
        Some(Path::new("/proj/a.js"))
    );

    assert!(h.open("/proj/missing.js").is_err());
    assert_eq!(h.controller.documents().focus_requests(), 2);
}

#[test]
fn open_existing_editor_does_not_reread() {
    let mut h = Harness::new(
        FakeFs::default()
            .with_file("/proj/a.js", "a")
            .with_file("/proj/b.js", "b"),
    );

    h.open("/proj/a.js").unwrap();
    h.open("/proj/b.js").unwrap();
    h.open("/proj/a.js").unwrap();

    assert_eq!(
        h.fs.reads(),
        vec![PathBuf::from("/proj/a.js"), PathBuf::from("/proj/b.js")]
    );
    assert_eq!(
        h.controller.state().current_path(),
        Some(Path::new("/proj/a.js"))
    );
}

#[test]
fn open_missing_file_reports_not_found() {
    let mut h = Harness::new(FakeFs::default());

    let err = h.open("/proj/missing.js").unwrap_err();

    assert!(matches!(err, CommandError::Io(ref e) if e.code == FileErrorCode::NotFound));
    let errors = h.dialogs.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].0, "Error opening file");
    assert_eq!(
        errors[0].1,
        "An error occurred when trying to open the file /proj/missing.js. The file could not be found."
    );
    assert!(!h.controller.state().has_file());
}

#[test]
fn open_error_codes_map_to_messages() {
    let mut h = Harness::new(
        FakeFs::default()
            .with_error("/proj/locked.js", FileErrorCode::NotReadable)
            .with_error("/proj/ro.js", FileErrorCode::NoModificationAllowed)
            .with_error("/proj/odd.js", FileErrorCode::Os(13)),
    );

    assert!(h.open("/proj/locked.js").is_err());
    assert!(h.open("/proj/ro.js").is_err());
    assert!(h.open("/proj/odd.js").is_err());

    let messages: Vec<String> = h.dialogs.errors().into_iter().map(|(_, m)| m).collect();
    assert!(messages[0].ends_with("The file could not be read."));
    assert!(messages[1].ends_with("Permission denied: the file cannot be modified."));
    assert_eq!(
        messages[2],
        "An error occurred when trying to open the file /proj/odd.js. (error 13)"
    );
}

#[test]
fn open_without_path_prompts_in_project_root() {
    let mut h = Harness::new(FakeFs::default().with_file("/proj/picked.css", "body {}"));
    h.fs.select(&["/proj/picked.css"]);

    block_on(h.controller.handle_open(None)).unwrap();

    let requests = h.fs.dialog_requests.lock().unwrap().clone();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].title, "Open File");
    assert_eq!(requests[0].initial_dir, PathBuf::from(ROOT));
    assert!(!requests[0].allow_multiple);
    assert_eq!(requests[0].extensions, vec!["htm", "html", "js", "css"]);
    assert_eq!(
        h.controller.state().current_path(),
        Some(Path::new("/proj/picked.css"))
    );
}

#[test]
fn open_prompt_dismissed_rejects_without_reading() {
    let mut h = Harness::new(FakeFs::default());

    let err = block_on(h.controller.handle_open(None)).unwrap_err();

    assert_eq!(err, CommandError::NoSelection);
    assert!(h.fs.reads().is_empty());
    assert!(h.dialogs.errors().is_empty());
}

#[test]
fn open_empty_path_is_rejected() {
    let mut h = Harness::new(FakeFs::default());
    assert_eq!(h.open("").unwrap_err(), CommandError::InvalidPath);
    assert!(h.fs.reads().is_empty());
}

#[test]
fn dirty_change_for_current_file_updates_title() {
    let mut h = Harness::new(FakeFs::default().with_file("/proj/a.js", "a"));
    h.open("/proj/a.js").unwrap();

    h.edit("/proj/a.js", "b");

    assert!(h.controller.state().is_dirty());
    assert_eq!(h.title.last(), "a.js \u{2022}");
    assert_eq!(h.controller.title(), "a.js \u{2022}");
}

#[test]
fn dirty_change_for_other_document_is_ignored() {
    let mut h = Harness::new(
        FakeFs::default()
            .with_file("/proj/a.js", "a")
            .with_file("/proj/b.js", "b"),
    );
    h.open("/proj/a.js").unwrap();
    h.open("/proj/b.js").unwrap();
    let before = h.controller.state().clone();

    h.controller
        .on_dirty_changed(&DocumentInfo::new("/proj/a.js", true));

    assert_eq!(h.controller.state(), &before);
    assert_eq!(h.title.last(), "b.js");
}

#[test]
fn current_document_none_clears_state() {
    let mut h = Harness::new(FakeFs::default().with_file("/proj/a.js", "a"));
    h.open("/proj/a.js").unwrap();
    h.edit("/proj/a.js", "!");

    h.controller.on_current_document_changed(None);

    assert_eq!(h.controller.state(), &ActiveFileState::new());
    assert_eq!(h.title.last(), "");
}

#[test]
fn save_without_changes_issues_no_write() {
    let mut h = Harness::new(FakeFs::default().with_file("/proj/a.js", "a"));

    block_on(h.controller.handle_save()).unwrap();
    h.open("/proj/a.js").unwrap();
    block_on(h.controller.handle_save()).unwrap();

    assert!(h.fs.writes().is_empty());
}

#[test]
fn save_writes_contents_and_marks_clean() {
    let mut h = Harness::new(FakeFs::default().with_file("/proj/a.js", "a"));
    h.open("/proj/a.js").unwrap();
    h.edit("/proj/a.js", "bc");
    let focus_before = h.controller.documents().focus_requests();

    block_on(h.controller.execute(FileCommand::Save)).unwrap();

    assert_eq!(
        h.fs.writes(),
        vec![(PathBuf::from("/proj/a.js"), "abc".to_string())]
    );
    assert!(!h.controller.state().is_dirty());
    assert!(!h.controller.documents().is_editor_dirty(Path::new("/proj/a.js")));
    assert_eq!(h.title.last(), "a.js");
    assert_eq!(h.controller.documents().focus_requests(), focus_before + 1);
}

#[test]
fn save_failure_reports_and_stays_dirty() {
    let mut h = Harness::new(FakeFs::default().with_file("/proj/a.js", "a"));
    h.open("/proj/a.js").unwrap();
    h.edit("/proj/a.js", "b");
    h.fs.fail_writes(FileErrorCode::NoModificationAllowed);

    let err = block_on(h.controller.handle_save()).unwrap_err();

    assert!(matches!(err, CommandError::Io(_)));
    assert!(h.controller.state().is_dirty());
    let errors = h.dialogs.errors();
    assert_eq!(errors[0].0, "Error saving file");
    assert_eq!(
        errors[0].1,
        "An error occurred when trying to save the file /proj/a.js. Permission denied: the file cannot be modified."
    );
}

#[test]
fn close_clean_file_closes_without_prompt() {
    let mut h = Harness::new(FakeFs::default().with_file("/proj/a.js", "a"));
    h.open("/proj/a.js").unwrap();

    block_on(h.controller.handle_close()).unwrap();

    assert!(h.dialogs.confirmations().is_empty());
    assert!(!h.controller.state().has_file());
    assert!(!h.controller.documents().is_open(Path::new("/proj/a.js")));
    assert_eq!(h.title.last(), "");
}

#[test]
fn close_without_file_is_a_noop() {
    let mut h = Harness::new(FakeFs::default());
    block_on(h.controller.handle_close()).unwrap();
    assert!(h.dialogs.confirmations().is_empty());
}

#[test]
fn close_dirty_cancel_keeps_file_open_and_dirty() {
    let mut h = Harness::new(FakeFs::default().with_file("/proj/a.js", "a"));
    h.open("/proj/a.js").unwrap();
    h.edit("/proj/a.js", "b");
    let before = h.controller.state().clone();
    let focus_before = h.controller.documents().focus_requests();
    h.dialogs.answer(DialogButton::Cancel);

    let err = block_on(h.controller.handle_close()).unwrap_err();

    assert_eq!(err, CommandError::Cancelled);
    assert_eq!(h.controller.state(), &before);
    assert!(h.controller.documents().is_open(Path::new("/proj/a.js")));
    assert_eq!(h.controller.documents().focus_requests(), focus_before);
    assert!(h.fs.writes().is_empty());

    let confirmations = h.dialogs.confirmations();
    assert_eq!(confirmations[0].0, "Save Changes");
    assert_eq!(
        confirmations[0].1,
        "Do you want to save the changes you made in the document a.js?"
    );
}

#[test]
fn close_dirty_dont_save_discards_changes() {
    let mut h = Harness::new(FakeFs::default().with_file("/proj/a.js", "a"));
    h.open("/proj/a.js").unwrap();
    h.edit("/proj/a.js", "b");
    h.dialogs.answer(DialogButton::DontSave);

    block_on(h.controller.handle_close()).unwrap();

    assert!(h.fs.writes().is_empty());
    assert!(!h.controller.state().has_file());
    assert!(!h.controller.state().is_dirty());
}

#[test]
fn close_dirty_save_saves_then_activates_previous_document() {
    let mut h = Harness::new(
        FakeFs::default()
            .with_file("/proj/a.js", "a")
            .with_file("/proj/b.js", "b"),
    );
    h.open("/proj/a.js").unwrap();
    h.open("/proj/b.js").unwrap();
    h.edit("/proj/b.js", "2");
    h.dialogs.answer(DialogButton::Ok);

    block_on(h.controller.execute(FileCommand::Close)).unwrap();

    assert_eq!(
        h.fs.writes(),
        vec![(PathBuf::from("/proj/b.js"), "b2".to_string())]
    );
    assert!(!h.controller.documents().is_open(Path::new("/proj/b.js")));
    assert_eq!(
        h.controller.state().current_path(),
        Some(Path::new("/proj/a.js"))
    );
    assert_eq!(
        h.controller.documents().focused(),
        Some(Path::new("/proj/a.js"))
    );
    assert_eq!(h.title.last(), "a.js");
}

#[test]
fn close_dirty_save_failure_keeps_file_open() {
    let mut h = Harness::new(FakeFs::default().with_file("/proj/a.js", "a"));
    h.open("/proj/a.js").unwrap();
    h.edit("/proj/a.js", "b");
    h.dialogs.answer(DialogButton::Ok);
    h.fs.fail_writes(FileErrorCode::Os(28));

    let err = block_on(h.controller.handle_close()).unwrap_err();

    assert!(matches!(err, CommandError::Io(ref e) if e.code == FileErrorCode::Os(28)));
    assert!(h.controller.documents().is_open(Path::new("/proj/a.js")));
    assert_eq!(
        h.controller.state().current_path(),
        Some(Path::new("/proj/a.js"))
    );
    assert!(h.controller.state().is_dirty());
    assert!(h.dialogs.errors()[0].1.ends_with("(error 28)"));
}

#[test]
fn add_to_working_set_opens_and_lists() {
    let mut h = Harness::new(FakeFs::default().with_file("/proj/a.js", "a"));

    block_on(
        h.controller
            .execute(FileCommand::AddToWorkingSet(PathBuf::from("/proj/a.js"))),
    )
    .unwrap();

    assert_eq!(
        h.controller.documents().working_set(),
        vec![PathBuf::from("/proj/a.js")]
    );
    assert_eq!(
        h.controller.state().current_path(),
        Some(Path::new("/proj/a.js"))
    );
}

#[test]
fn add_to_working_set_skips_unreadable_file() {
    let mut h = Harness::new(FakeFs::default());

    let result = block_on(
        h.controller
            .handle_add_to_working_set(PathBuf::from("/proj/gone.js")),
    );

    assert!(result.is_err());
    assert!(h.controller.documents().working_set().is_empty());
}

#[test]
fn closing_document_removes_it_from_working_set() {
    let mut h = Harness::new(FakeFs::default().with_file("/proj/a.js", "a"));
    block_on(
        h.controller
            .handle_add_to_working_set(PathBuf::from("/proj/a.js")),
    )
    .unwrap();

    block_on(h.controller.handle_close()).unwrap();

    assert!(h.controller.documents().working_set().is_empty());
}

#[test]
fn new_in_project_uses_selection_directory() {
    let dir = tempfile::tempdir().unwrap();
    let sub = dir.path().join("src");
    std::fs::create_dir(&sub).unwrap();
    std::fs::write(sub.join("main.js"), "").unwrap();

    let (bus, events) = document_bus();
    let ports = ControllerPorts {
        fs: Arc::new(FakeFs::default()),
        project: Box::new(LocalProjectManager::new(dir.path())),
        dialogs: Arc::new(FakeDialogs::new(DialogButton::Cancel)),
        title: Box::new(SharedTitle::default()),
    };
    let mut controller = ActiveFileController::new(
        DocumentStore::new(bus),
        events,
        ports,
        ControllerOptions::default(),
    );

    let at_root = block_on(controller.handle_new_in_project()).unwrap();
    assert_eq!(at_root, dir.path().join("Untitled.js"));
    assert!(at_root.is_file());

    controller
        .project_mut()
        .select_item(Some(ProjectItem::file(sub.join("main.js"))));
    let next_to_file = block_on(controller.handle_new_in_project()).unwrap();
    assert_eq!(next_to_file, sub.join("Untitled.js"));

    let nested = sub.join("nested");
    std::fs::create_dir(&nested).unwrap();
    controller
        .project_mut()
        .select_item(Some(ProjectItem::dir(&nested)));
    let inside_dir = block_on(controller.execute(FileCommand::New));
    assert!(inside_dir.is_ok());
    assert!(nested.join("Untitled.js").is_file());
}

#[test]
fn new_in_project_rejects_existing_name() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("Untitled.js"), "keep").unwrap();

    let (bus, events) = document_bus();
    let ports = ControllerPorts {
        fs: Arc::new(FakeFs::default()),
        project: Box::new(LocalProjectManager::new(dir.path())),
        dialogs: Arc::new(FakeDialogs::new(DialogButton::Cancel)),
        title: Box::new(SharedTitle::default()),
    };
    let mut controller = ActiveFileController::new(
        DocumentStore::new(bus),
        events,
        ports,
        ControllerOptions::default(),
    );

    let err = block_on(controller.handle_new_in_project()).unwrap_err();

    assert!(matches!(err, CommandError::Project(ref e) if e.code == FileErrorCode::PathExists));
    assert_eq!(
        std::fs::read_to_string(dir.path().join("Untitled.js")).unwrap(),
        "keep"
    );
}

#[test]
fn custom_dirty_marker_in_title() {
    let fs = Arc::new(FakeFs::default().with_file("/proj/a.js", "a"));
    let title = SharedTitle::default();
    let (bus, events) = document_bus();
    let mut options = ControllerOptions::default();
    options.dirty_marker = "*".to_string();
    let ports = ControllerPorts {
        fs: fs.clone(),
        project: Box::new(LocalProjectManager::new(ROOT)),
        dialogs: Arc::new(FakeDialogs::new(DialogButton::Cancel)),
        title: Box::new(title.clone()),
    };
    let mut controller =
        ActiveFileController::new(DocumentStore::new(bus), events, ports, options);

    block_on(controller.handle_open(Some(PathBuf::from("/proj/a.js")))).unwrap();
    controller
        .documents_mut()
        .append(Path::new("/proj/a.js"), "x");
    controller.pump_notifications();

    assert_eq!(title.last(), "a.js *");
}
