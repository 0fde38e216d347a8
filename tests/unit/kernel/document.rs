use super::*;
use crate::kernel::services::adapters::LocalFileProvider;
use crate::kernel::services::ports::{FileError, FileFilter, FileResult};
use std::collections::{HashMap, VecDeque};
use std::io;
use tempfile::tempdir;

enum Backing {
    Memory(HashMap<PathBuf, String>),
    Disk(LocalFileProvider),
}

struct ScriptedStore {
    choices: VecDeque<Choice>,
    open_paths: VecDeque<Option<PathBuf>>,
    save_paths: VecDeque<Option<PathBuf>>,
    backing: Backing,
    fail_writes: bool,
    prompts: Vec<String>,
    errors: Vec<(String, String)>,
    statuses: Vec<(String, StatusStyle)>,
    writes: usize,
    open_dialogs: usize,
    save_dialogs: usize,
}

impl ScriptedStore {
    fn memory() -> Self {
        Self::with_backing(Backing::Memory(HashMap::new()))
    }

    fn disk() -> Self {
        Self::with_backing(Backing::Disk(LocalFileProvider::new()))
    }

    fn with_backing(backing: Backing) -> Self {
        Self {
            choices: VecDeque::new(),
            open_paths: VecDeque::new(),
            save_paths: VecDeque::new(),
            backing,
            fail_writes: false,
            prompts: Vec::new(),
            errors: Vec::new(),
            statuses: Vec::new(),
            writes: 0,
            open_dialogs: 0,
            save_dialogs: 0,
        }
    }

    fn file(&self, path: &str) -> Option<String> {
        match &self.backing {
            Backing::Memory(files) => files.get(Path::new(path)).cloned(),
            Backing::Disk(provider) => provider.read_text(Path::new(path)).ok(),
        }
    }

    fn put(&mut self, path: &str, text: &str) {
        if let Backing::Memory(files) = &mut self.backing {
            files.insert(PathBuf::from(path), text.to_string());
        }
    }
}

impl FileStore for ScriptedStore {
    fn choose_open_path(&mut self, _filters: &[FileFilter]) -> Option<PathBuf> {
        self.open_dialogs += 1;
        self.open_paths.pop_front().expect("unexpected open dialog")
    }

    fn choose_save_path(&mut self, _filters: &[FileFilter], default_ext: &str) -> Option<PathBuf> {
        assert_eq!(default_ext, "txt");
        self.save_dialogs += 1;
        self.save_paths.pop_front().expect("unexpected save dialog")
    }

    fn read_text(&mut self, path: &Path) -> FileResult<String> {
        match &self.backing {
            Backing::Memory(files) => files.get(path).cloned().ok_or_else(|| {
                FileError::read(path, io::Error::new(io::ErrorKind::NotFound, "not found"))
            }),
            Backing::Disk(provider) => provider.read_text(path),
        }
    }

    fn write_text(&mut self, path: &Path, text: &str) -> FileResult<()> {
        if self.fail_writes {
            return Err(FileError::write(
                path,
                io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
            ));
        }
        self.writes += 1;
        match &mut self.backing {
            Backing::Memory(files) => {
                files.insert(path.to_path_buf(), text.to_string());
                Ok(())
            }
            Backing::Disk(provider) => provider.write_text(path, text),
        }
    }

    fn confirm_three_way(&mut self, title: &str, _message: &str) -> Choice {
        self.prompts.push(title.to_string());
        self.choices.pop_front().expect("unexpected prompt")
    }

    fn show_error(&mut self, title: &str, message: &str) {
        self.errors.push((title.to_string(), message.to_string()));
    }

    fn show_status(&mut self, message: &str, style: StatusStyle, _duration: Duration) {
        self.statuses.push((message.to_string(), style));
    }
}

type Controller = DocumentController<String, ScriptedStore>;

fn controller() -> Controller {
    DocumentController::new(String::new(), ScriptedStore::memory())
}

fn type_text(controller: &mut Controller, text: &str) {
    controller.edit(|surface| {
        surface.push_str(text);
        !text.is_empty()
    });
}

fn dirty_titled(path: &str, saved: &str, extra: &str) -> Controller {
    let mut c = controller();
    c.store_mut().put(path, saved);
    c.store_mut().open_paths.push_back(Some(PathBuf::from(path)));
    c.request_open();
    type_text(&mut c, extra);
    c
}

#[test]
fn starts_untitled_and_clean() {
    let c = controller();
    assert_eq!(c.state(), &DocumentState::default());
    assert_eq!(c.title(), "BlockEdit");
    assert!(!c.should_exit());
}

#[test]
fn edits_mark_dirty_and_no_op_edits_do_not() {
    let mut c = controller();
    assert!(!c.edit(|_| false));
    assert!(!c.is_dirty());

    type_text(&mut c, "a");
    assert!(c.is_dirty());
    assert_eq!(c.title(), "BlockEdit *");
}

#[test]
fn clean_document_skips_the_prompt() {
    let mut c = controller();
    assert_eq!(c.request_new(), Verdict::Proceed);
    assert_eq!(c.request_exit(), Verdict::Proceed);
    assert!(c.store().prompts.is_empty());
    assert!(c.should_exit());
}

#[test]
fn new_with_cancel_keeps_everything() {
    let mut c = dirty_titled("/docs/a.txt", "abc", "d");
    c.store_mut().choices.push_back(Choice::Cancel);

    assert_eq!(c.request_new(), Verdict::Abort);
    assert_eq!(c.surface(), "abcd");
    assert_eq!(c.path(), Some(Path::new("/docs/a.txt")));
    assert!(c.is_dirty());
    assert_eq!(c.store().prompts, vec!["BlockEdit - New file"]);
}

#[test]
fn new_with_discard_resets_state() {
    let mut c = dirty_titled("/docs/a.txt", "abc", "d");
    c.store_mut().choices.push_back(Choice::Discard);

    assert_eq!(c.request_new(), Verdict::Proceed);
    assert_eq!(c.surface(), "");
    assert_eq!(c.state(), &DocumentState::default());
    assert_eq!(c.store().file("/docs/a.txt").as_deref(), Some("abc"));
}

#[test]
fn new_with_save_writes_then_clears() {
    let mut c = dirty_titled("/docs/a.txt", "abc", "d");
    c.store_mut().choices.push_back(Choice::Save);

    assert_eq!(c.request_new(), Verdict::Proceed);
    assert_eq!(c.store().file("/docs/a.txt").as_deref(), Some("abcd"));
    assert_eq!(c.surface(), "");
    assert_eq!(c.path(), None);
}

#[test]
fn save_on_untitled_document_with_cancelled_picker_aborts_new() {
    let mut c = controller();
    type_text(&mut c, "draft");
    c.store_mut().choices.push_back(Choice::Save);
    c.store_mut().save_paths.push_back(None);

    assert_eq!(c.request_new(), Verdict::Abort);
    assert_eq!(c.surface(), "draft");
    assert!(c.is_dirty());
    assert_eq!(c.path(), None);
    assert_eq!(c.store().writes, 0);
}

#[test]
fn open_replaces_content_and_clears_dirty() {
    let mut c = controller();
    type_text(&mut c, "x");
    c.store_mut().put("/docs/b.txt", "from disk");
    c.store_mut().choices.push_back(Choice::Discard);
    c.store_mut().open_paths.push_back(Some(PathBuf::from("/docs/b.txt")));

    assert_eq!(c.request_open(), Verdict::Proceed);
    assert_eq!(c.surface(), "from disk");
    assert_eq!(c.path(), Some(Path::new("/docs/b.txt")));
    assert!(!c.is_dirty());
    assert_eq!(c.title(), "BlockEdit - /docs/b.txt");
}

#[test]
fn open_picker_cancel_changes_nothing() {
    let mut c = dirty_titled("/docs/a.txt", "abc", "d");
    c.store_mut().choices.push_back(Choice::Discard);
    c.store_mut().open_paths.push_back(None);

    c.request_open();
    assert_eq!(c.surface(), "abcd");
    assert_eq!(c.path(), Some(Path::new("/docs/a.txt")));
    assert!(c.is_dirty());
}

#[test]
fn open_read_failure_reports_and_keeps_state() {
    let mut c = dirty_titled("/docs/a.txt", "abc", "d");
    c.store_mut().choices.push_back(Choice::Discard);
    c.store_mut()
        .open_paths
        .push_back(Some(PathBuf::from("/docs/missing.txt")));

    c.request_open();
    assert_eq!(c.surface(), "abcd");
    assert_eq!(c.path(), Some(Path::new("/docs/a.txt")));
    assert!(c.is_dirty());

    let (title, message) = &c.store().errors[0];
    assert_eq!(title, "Open failed");
    assert!(message.starts_with("Could not open the file:\n"));
    assert!(message.contains("/docs/missing.txt"));
}

#[test]
fn open_with_failed_save_never_shows_the_picker() {
    let mut c = dirty_titled("/docs/a.txt", "abc", "d");
    c.store_mut().fail_writes = true;
    c.store_mut().choices.push_back(Choice::Save);

    assert_eq!(c.request_open(), Verdict::Abort);
    assert_eq!(c.store().open_dialogs, 1, "only the initial open");
    assert_eq!(c.surface(), "abcd");
    assert!(c.is_dirty());
    assert_eq!(c.store().errors[0].0, "Save failed");
}

#[test]
fn save_failure_keeps_dirty() {
    let mut c = dirty_titled("/docs/a.txt", "abc", "d");
    c.store_mut().fail_writes = true;

    c.save();
    assert!(c.is_dirty());
    assert!(c.store().statuses.is_empty());
    assert!(c.store().errors[0]
        .1
        .starts_with("Could not save the file:\n/docs/a.txt"));
}

#[test]
fn save_success_flashes_status() {
    let mut c = dirty_titled("/docs/a.txt", "abc", "d");
    c.save();

    assert!(!c.is_dirty());
    assert_eq!(
        c.store().statuses,
        vec![("Saved".to_string(), StatusStyle::Success)]
    );
}

#[test]
fn save_as_sets_path_and_appends_default_extension() {
    let mut c = controller();
    type_text(&mut c, "notes");
    c.store_mut().save_paths.push_back(Some(PathBuf::from("/docs/notes")));

    c.save_as();
    assert_eq!(c.path(), Some(Path::new("/docs/notes.txt")));
    assert!(!c.is_dirty());
    assert_eq!(c.store().file("/docs/notes.txt").as_deref(), Some("notes"));
}

#[test]
fn save_as_failure_keeps_previous_path() {
    let mut c = dirty_titled("/docs/a.txt", "abc", "d");
    c.store_mut().fail_writes = true;
    c.store_mut().save_paths.push_back(Some(PathBuf::from("/ro/b.txt")));

    c.save_as();
    assert_eq!(c.path(), Some(Path::new("/docs/a.txt")));
    assert!(c.is_dirty());
    assert!(c.store().errors[0].1.starts_with("Could not create the file:\n"));
}

#[test]
fn save_as_cancel_changes_nothing() {
    let mut c = dirty_titled("/docs/a.txt", "abc", "d");
    c.store_mut().save_paths.push_back(None);

    c.save_as();
    assert_eq!(c.path(), Some(Path::new("/docs/a.txt")));
    assert!(c.is_dirty());
    assert_eq!(c.surface(), "abcd");
    assert_eq!(c.store().writes, 0);
}

#[test]
fn exit_with_discard_terminates_without_writing() {
    let mut c = dirty_titled("/docs/a.txt", "abc", "d");
    c.store_mut().choices.push_back(Choice::Discard);

    assert_eq!(c.request_exit(), Verdict::Proceed);
    assert!(c.should_exit());
    assert_eq!(c.store().writes, 0);
}

#[test]
fn exit_with_cancel_stays_open() {
    let mut c = dirty_titled("/docs/a.txt", "abc", "d");
    c.store_mut().choices.push_back(Choice::Cancel);

    assert_eq!(c.request_exit(), Verdict::Abort);
    assert!(!c.should_exit());
    assert_eq!(c.store().prompts, vec!["BlockEdit - Exit"]);
}

#[test]
fn exit_with_failed_save_stays_open() {
    let mut c = dirty_titled("/docs/a.txt", "abc", "d");
    c.store_mut().fail_writes = true;
    c.store_mut().choices.push_back(Choice::Save);

    assert_eq!(c.request_exit(), Verdict::Abort);
    assert!(!c.should_exit());
}

#[test]
fn hello_scenario_on_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a.txt");

    let mut c = DocumentController::new(String::new(), ScriptedStore::disk());
    type_text(&mut c, "hello");
    assert!(c.is_dirty());

    c.store_mut().save_paths.push_back(Some(path.clone()));
    c.save_as();
    assert!(!c.is_dirty());
    assert_eq!(c.path(), Some(path.as_path()));

    type_text(&mut c, "!");
    assert!(c.is_dirty());

    c.save();
    assert!(!c.is_dirty());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello!");
    assert_eq!(c.store().save_dialogs, 1);
}

#[test]
fn unwritable_path_on_disk_aborts_open() {
    let dir = tempdir().unwrap();
    let missing_dir = dir.path().join("no-such-dir").join("a.txt");

    let mut c = DocumentController::new(String::new(), ScriptedStore::disk());
    type_text(&mut c, "keep me");
    c.store_mut().choices.push_back(Choice::Save);
    c.store_mut().save_paths.push_back(Some(missing_dir));

    assert_eq!(c.request_open(), Verdict::Abort);
    assert_eq!(c.store().open_dialogs, 0);
    assert_eq!(c.surface(), "keep me");
    assert!(c.is_dirty());
}

#[test]
fn dirty_tracks_edits_since_last_save() {
    let mut c = controller();
    c.store_mut()
        .save_paths
        .push_back(Some(PathBuf::from("/docs/x.txt")));

    for round in 0..3 {
        type_text(&mut c, "ab");
        assert!(c.is_dirty(), "round {round}");
        c.save();
        assert!(!c.is_dirty(), "round {round}");
    }
    assert_eq!(c.store().file("/docs/x.txt").as_deref(), Some("ababab"));
}
