use super::*;
use std::sync::Mutex;

#[derive(Default)]
struct RecordingOps {
    log: Mutex<Vec<&'static str>>,
    fail_setup: bool,
    fail_restore: bool,
}

impl RecordingOps {
    fn log(&self) -> Vec<&'static str> {
        self.log.lock().unwrap().clone()
    }
}

impl TerminalOps for RecordingOps {
    fn setup(&self) -> io::Result<()> {
        self.log.lock().unwrap().push("setup");
        if self.fail_setup {
            return Err(io::Error::new(io::ErrorKind::Other, "no tty"));
        }
        Ok(())
    }

    fn restore(&self) -> io::Result<()> {
        self.log.lock().unwrap().push("restore");
        if self.fail_restore {
            return Err(io::Error::new(io::ErrorKind::Other, "gone"));
        }
        Ok(())
    }
}

#[test]
fn drop_restores_once() {
    let ops = Arc::new(RecordingOps::default());
    let restorer = {
        let guard = TerminalGuard::with_ops(ops.clone()).unwrap();
        guard.restorer()
    };

    assert!(restorer.is_restored());
    restorer.restore().unwrap();
    assert_eq!(ops.log(), ["setup", "restore"]);
}

#[test]
fn explicit_restore_wins_over_drop() {
    let ops = Arc::new(RecordingOps::default());
    let guard = TerminalGuard::with_ops(ops.clone()).unwrap();
    let first = guard.restorer();
    let second = guard.restorer();
    assert!(!first.is_restored());

    first.restore().unwrap();
    second.restore().unwrap();
    drop(guard);
    assert_eq!(ops.log(), ["setup", "restore"]);
}

#[test]
fn failed_setup_yields_no_guard() {
    let ops = Arc::new(RecordingOps {
        fail_setup: true,
        ..RecordingOps::default()
    });
    assert!(TerminalGuard::with_ops(ops.clone()).is_err());
    assert_eq!(ops.log(), ["setup"]);
}

#[test]
fn restore_error_is_reported_once() {
    let ops = Arc::new(RecordingOps {
        fail_restore: true,
        ..RecordingOps::default()
    });
    let guard = TerminalGuard::with_ops(ops.clone()).unwrap();
    let restorer = guard.restorer();

    assert!(restorer.restore().is_err());
    assert!(restorer.restore().is_ok());
    drop(guard);
    assert_eq!(ops.log(), ["setup", "restore"]);
}
