//! Raw mode / alternate screen lifetime and termination signals.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::JoinHandle;

pub trait TerminalOps: Send + Sync + 'static {
    fn setup(&self) -> io::Result<()>;
    fn restore(&self) -> io::Result<()>;
}

/// Terminal features switched on for the session and off again on restore.
#[derive(Debug, Clone, Copy)]
pub struct CrosstermTerminalOps {
    pub mouse_capture: bool,
    pub bracketed_paste: bool,
}

impl Default for CrosstermTerminalOps {
    fn default() -> Self {
        Self {
            mouse_capture: true,
            bracketed_paste: true,
        }
    }
}

impl TerminalOps for CrosstermTerminalOps {
    fn setup(&self) -> io::Result<()> {
        use crossterm::cursor::SetCursorStyle;
        use crossterm::event::{EnableBracketedPaste, EnableMouseCapture};
        use crossterm::queue;
        use crossterm::terminal::{enable_raw_mode, EnterAlternateScreen};
        use io::Write;

        enable_raw_mode()?;
        let mut out = io::stdout();
        queue!(out, EnterAlternateScreen, SetCursorStyle::BlinkingBar)?;
        if self.mouse_capture {
            queue!(out, EnableMouseCapture)?;
        }
        if self.bracketed_paste {
            queue!(out, EnableBracketedPaste)?;
        }
        out.flush()
    }

    fn restore(&self) -> io::Result<()> {
        use crossterm::cursor::SetCursorStyle;
        use crossterm::event::{DisableBracketedPaste, DisableMouseCapture};
        use crossterm::execute;
        use crossterm::terminal::{disable_raw_mode, LeaveAlternateScreen};

        let mut out = io::stdout();
        // Every step runs; the first failure is reported.
        let steps = [
            disable_raw_mode(),
            if self.bracketed_paste {
                execute!(out, DisableBracketedPaste)
            } else {
                Ok(())
            },
            if self.mouse_capture {
                execute!(out, DisableMouseCapture)
            } else {
                Ok(())
            },
            execute!(out, LeaveAlternateScreen, SetCursorStyle::DefaultUserShape),
        ];
        steps.into_iter().collect()
    }
}

/// Cloneable handle that restores the terminal at most once, whoever gets
/// there first: the guard's drop, the panic hook or an explicit call.
#[derive(Clone)]
pub struct TerminalRestorer {
    done: Arc<AtomicBool>,
    ops: Arc<dyn TerminalOps>,
}

impl TerminalRestorer {
    pub fn restore(&self) -> io::Result<()> {
        if self.done.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        self.ops.restore()
    }

    pub fn is_restored(&self) -> bool {
        self.done.load(Ordering::SeqCst)
    }
}

pub struct TerminalGuard {
    restorer: TerminalRestorer,
}

impl TerminalGuard {
    pub fn new() -> io::Result<Self> {
        Self::with_ops(Arc::new(CrosstermTerminalOps::default()))
    }

    /// Runs `setup`; nothing is restored if it fails.
    pub fn with_ops(ops: Arc<dyn TerminalOps>) -> io::Result<Self> {
        ops.setup()?;
        Ok(Self {
            restorer: TerminalRestorer {
                done: Arc::new(AtomicBool::new(false)),
                ops,
            },
        })
    }

    pub fn restorer(&self) -> TerminalRestorer {
        self.restorer.clone()
    }

    /// Chains a panic hook that puts the terminal back before the previous
    /// hook prints, so the message lands on the normal screen.
    pub fn install_panic_hook(&self) {
        let restorer = self.restorer();
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = restorer.restore();
            previous(info);
        }));
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(error) = self.restorer.restore() {
            tracing::warn!(error = %error, "terminal restore failed");
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationSignal {
    SigInt,
    SigTerm,
    SigHup,
}

/// Forwards SIGINT/SIGTERM/SIGHUP to `tx`. The process is never killed from
/// here: the main loop turns each signal into a close request so unsaved
/// work still goes through the exit prompt.
#[cfg(unix)]
pub fn install_termination_signals(tx: Sender<TerminationSignal>) -> io::Result<JoinHandle<()>> {
    use signal_hook::consts::signal::{SIGHUP, SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;

    let mut signals = Signals::new([SIGINT, SIGTERM, SIGHUP])?;
    Ok(std::thread::spawn(move || {
        for raw in signals.forever() {
            let signal = match raw {
                SIGINT => TerminationSignal::SigInt,
                SIGTERM => TerminationSignal::SigTerm,
                SIGHUP => TerminationSignal::SigHup,
                _ => continue,
            };
            tracing::info!(?signal, "termination signal");
            if tx.send(signal).is_err() {
                break;
            }
        }
    }))
}

#[cfg(not(unix))]
pub fn install_termination_signals(_tx: Sender<TerminationSignal>) -> io::Result<JoinHandle<()>> {
    Ok(std::thread::spawn(|| {}))
}

#[cfg(test)]
#[path = "../../tests/unit/tui/terminal_guard.rs"]
mod tests;
