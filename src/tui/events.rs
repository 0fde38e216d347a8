//! Input sources for the main loop and the modal dialogs.
//!
//! Everything that blocks on user input goes through [`EventSource`], so the
//! whole application can be driven from a script in tests.

use super::terminal_guard::TerminationSignal;
use crate::core::event::InputEvent;
use std::collections::VecDeque;
use std::io;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::{Duration, Instant};

pub trait EventSource {
    /// Waits up to `timeout` for the next event. `Ok(None)` means the timeout
    /// elapsed. An error means no more input will ever arrive.
    fn next_event(&mut self, timeout: Duration) -> io::Result<Option<InputEvent>>;
}

/// Slice of the wait spent blocked in `crossterm::event::poll` before the
/// signal channel is checked again.
const SIGNAL_POLL_SLICE: Duration = Duration::from_millis(100);

pub struct CrosstermEvents {
    signals: Option<Receiver<TerminationSignal>>,
}

impl CrosstermEvents {
    pub fn new() -> Self {
        Self { signals: None }
    }

    /// Termination signals arrive as [`InputEvent::CloseRequested`].
    pub fn with_signals(signals: Receiver<TerminationSignal>) -> Self {
        Self {
            signals: Some(signals),
        }
    }

    fn pending_signal(&mut self) -> Option<TerminationSignal> {
        let rx = self.signals.as_ref()?;
        match rx.try_recv() {
            Ok(signal) => Some(signal),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.signals = None;
                None
            }
        }
    }
}

impl Default for CrosstermEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEvents {
    fn next_event(&mut self, timeout: Duration) -> io::Result<Option<InputEvent>> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(signal) = self.pending_signal() {
                tracing::debug!(?signal, "close requested by signal");
                return Ok(Some(InputEvent::CloseRequested));
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            let slice = if self.signals.is_some() {
                remaining.min(SIGNAL_POLL_SLICE)
            } else {
                remaining
            };
            if crossterm::event::poll(slice)? {
                return Ok(Some(crossterm::event::read()?.into()));
            }
            if Instant::now() >= deadline {
                return Ok(None);
            }
        }
    }
}

/// Replays a fixed list of events. Once the list runs out every call fails
/// with `UnexpectedEof`, which dialogs treat as a cancel and the main loop
/// treats as the end of the session.
#[derive(Debug, Default)]
pub struct ScriptedEvents {
    queue: VecDeque<InputEvent>,
}

impl ScriptedEvents {
    pub fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            queue: events.into_iter().collect(),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.queue.push_back(event);
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl EventSource for ScriptedEvents {
    fn next_event(&mut self, _timeout: Duration) -> io::Result<Option<InputEvent>> {
        match self.queue.pop_front() {
            Some(event) => Ok(Some(event)),
            None => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "scripted events exhausted",
            )),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tui/events.rs"]
mod tests;
