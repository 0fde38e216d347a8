//! Status line with a single deferred revert.
//!
//! A transient message replaces the default text until its deadline passes.
//! Only one revert is ever pending: showing a new message cancels the previous
//! one first, so an older deadline can never clear a newer message.

use std::time::{Duration, Instant};

pub const DEFAULT_STATUS: &str = "Ready";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusStyle {
    #[default]
    Normal,
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle(u64);

/// One-shot deadline timer polled by the event loop.
#[derive(Debug, Default)]
pub struct RevertTimer {
    next_id: u64,
    pending: Option<(TimerHandle, Instant)>,
}

impl RevertTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels whatever was pending, then arms a new deadline.
    pub fn schedule(&mut self, deadline: Instant) -> TimerHandle {
        self.cancel();
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.pending = Some((handle, deadline));
        handle
    }

    pub fn cancel(&mut self) -> Option<TimerHandle> {
        self.pending.take().map(|(handle, _)| handle)
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        matches!(self.pending, Some((h, _)) if h == handle)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|(_, deadline)| deadline)
    }

    /// Disarms and returns the pending handle if its deadline is due.
    pub fn fire_due(&mut self, now: Instant) -> Option<TimerHandle> {
        match self.pending {
            Some((handle, deadline)) if now >= deadline => {
                self.pending = None;
                Some(handle)
            }
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct StatusLine {
    message: String,
    style: StatusStyle,
    revert: RevertTimer,
}

impl StatusLine {
    pub fn new() -> Self {
        Self {
            message: DEFAULT_STATUS.to_string(),
            style: StatusStyle::Normal,
            revert: RevertTimer::new(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn style(&self) -> StatusStyle {
        self.style
    }

    pub fn revert_deadline(&self) -> Option<Instant> {
        self.revert.deadline()
    }

    pub fn show(&mut self, message: &str, style: StatusStyle, duration: Duration) -> TimerHandle {
        self.show_at(message, style, duration, Instant::now())
    }

    pub fn show_at(
        &mut self,
        message: &str,
        style: StatusStyle,
        duration: Duration,
        now: Instant,
    ) -> TimerHandle {
        if let Some(previous) = self.revert.cancel() {
            tracing::debug!(?previous, "status revert cancelled");
        }
        self.message = message.to_string();
        self.style = style;
        self.revert.schedule(now + duration)
    }

    /// Restores the default text once the pending deadline has passed.
    /// Returns true when the line changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.revert.fire_due(now).is_none() {
            return false;
        }
        self.message = DEFAULT_STATUS.to_string();
        self.style = StatusStyle::Normal;
        true
    }
}

impl Default for StatusLine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/status.rs"]
mod tests;
