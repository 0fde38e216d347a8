//! TUI integration layer (crossterm).
//!
//! Terminal setup/teardown and the event source. Kept apart from `kernel`/`models`
//! so the document core does not depend on terminal crates.

pub mod events;
pub mod terminal_guard;

pub use events::{CrosstermEvents, EventSource, ScriptedEvents};
pub use terminal_guard::{install_termination_signals, TerminalGuard, TerminationSignal};
