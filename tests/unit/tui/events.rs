use super::*;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::mpsc;

#[test]
fn scripted_events_replay_in_order_then_fail() {
    let mut events = ScriptedEvents::new([
        InputEvent::Key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE)),
        InputEvent::Paste("xyz".to_string()),
    ]);
    assert_eq!(events.remaining(), 2);

    let first = events.next_event(Duration::ZERO).unwrap();
    assert!(matches!(first, Some(InputEvent::Key(k)) if k.code == KeyCode::Char('a')));

    let second = events.next_event(Duration::ZERO).unwrap();
    assert!(matches!(second, Some(InputEvent::Paste(ref s)) if s == "xyz"));

    let err = events.next_event(Duration::ZERO).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
}

#[test]
fn scripted_events_accept_pushes() {
    let mut events = ScriptedEvents::default();
    events.push(InputEvent::CloseRequested);
    assert!(matches!(
        events.next_event(Duration::ZERO).unwrap(),
        Some(InputEvent::CloseRequested)
    ));
}

#[test]
fn pending_signal_becomes_close_request() {
    let (tx, rx) = mpsc::channel();
    let mut events = CrosstermEvents::with_signals(rx);
    tx.send(TerminationSignal::SigTerm).unwrap();

    assert_eq!(events.pending_signal(), Some(TerminationSignal::SigTerm));
    assert_eq!(events.pending_signal(), None);
}

#[test]
fn disconnected_signal_channel_is_dropped() {
    let (tx, rx) = mpsc::channel::<TerminationSignal>();
    let mut events = CrosstermEvents::with_signals(rx);
    drop(tx);

    assert_eq!(events.pending_signal(), None);
    assert!(events.signals.is_none());
}
