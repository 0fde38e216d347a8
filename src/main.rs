use blockedit::app::{Notepad, TerminalHost, UiTheme};
use blockedit::kernel::services::adapters::{
    ensure_settings_file, load_settings_from, KeybindingService,
};
use blockedit::kernel::services::ports::Settings;
use blockedit::tui::{install_termination_signals, CrosstermEvents, TerminalGuard};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::path::PathBuf;
use std::sync::mpsc;

mod logging;

const USAGE: &str = "usage: blockedit [PATH]";

fn parse_args() -> Result<Option<PathBuf>, String> {
    let mut path = None;
    for arg in std::env::args_os().skip(1) {
        match arg.to_str() {
            Some("-h") | Some("--help") => return Err(USAGE.to_string()),
            Some("-V") | Some("--version") => {
                return Err(format!("blockedit {}", env!("CARGO_PKG_VERSION")))
            }
            _ if path.is_none() => path = Some(PathBuf::from(arg.clone())),
            _ => return Err(USAGE.to_string()),
        }
    }
    Ok(path)
}

fn load_settings() -> Settings {
    match ensure_settings_file() {
        Ok(path) => {
            tracing::info!(path = %path.display(), "settings");
            load_settings_from(&path)
        }
        Err(error) => {
            tracing::warn!(error = %error, "settings unavailable, using defaults");
            Settings::default()
        }
    }
}

fn main() -> io::Result<()> {
    let startup_path = match parse_args() {
        Ok(path) => path,
        Err(message) => {
            println!("{message}");
            return Ok(());
        }
    };

    let _logging = logging::init();
    let settings = load_settings();

    let mut theme = UiTheme::from_settings(&settings.theme);
    theme.adapt_to_terminal_capabilities();
    let keybindings = KeybindingService::with_rules(&settings.keybindings);

    let guard = TerminalGuard::new()?;
    guard.install_panic_hook();

    let (signal_tx, signal_rx) = mpsc::channel();
    let events = match install_termination_signals(signal_tx) {
        Ok(_) => CrosstermEvents::with_signals(signal_rx),
        Err(error) => {
            tracing::warn!(error = %error, "signal handlers not installed");
            CrosstermEvents::new()
        }
    };

    let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    let host = TerminalHost::new(terminal, events, theme);
    let mut app = Notepad::new(host, keybindings, &settings.editor);

    if let Some(path) = startup_path.as_deref() {
        app.render()?;
        app.open_startup(path);
    }

    let result = app.run();
    drop(guard);

    if let Err(error) = &result {
        tracing::error!(error = %error, "terminal error");
    }
    tracing::info!("exit");
    result
}
