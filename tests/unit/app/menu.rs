use super::*;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::Terminal;

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

fn draw(menu: &mut MenuBar) -> Buffer {
    let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
    let theme = UiTheme::default();
    let keys = KeybindingService::new();
    terminal
        .draw(|frame| {
            let area = frame.area();
            menu.render_bar(frame, Rect::new(0, 1, area.width, 1), &theme);
            menu.render_popup(frame, area, &theme, &keys);
        })
        .unwrap();
    terminal.backend().buffer().clone()
}

fn row_text(buf: &Buffer, y: u16) -> String {
    (0..buf.area.width)
        .map(|x| buf[(x, y)].symbol().to_string())
        .collect()
}

#[test]
fn closed_menu_ignores_keys() {
    let mut menu = MenuBar::new();
    assert_eq!(
        menu.handle_key(&Key::simple(KeyCode::Down)),
        MenuOutcome::Ignored
    );
}

#[test]
fn arrows_skip_the_separator() {
    let mut menu = MenuBar::new();
    menu.open();
    for _ in 0..3 {
        menu.handle_key(&Key::simple(KeyCode::Down));
    }
    assert_eq!(menu.selected(), 3);

    menu.handle_key(&Key::simple(KeyCode::Down));
    assert_eq!(menu.selected(), 5);
    menu.handle_key(&Key::simple(KeyCode::Down));
    assert_eq!(menu.selected(), 0);
    menu.handle_key(&Key::simple(KeyCode::Up));
    assert_eq!(menu.selected(), 5);
    menu.handle_key(&Key::simple(KeyCode::Up));
    assert_eq!(menu.selected(), 3);
}

#[test]
fn enter_activates_and_closes() {
    let mut menu = MenuBar::new();
    menu.open();
    menu.handle_key(&Key::simple(KeyCode::Down));
    assert_eq!(
        menu.handle_key(&Key::simple(KeyCode::Enter)),
        MenuOutcome::Activate(Command::OpenFile)
    );
    assert!(!menu.is_open());
}

#[test]
fn mnemonics_activate_items() {
    let mut menu = MenuBar::new();
    menu.open();
    assert_eq!(
        menu.handle_key(&Key::simple(KeyCode::Char('a'))),
        MenuOutcome::Activate(Command::SaveAs)
    );

    menu.open();
    assert_eq!(
        menu.handle_key(&Key::simple(KeyCode::Char('x'))),
        MenuOutcome::Activate(Command::Quit)
    );

    menu.open();
    assert_eq!(
        menu.handle_key(&Key::simple(KeyCode::Char('q'))),
        MenuOutcome::Consumed
    );
    assert!(menu.is_open());
}

#[test]
fn escape_and_f10_close() {
    let mut menu = MenuBar::new();
    menu.open();
    assert_eq!(
        menu.handle_key(&Key::simple(KeyCode::Esc)),
        MenuOutcome::Consumed
    );
    assert!(!menu.is_open());

    menu.open();
    menu.handle_key(&Key::simple(KeyCode::F(10)));
    assert!(!menu.is_open());

    menu.open();
    menu.handle_key(&Key::alt(KeyCode::Char('f')));
    assert!(!menu.is_open());
}

#[test]
fn renders_items_with_shortcuts() {
    let mut menu = MenuBar::new();
    menu.open();
    let buf = draw(&mut menu);

    assert!(row_text(&buf, 1).starts_with(" File "));
    let items: Vec<String> = (3..9).map(|y| row_text(&buf, y)).collect();
    assert!(items[0].contains("▸ New"));
    assert!(items[0].contains("Ctrl+N"));
    assert!(items[3].contains("Save As..."));
    assert!(items[3].contains("Ctrl+Shift+S"));
    assert!(items[4].contains("─"));
    assert!(items[5].contains("Exit"));
    assert!(items[5].contains("Ctrl+Q"));
}

#[test]
fn mouse_opens_selects_and_activates() {
    let mut menu = MenuBar::new();
    draw(&mut menu);

    assert_eq!(
        menu.handle_mouse(&mouse(MouseEventKind::Down(MouseButton::Left), 10, 5)),
        MenuOutcome::Ignored
    );
    assert_eq!(
        menu.handle_mouse(&mouse(MouseEventKind::Down(MouseButton::Left), 2, 1)),
        MenuOutcome::Consumed
    );
    assert!(menu.is_open());
    draw(&mut menu);

    // Rows: border at 2, items from 3.
    menu.handle_mouse(&mouse(MouseEventKind::Moved, 3, 5));
    assert_eq!(menu.selected(), 2);
    menu.handle_mouse(&mouse(MouseEventKind::Moved, 3, 7));
    assert_eq!(menu.selected(), 2);

    assert_eq!(
        menu.handle_mouse(&mouse(MouseEventKind::Down(MouseButton::Left), 3, 5)),
        MenuOutcome::Activate(Command::Save)
    );
    assert!(!menu.is_open());
}

#[test]
fn click_outside_closes() {
    let mut menu = MenuBar::new();
    menu.open();
    draw(&mut menu);

    assert_eq!(
        menu.handle_mouse(&mouse(MouseEventKind::Down(MouseButton::Left), 39, 11)),
        MenuOutcome::Consumed
    );
    assert!(!menu.is_open());
}
