//! UI 主题：把可配置的颜色集中管理，避免散落在渲染代码里。

use crate::kernel::services::ports::ThemeSettings;
use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct UiTheme {
    pub title_fg: Color,
    pub title_bg: Color,
    pub menu_fg: Color,
    pub menu_bg: Color,
    pub menu_selected_fg: Color,
    pub menu_selected_bg: Color,
    pub status_fg: Color,
    pub status_bg: Color,
    pub success_fg: Color,
    pub error_fg: Color,
    pub dialog_border: Color,
    pub dialog_bg: Color,
    pub dialog_fg: Color,
    pub accent_fg: Color,
    pub muted_fg: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalColorSupport {
    TrueColor,
    Ansi256,
    Ansi16,
}

pub fn detect_terminal_color_support() -> TerminalColorSupport {
    if let Ok(value) = std::env::var("BLOCKEDIT_COLOR_SUPPORT") {
        match value.trim().to_ascii_lowercase().as_str() {
            "truecolor" | "24bit" | "rgb" => return TerminalColorSupport::TrueColor,
            "256" | "ansi256" => return TerminalColorSupport::Ansi256,
            "16" | "ansi16" | "basic" => return TerminalColorSupport::Ansi16,
            _ => {}
        }
    }

    let colorterm = std::env::var("COLORTERM")
        .unwrap_or_default()
        .to_ascii_lowercase();
    let term = std::env::var("TERM")
        .unwrap_or_default()
        .to_ascii_lowercase();
    if colorterm.contains("truecolor") || colorterm.contains("24bit") || term.contains("direct")
    {
        return TerminalColorSupport::TrueColor;
    }
    if term.contains("256color") {
        return TerminalColorSupport::Ansi256;
    }
    TerminalColorSupport::Ansi16
}

impl Default for UiTheme {
    fn default() -> Self {
        Self::from_settings(&ThemeSettings::default())
    }
}

impl UiTheme {
    /// Fallbacks for any entry that is missing or does not parse.
    fn base() -> Self {
        Self {
            title_fg: Color::Indexed(15),
            title_bg: Color::Indexed(4),
            menu_fg: Color::Indexed(15),
            menu_bg: Color::Indexed(8),
            menu_selected_fg: Color::Indexed(0),
            menu_selected_bg: Color::Indexed(6),
            status_fg: Color::Indexed(7),
            status_bg: Color::Indexed(4),
            success_fg: Color::Indexed(10),
            error_fg: Color::Indexed(9),
            dialog_border: Color::Indexed(6),
            dialog_bg: Color::Reset,
            dialog_fg: Color::Indexed(15),
            accent_fg: Color::Indexed(3),
            muted_fg: Color::Indexed(8),
        }
    }

    pub fn from_settings(settings: &ThemeSettings) -> Self {
        let mut theme = Self::base();
        theme.apply_settings(settings);
        theme
    }

    pub fn apply_settings(&mut self, settings: &ThemeSettings) {
        let entries: [(&Option<String>, &mut Color); 15] = [
            (&settings.title_fg, &mut self.title_fg),
            (&settings.title_bg, &mut self.title_bg),
            (&settings.menu_fg, &mut self.menu_fg),
            (&settings.menu_bg, &mut self.menu_bg),
            (&settings.menu_selected_fg, &mut self.menu_selected_fg),
            (&settings.menu_selected_bg, &mut self.menu_selected_bg),
            (&settings.status_fg, &mut self.status_fg),
            (&settings.status_bg, &mut self.status_bg),
            (&settings.success_fg, &mut self.success_fg),
            (&settings.error_fg, &mut self.error_fg),
            (&settings.dialog_border, &mut self.dialog_border),
            (&settings.dialog_bg, &mut self.dialog_bg),
            (&settings.dialog_fg, &mut self.dialog_fg),
            (&settings.accent_fg, &mut self.accent_fg),
            (&settings.muted_fg, &mut self.muted_fg),
        ];
        for (value, slot) in entries {
            let Some(value) = value else {
                continue;
            };
            match parse_color(value) {
                Some(color) => *slot = color,
                None => tracing::warn!(value = %value, "invalid theme color"),
            }
        }
    }

    pub fn adapt_to_terminal_capabilities(&mut self) {
        self.apply_color_support(detect_terminal_color_support());
    }

    fn apply_color_support(&mut self, support: TerminalColorSupport) {
        if support == TerminalColorSupport::TrueColor {
            return;
        }
        for slot in [
            &mut self.title_fg,
            &mut self.title_bg,
            &mut self.menu_fg,
            &mut self.menu_bg,
            &mut self.menu_selected_fg,
            &mut self.menu_selected_bg,
            &mut self.status_fg,
            &mut self.status_bg,
            &mut self.success_fg,
            &mut self.error_fg,
            &mut self.dialog_border,
            &mut self.dialog_bg,
            &mut self.dialog_fg,
            &mut self.accent_fg,
            &mut self.muted_fg,
        ] {
            *slot = map_color_for_support(*slot, support);
        }
    }
}

fn map_color_for_support(color: Color, support: TerminalColorSupport) -> Color {
    match (support, color) {
        (TerminalColorSupport::TrueColor, value) => value,
        (TerminalColorSupport::Ansi256, Color::Rgb(r, g, b)) => {
            Color::Indexed(rgb_to_ansi256_index(r, g, b))
        }
        (TerminalColorSupport::Ansi16, Color::Rgb(r, g, b)) => {
            Color::Indexed(nearest_ansi16(r, g, b))
        }
        (TerminalColorSupport::Ansi16, Color::Indexed(i)) if i > 15 => {
            let (r, g, b) = ansi256_index_to_rgb(i);
            Color::Indexed(nearest_ansi16(r, g, b))
        }
        (_, value) => value,
    }
}

const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

fn rgb_to_ansi256_index(r: u8, g: u8, b: u8) -> u8 {
    let mut best_index = 16u8;
    let mut best_distance = u32::MAX;
    for index in 16u8..=255 {
        let (pr, pg, pb) = ansi256_index_to_rgb(index);
        let distance = color_distance_sq((r, g, b), (pr, pg, pb));
        if distance < best_distance {
            best_distance = distance;
            best_index = index;
        }
    }
    best_index
}

fn nearest_ansi16(r: u8, g: u8, b: u8) -> u8 {
    let mut best_index = 0u8;
    let mut best_distance = u32::MAX;
    for (index, rgb) in ANSI16_RGB.iter().copied().enumerate() {
        let distance = color_distance_sq((r, g, b), rgb);
        if distance < best_distance {
            best_distance = distance;
            best_index = index as u8;
        }
    }
    best_index
}

fn ansi256_index_to_rgb(index: u8) -> (u8, u8, u8) {
    if index <= 15 {
        return ANSI16_RGB[index as usize];
    }
    if index <= 231 {
        let offset = index - 16;
        return (
            CUBE_LEVELS[(offset / 36) as usize],
            CUBE_LEVELS[((offset / 6) % 6) as usize],
            CUBE_LEVELS[(offset % 6) as usize],
        );
    }
    let gray = 8 + (index - 232) * 10;
    (gray, gray, gray)
}

fn color_distance_sq(a: (u8, u8, u8), b: (u8, u8, u8)) -> u32 {
    let dr = i32::from(a.0) - i32::from(b.0);
    let dg = i32::from(a.1) - i32::from(b.1);
    let db = i32::from(a.2) - i32::from(b.2);
    (dr * dr + dg * dg + db * db) as u32
}

const ANSI16_RGB: [(u8, u8, u8); 16] = [
    (0, 0, 0),
    (205, 0, 0),
    (0, 205, 0),
    (205, 205, 0),
    (0, 0, 238),
    (205, 0, 205),
    (0, 205, 205),
    (229, 229, 229),
    (127, 127, 127),
    (255, 0, 0),
    (0, 255, 0),
    (255, 255, 0),
    (92, 92, 255),
    (255, 0, 255),
    (0, 255, 255),
    (255, 255, 255),
];

/// `#rrggbb` or a named ANSI color (`red`, `dark_gray`, `light_cyan`, ...).
pub fn parse_color(value: &str) -> Option<Color> {
    let v = value.trim();
    if v.is_empty() {
        return None;
    }

    if let Some(hex) = v.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        return Some(Color::Rgb(r, g, b));
    }

    let c = match v.to_ascii_lowercase().as_str() {
        "reset" | "default" => Color::Reset,
        "black" => Color::Indexed(0),
        "red" => Color::Indexed(1),
        "green" => Color::Indexed(2),
        "yellow" => Color::Indexed(3),
        "blue" => Color::Indexed(4),
        "magenta" => Color::Indexed(5),
        "cyan" => Color::Indexed(6),
        "gray" | "grey" => Color::Indexed(7),
        "dark_gray" | "dark_grey" => Color::Indexed(8),
        "light_red" => Color::Indexed(9),
        "light_green" => Color::Indexed(10),
        "light_yellow" => Color::Indexed(11),
        "light_blue" => Color::Indexed(12),
        "light_magenta" => Color::Indexed(13),
        "light_cyan" => Color::Indexed(14),
        "white" => Color::Indexed(15),
        _ => return None,
    };
    Some(c)
}
