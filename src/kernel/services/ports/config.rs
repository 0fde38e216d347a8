use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub tab_size: u8,
    pub status_duration_ms: u64,
    pub default_extension: String,
    pub show_line_numbers: bool,
    pub scroll_lines: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_size: 4,
            status_duration_ms: 3000,
            default_extension: "txt".to_string(),
            show_line_numbers: false,
            scroll_lines: 3,
        }
    }
}

impl EditorConfig {
    pub fn status_duration(&self) -> Duration {
        Duration::from_millis(self.status_duration_ms)
    }

    pub fn scroll_step(&self) -> usize {
        self.scroll_lines.max(1)
    }

    pub fn tab_width(&self) -> usize {
        usize::from(self.tab_size.max(1))
    }
}
