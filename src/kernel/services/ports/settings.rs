use super::config::EditorConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub keybindings: Vec<KeybindingRule>,
    #[serde(default)]
    pub theme: ThemeSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeybindingRule {
    pub key: String,
    pub command: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_fg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_bg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_fg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_bg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_selected_fg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_selected_bg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_fg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_bg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_fg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_fg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialog_border: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialog_bg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialog_fg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent_fg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muted_fg: Option<String>,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            title_fg: Some("white".to_string()),
            title_bg: Some("#2c3e50".to_string()),
            menu_fg: Some("white".to_string()),
            menu_bg: Some("dark_gray".to_string()),
            menu_selected_fg: Some("black".to_string()),
            menu_selected_bg: Some("cyan".to_string()),
            status_fg: Some("#bdc3c7".to_string()),
            status_bg: Some("#2c3e50".to_string()),
            success_fg: Some("#2ecc71".to_string()),
            error_fg: Some("light_red".to_string()),
            dialog_border: Some("cyan".to_string()),
            dialog_bg: None,
            dialog_fg: Some("white".to_string()),
            accent_fg: Some("yellow".to_string()),
            muted_fg: Some("dark_gray".to_string()),
        }
    }
}
