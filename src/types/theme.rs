use serde::{Deserialize, Serialize};

/// Light or dark appearance.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

/// Color roles applied to the window chrome. Values are `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub window: String,
    pub window_text: String,
    pub base: String,
    pub alternate_base: String,
    pub tooltip_base: String,
    pub tooltip_text: String,
    pub text: String,
    pub button: String,
    pub button_text: String,
    pub bright_text: String,
    pub link: String,
    pub highlight: String,
    pub highlighted_text: String,
}
