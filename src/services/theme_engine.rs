//! Theme state: light/dark mode and the palettes each mode applies.

use std::collections::HashMap;

use crate::chrome::Chrome;
use crate::types::theme::{Palette, ThemeMode};

/// Fusion-style dark colors.
struct DarkPalette;
impl DarkPalette {
    const WINDOW: &'static str = "#1e1e1e";
    const WINDOW_TEXT: &'static str = "#ffffff";
    const BASE: &'static str = "#191919";
    const ALTERNATE_BASE: &'static str = "#353535";
    const TOOLTIP_BASE: &'static str = "#ffffff";
    const TOOLTIP_TEXT: &'static str = "#ffffff";
    const TEXT: &'static str = "#ffffff";
    const BUTTON: &'static str = "#2d2d2d";
    const BUTTON_TEXT: &'static str = "#ffffff";
    const BRIGHT_TEXT: &'static str = "#ff0000";
    const LINK: &'static str = "#2a82da";
    const HIGHLIGHT: &'static str = "#2a82da";
    const HIGHLIGHTED_TEXT: &'static str = "#000000";
}

/// Fusion standard light colors.
struct LightPalette;
impl LightPalette {
    const WINDOW: &'static str = "#efefef";
    const WINDOW_TEXT: &'static str = "#000000";
    const BASE: &'static str = "#ffffff";
    const ALTERNATE_BASE: &'static str = "#f7f7f7";
    const TOOLTIP_BASE: &'static str = "#ffffdc";
    const TOOLTIP_TEXT: &'static str = "#000000";
    const TEXT: &'static str = "#000000";
    const BUTTON: &'static str = "#efefef";
    const BUTTON_TEXT: &'static str = "#000000";
    const BRIGHT_TEXT: &'static str = "#ffffff";
    const LINK: &'static str = "#0000ff";
    const HIGHLIGHT: &'static str = "#308cc6";
    const HIGHLIGHTED_TEXT: &'static str = "#ffffff";
}

pub fn dark_palette() -> Palette {
    Palette {
        window: DarkPalette::WINDOW.into(),
        window_text: DarkPalette::WINDOW_TEXT.into(),
        base: DarkPalette::BASE.into(),
        alternate_base: DarkPalette::ALTERNATE_BASE.into(),
        tooltip_base: DarkPalette::TOOLTIP_BASE.into(),
        tooltip_text: DarkPalette::TOOLTIP_TEXT.into(),
        text: DarkPalette::TEXT.into(),
        button: DarkPalette::BUTTON.into(),
        button_text: DarkPalette::BUTTON_TEXT.into(),
        bright_text: DarkPalette::BRIGHT_TEXT.into(),
        link: DarkPalette::LINK.into(),
        highlight: DarkPalette::HIGHLIGHT.into(),
        highlighted_text: DarkPalette::HIGHLIGHTED_TEXT.into(),
    }
}

pub fn light_palette() -> Palette {
    Palette {
        window: LightPalette::WINDOW.into(),
        window_text: LightPalette::WINDOW_TEXT.into(),
        base: LightPalette::BASE.into(),
        alternate_base: LightPalette::ALTERNATE_BASE.into(),
        tooltip_base: LightPalette::TOOLTIP_BASE.into(),
        tooltip_text: LightPalette::TOOLTIP_TEXT.into(),
        text: LightPalette::TEXT.into(),
        button: LightPalette::BUTTON.into(),
        button_text: LightPalette::BUTTON_TEXT.into(),
        bright_text: LightPalette::BRIGHT_TEXT.into(),
        link: LightPalette::LINK.into(),
        highlight: LightPalette::HIGHLIGHT.into(),
        highlighted_text: LightPalette::HIGHLIGHTED_TEXT.into(),
    }
}

pub fn apply_dark_theme<C: Chrome + ?Sized>(chrome: &mut C) {
    chrome.apply_palette(&dark_palette());
}

pub fn apply_light_theme<C: Chrome + ?Sized>(chrome: &mut C) {
    chrome.apply_palette(&light_palette());
}

/// Current theme. Owned by the window controller and replaced on toggle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct ThemeState {
    mode: ThemeMode,
}

impl ThemeState {
    pub fn new(mode: ThemeMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn is_dark(&self) -> bool {
        self.mode == ThemeMode::Dark
    }

    /// Returns the opposite state.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self.mode {
            ThemeMode::Light => Self::new(ThemeMode::Dark),
            ThemeMode::Dark => Self::new(ThemeMode::Light),
        }
    }

    pub fn palette(&self) -> Palette {
        match self.mode {
            ThemeMode::Light => light_palette(),
            ThemeMode::Dark => dark_palette(),
        }
    }

    /// Applies this state's palette to the chrome.
    pub fn apply<C: Chrome + ?Sized>(&self, chrome: &mut C) {
        match self.mode {
            ThemeMode::Light => apply_light_theme(chrome),
            ThemeMode::Dark => apply_dark_theme(chrome),
        }
    }

    /// CSS custom properties for HTML-rendered chrome.
    pub fn css_variables(&self) -> HashMap<String, String> {
        css_variables(&self.palette())
    }
}

/// Maps palette roles to CSS custom properties.
pub fn css_variables(p: &Palette) -> HashMap<String, String> {
    let mut vars = HashMap::new();
    vars.insert("--window".into(), p.window.clone());
    vars.insert("--window-text".into(), p.window_text.clone());
    vars.insert("--base".into(), p.base.clone());
    vars.insert("--alternate-base".into(), p.alternate_base.clone());
    vars.insert("--text".into(), p.text.clone());
    vars.insert("--button".into(), p.button.clone());
    vars.insert("--button-text".into(), p.button_text.clone());
    vars.insert("--link".into(), p.link.clone());
    vars.insert("--highlight".into(), p.highlight.clone());
    vars.insert("--highlighted-text".into(), p.highlighted_text.clone());
    vars
}
