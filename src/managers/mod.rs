// GenBrowser state managers
// Managers handle stateful operations: tabs, navigation chrome, downloads, shortcuts.

pub mod download_manager;
pub mod navigation;
pub mod shortcut_manager;
pub mod tab_manager;
