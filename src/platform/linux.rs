// GenBrowser platform paths for Linux
// Config:    ~/.config/genbrowser
// Downloads: ~/Downloads

use std::env;
use std::path::PathBuf;

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// Uses `$XDG_CONFIG_HOME/genbrowser` if set, otherwise `~/.config/genbrowser`.
pub fn get_config_dir() -> PathBuf {
    match env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg).join("genbrowser"),
        _ => home_dir().join(".config").join("genbrowser"),
    }
}

/// Uses `$XDG_DOWNLOAD_DIR` if set, otherwise `~/Downloads`.
pub fn get_download_dir() -> PathBuf {
    match env::var("XDG_DOWNLOAD_DIR") {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => home_dir().join("Downloads"),
    }
}
