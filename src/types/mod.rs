// GenBrowser shared type definitions
// Each submodule defines types used across the application.

pub mod action;
pub mod download;
pub mod errors;
pub mod settings;
pub mod tab;
pub mod theme;
