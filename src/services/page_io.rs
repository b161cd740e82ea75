//! Reading local HTML files into a tab and writing page HTML back to disk.
//!
//! Both calls are synchronous; they run on the event loop and the files are small.

use std::fs;
use std::path::Path;

use crate::types::errors::PageIoError;

pub fn read_page(path: &Path) -> Result<String, PageIoError> {
    fs::read_to_string(path).map_err(|source| PageIoError::Read {
        path: path.display().to_string(),
        source,
    })
}

pub fn write_page(path: &Path, html: &str) -> Result<(), PageIoError> {
    fs::write(path, html).map_err(|source| PageIoError::Write {
        path: path.display().to_string(),
        source,
    })
}
