// src/file.rs

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde_json::Value;

use crate::error::{CrawlError, Result};

/// Serialize `doc` with 2-space indentation and write it to `path`,
/// replacing whatever was there. Serialization happens first, so a failure
/// leaves the previous file untouched.
pub fn write_json_pretty(path: &Path, doc: &Value) -> Result<PathBuf> {
    let contents = serde_json::to_string_pretty(doc).map_err(CrawlError::Serialize)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    fs::write(path, contents).map_err(|source| CrawlError::Io { path: path.to_path_buf(), source })?;
    Ok(path.to_path_buf())
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| CrawlError::Io { path: dir.to_path_buf(), source })
}
