//! Explorer configuration: TOML parsing and built-in defaults.
//!
//! The defaults mirror the shipped module configuration of the simulated
//! desktop: trash staged under `/tmp`, sessions starting at `/home`, and a
//! small extension → application association table.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::{FsError, Result};
use crate::path;

/// Top-level explorer configuration.
///
/// All fields default so a partial TOML document parses cleanly.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Directory an explorer session opens in.
    pub initial_path: String,
    /// Staging directory for soft-deleted items.
    pub trash_path: String,
    /// Default listing layout handed to the presentation layer.
    pub layout: String,
    /// Lowercased file extension → application identifier.
    pub file_associations: HashMap<String, String>,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        let mut file_associations = HashMap::new();
        for (ext, app) in [
            ("mp4", "video-player"),
            ("webm", "video-player"),
            ("mp3", "audio-player"),
            ("txt", "text-editor"),
            ("gif", "image-viewer"),
            ("webp", "image-viewer"),
            ("jpg", "image-viewer"),
            ("png", "image-viewer"),
        ] {
            file_associations.insert(ext.to_string(), app.to_string());
        }
        Self {
            initial_path: "/home".to_string(),
            trash_path: "/tmp".to_string(),
            layout: String::new(),
            file_associations,
        }
    }
}

impl ExplorerConfig {
    /// Parse a configuration from a TOML document, falling back to defaults
    /// for any omitted field. Paths are normalized and must be absolute.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let mut config: ExplorerConfig =
            toml::from_str(input).map_err(|e| FsError::Backend(format!("config: {}", e)))?;
        for p in [&config.initial_path, &config.trash_path] {
            if !p.starts_with('/') {
                return Err(FsError::InvalidPath(p.clone()));
            }
        }
        config.initial_path = path::normalize(&config.initial_path);
        config.trash_path = path::normalize(&config.trash_path);
        Ok(config)
    }

    /// Application id associated with a file name, resolved by its
    /// lowercased final extension. Extension-less names match nothing.
    pub fn app_for_filename(&self, file_name: &str) -> Option<String> {
        let ext = path::extension(file_name)?;
        self.file_associations.get(&ext).cloned()
    }
}
