//! Multi-selection over absolute paths in the active directory.

use std::collections::HashSet;

/// Ordered set of selected absolute paths.
///
/// The selection is *not* invalidated automatically on navigation; the
/// owning controller decides when a stale selection must be dropped
/// (explicit clear, or after a destructive operation completes).
#[derive(Debug, Clone, Default)]
pub struct SelectionModel {
    selected: Vec<String>,
}

impl SelectionModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection wholesale.
    pub fn select(&mut self, paths: Vec<String>) {
        self.selected = paths;
    }

    /// Select every given path.
    pub fn select_all(&mut self, paths: Vec<String>) {
        self.selected = paths;
    }

    /// New selection = `all_paths` minus the current selection, preserving
    /// the listing order of `all_paths`.
    pub fn invert(&mut self, all_paths: &[String]) {
        let current: HashSet<&String> = self.selected.iter().collect();
        self.selected = all_paths
            .iter()
            .filter(|p| !current.contains(p))
            .cloned()
            .collect();
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn paths(&self) -> &[String] {
        &self.selected
    }

    pub fn contains(&self, p: &str) -> bool {
        self.selected.iter().any(|s| s == p)
    }
}
