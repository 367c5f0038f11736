//! Back/forward navigation history over visited directory paths.

/// Linear navigation history with a cursor.
///
/// Pushing while the cursor is not at the tail discards every entry after
/// the cursor before appending, so the history never branches. There is no
/// length bound and no deduplication of consecutive identical paths.
#[derive(Debug, Default, Clone)]
pub struct NavigationHistory {
    entries: Vec<String>,
    cursor: usize,
}

impl NavigationHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a newly visited path, truncating any forward entries.
    pub fn push(&mut self, path: impl Into<String>) {
        if !self.entries.is_empty() && self.cursor + 1 < self.entries.len() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(path.into());
        self.cursor = self.entries.len() - 1;
    }

    /// Step back, returning the path at the new cursor position.
    ///
    /// At the start of history this is a no-op returning `None`.
    pub fn back(&mut self) -> Option<String> {
        if self.cursor > 0 {
            self.cursor -= 1;
            Some(self.entries[self.cursor].clone())
        } else {
            None
        }
    }

    /// Step forward, the mirror of [`back`](Self::back) at the tail.
    pub fn forward(&mut self) -> Option<String> {
        if self.cursor + 1 < self.entries.len() {
            self.cursor += 1;
            Some(self.entries[self.cursor].clone())
        } else {
            None
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Visited paths in order, oldest first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}
