//! Pending copy-or-cut intent over a set of store paths.

/// The type of clipboard operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardOp {
    Copy,
    Cut,
}

/// Clipboard buffer holding absolute paths and the pending operation.
///
/// Holds at most one operation at a time; `set` overwrites atomically and
/// never merges. Paths are not validated here — the orchestrator checks
/// them lazily at paste time.
#[derive(Debug, Clone, Default)]
pub struct ClipboardState {
    paths: Vec<String>,
    operation: Option<ClipboardOp>,
}

impl ClipboardState {
    /// Create a new empty clipboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the clipboard content with paths and an operation type.
    pub fn set(&mut self, paths: Vec<String>, op: ClipboardOp) {
        self.paths = paths;
        self.operation = Some(op);
    }

    /// Reset to empty.
    pub fn clear(&mut self) {
        self.paths.clear();
        self.operation = None;
    }

    /// Whether the clipboard has content.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn operation(&self) -> Option<ClipboardOp> {
        self.operation
    }
}
