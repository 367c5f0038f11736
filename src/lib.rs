//! File-explorer controller core for a simulated hierarchical file store.
//!
//! The crate tracks the current directory, navigation history,
//! multi-selection, and clipboard intent, and orchestrates mutating
//! operations (move, copy, delete, trash, symlink creation) against an
//! abstract [`StorageBackend`](fs::storage::StorageBackend). Rendering,
//! shortcut detection, dialog presentation, and the backend implementation
//! itself are external collaborators; the bundled
//! [`MemoryBackend`](fs::memory::MemoryBackend) is the test/reference store.

pub mod config;
pub mod controller;
pub mod error;
pub mod fs;
pub mod history;
pub mod path;

pub use config::ExplorerConfig;
pub use controller::ExplorerController;
pub use error::{FsError, Result};
pub use fs::clipboard::{ClipboardOp, ClipboardState};
pub use fs::memory::MemoryBackend;
pub use fs::selection::SelectionModel;
pub use fs::storage::{
    AppLauncher, ConflictPrompt, ConflictResolver, DirectoryEntry, EntryKind, Stat, StorageBackend,
};
pub use history::NavigationHistory;
