//! Contracts for the collaborators the controller is driven against: the
//! path-addressable storage backend, the conflict-resolution dialog, and
//! the application-association lookup.

use crate::error::Result;

/// Kind of a filesystem node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Symlink,
}

/// One named item inside a listed directory.
///
/// Entries are scoped to a single listing and rebuilt wholesale on every
/// refresh, never patched incrementally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    pub kind: EntryKind,
}

/// Result of a `stat` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stat {
    pub kind: EntryKind,
}

impl Stat {
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Path-addressable storage backend the orchestrator runs against.
///
/// Every path handed in is absolute. Each call is independently atomic at
/// the backend; the controller adds no cross-call atomicity on top.
/// `rename` must report [`FsError::CrossDevice`](crate::error::FsError)
/// distinguishably when the two paths live on different storage mounts, as
/// that is the signal for the copy + delete fallback.
#[allow(async_fn_in_trait)] // single event loop, futures never cross threads
pub trait StorageBackend {
    async fn list_directory(&self, path: &str) -> Result<Vec<DirectoryEntry>>;
    async fn stat(&self, path: &str) -> Result<Stat>;
    async fn rename(&self, source: &str, target: &str) -> Result<()>;
    async fn copy_file(&self, source: &str, target: &str) -> Result<()>;
    async fn copy_recursive(&self, source: &str, target: &str) -> Result<()>;
    async fn remove_file(&self, path: &str) -> Result<()>;
    async fn remove_recursive(&self, path: &str) -> Result<()>;
    async fn mkdir(&self, path: &str, recursive: bool) -> Result<()>;
    async fn symlink(&self, target: &str, link_path: &str) -> Result<()>;
    async fn exists(&self, path: &str) -> bool;
}

/// Context handed to the conflict dialog for one colliding item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictPrompt {
    pub title: String,
    pub message: String,
    pub accept_label: String,
    pub reject_label: String,
}

impl ConflictPrompt {
    /// Standard overwrite prompt for a paste/link target that already exists.
    pub fn overwrite(title: &str, name: &str) -> Self {
        Self {
            title: title.to_string(),
            message: format!("\"{}\" already exists at the destination. Overwrite?", name),
            accept_label: "OK".to_string(),
            reject_label: "Cancel".to_string(),
        }
    }
}

/// External yes/no decision for an existing-target collision.
///
/// The orchestrator awaits this like any other call: one item's decision
/// fully resolves before the next item is examined.
#[allow(async_fn_in_trait)]
pub trait ConflictResolver {
    async fn confirm(&self, prompt: &ConflictPrompt) -> bool;
}

/// Launch side of the application-association collaborator.
///
/// The extension → application lookup itself comes from
/// [`ExplorerConfig`](crate::config::ExplorerConfig); this trait covers
/// handing the resolved application its command line.
pub trait AppLauncher {
    /// Invoke the application with an already shell-escaped command line.
    fn launch(&self, app_id: &str, command: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stat_kind_predicates() {
        assert!(Stat { kind: EntryKind::File }.is_file());
        assert!(Stat { kind: EntryKind::Directory }.is_dir());
        let link = Stat {
            kind: EntryKind::Symlink,
        };
        assert!(!link.is_file());
        assert!(!link.is_dir());
    }

    #[test]
    fn overwrite_prompt_names_the_item() {
        let prompt = ConflictPrompt::overwrite("Paste", "notes.txt");
        assert_eq!(prompt.title, "Paste");
        assert!(prompt.message.contains("notes.txt"));
        assert_eq!(prompt.accept_label, "OK");
        assert_eq!(prompt.reject_label, "Cancel");
    }
}
