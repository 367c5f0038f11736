//! In-memory reference backend.
//!
//! A path-keyed node map standing in for the simulated store. Mount points
//! partition the tree into devices: renaming across two mounts reports
//! [`FsError::CrossDevice`], which is how the real store behaves with its
//! separate `/home` and `/tmp` mounts and what exercises the copy + delete
//! fallback. Production backends live outside this crate; this one backs
//! tests and demos.

use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::error::{FsError, Result};
use crate::fs::storage::{DirectoryEntry, EntryKind, Stat, StorageBackend};
use crate::path;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    File(String),
    Directory,
    Symlink(String),
}

impl Node {
    fn kind(&self) -> EntryKind {
        match self {
            Node::File(_) => EntryKind::File,
            Node::Directory => EntryKind::Directory,
            Node::Symlink(_) => EntryKind::Symlink,
        }
    }
}

/// Path-keyed in-memory store with mount-aware rename.
#[derive(Debug)]
pub struct MemoryBackend {
    nodes: Mutex<BTreeMap<String, Node>>,
    mounts: Vec<String>,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    /// Empty store with a single device rooted at `/`.
    pub fn new() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert("/".to_string(), Node::Directory);
        Self {
            nodes: Mutex::new(nodes),
            mounts: Vec::new(),
        }
    }

    /// Store with the given mount points, each created as a directory and
    /// counted as its own device for rename purposes.
    pub fn with_mounts(mounts: &[&str]) -> Self {
        let store = Self::new();
        {
            let mut nodes = store.lock();
            for mount in mounts {
                nodes.insert(path::normalize(mount), Node::Directory);
            }
        }
        Self {
            mounts: mounts.iter().map(|m| path::normalize(m)).collect(),
            ..store
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, Node>> {
        self.nodes.lock().expect("store mutex poisoned")
    }

    /// Mount index a path belongs to; paths outside every mount share the
    /// root device.
    fn device_of(&self, p: &str) -> usize {
        for (i, mount) in self.mounts.iter().enumerate() {
            if p == mount || p.starts_with(&format!("{}/", mount)) {
                return i + 1;
            }
        }
        0
    }

    fn subtree_keys(nodes: &BTreeMap<String, Node>, root: &str) -> Vec<String> {
        let prefix = format!("{}/", root);
        let mut keys: Vec<String> = nodes
            .keys()
            .filter(|k| *k == root || k.starts_with(&prefix))
            .cloned()
            .collect();
        keys.sort();
        keys
    }

    // ── Test/demo seeding helpers ───────────────────────────────────────────

    /// Insert a file, creating missing parent directories.
    pub fn seed_file(&self, p: &str, content: &str) {
        let p = path::normalize(p);
        self.seed_parents(&p);
        self.lock().insert(p, Node::File(content.to_string()));
    }

    /// Insert a directory, creating missing parents.
    pub fn seed_dir(&self, p: &str) {
        let p = path::normalize(p);
        self.seed_parents(&p);
        self.lock().insert(p, Node::Directory);
    }

    fn seed_parents(&self, p: &str) {
        let mut nodes = self.lock();
        let mut cur = path::parent(p);
        while let Some(dir) = cur {
            nodes.entry(dir.clone()).or_insert(Node::Directory);
            cur = path::parent(&dir);
        }
    }

    /// File content at a path, for assertions.
    pub fn read_file(&self, p: &str) -> Option<String> {
        match self.lock().get(&path::normalize(p)) {
            Some(Node::File(content)) => Some(content.clone()),
            _ => None,
        }
    }

    /// Symlink target at a path, for assertions.
    pub fn symlink_target(&self, p: &str) -> Option<String> {
        match self.lock().get(&path::normalize(p)) {
            Some(Node::Symlink(target)) => Some(target.clone()),
            _ => None,
        }
    }
}

impl StorageBackend for MemoryBackend {
    async fn list_directory(&self, p: &str) -> Result<Vec<DirectoryEntry>> {
        let nodes = self.lock();
        match nodes.get(p) {
            Some(Node::Directory) => {}
            Some(_) => return Err(FsError::NotADirectory(p.to_string())),
            None => return Err(FsError::NotFound(p.to_string())),
        }
        let prefix = if path::is_root(p) {
            "/".to_string()
        } else {
            format!("{}/", p)
        };
        let mut entries = Vec::new();
        for (key, node) in nodes.range(prefix.clone()..) {
            if !key.starts_with(&prefix) {
                break;
            }
            let rest = &key[prefix.len()..];
            if rest.is_empty() || rest.contains('/') {
                continue;
            }
            entries.push(DirectoryEntry {
                name: rest.to_string(),
                kind: node.kind(),
            });
        }
        Ok(entries)
    }

    async fn stat(&self, p: &str) -> Result<Stat> {
        self.lock()
            .get(p)
            .map(|node| Stat { kind: node.kind() })
            .ok_or_else(|| FsError::NotFound(p.to_string()))
    }

    async fn rename(&self, source: &str, target: &str) -> Result<()> {
        if self.device_of(source) != self.device_of(target) {
            return Err(FsError::CrossDevice {
                source_path: source.to_string(),
                target_path: target.to_string(),
            });
        }
        let mut nodes = self.lock();
        if !nodes.contains_key(source) {
            return Err(FsError::NotFound(source.to_string()));
        }
        // An existing target is replaced, subtree included.
        for key in Self::subtree_keys(&nodes, target) {
            nodes.remove(&key);
        }
        for key in Self::subtree_keys(&nodes, source) {
            let node = nodes.remove(&key).expect("key listed from this map");
            let moved = format!("{}{}", target, &key[source.len()..]);
            nodes.insert(moved, node);
        }
        Ok(())
    }

    async fn copy_file(&self, source: &str, target: &str) -> Result<()> {
        let mut nodes = self.lock();
        let content = match nodes.get(source) {
            Some(Node::File(content)) => content.clone(),
            Some(Node::Symlink(t)) => t.clone(),
            Some(Node::Directory) => return Err(FsError::Backend(format!(
                "copy_file on directory: {}",
                source
            ))),
            None => return Err(FsError::NotFound(source.to_string())),
        };
        nodes.insert(target.to_string(), Node::File(content));
        Ok(())
    }

    async fn copy_recursive(&self, source: &str, target: &str) -> Result<()> {
        let mut nodes = self.lock();
        if !nodes.contains_key(source) {
            return Err(FsError::NotFound(source.to_string()));
        }
        for key in Self::subtree_keys(&nodes, source) {
            let node = nodes.get(&key).expect("key listed from this map").clone();
            let copied = format!("{}{}", target, &key[source.len()..]);
            nodes.insert(copied, node);
        }
        Ok(())
    }

    async fn remove_file(&self, p: &str) -> Result<()> {
        let mut nodes = self.lock();
        match nodes.get(p) {
            Some(Node::Directory) => Err(FsError::Backend(format!("is a directory: {}", p))),
            Some(_) => {
                nodes.remove(p);
                Ok(())
            }
            None => Err(FsError::NotFound(p.to_string())),
        }
    }

    async fn remove_recursive(&self, p: &str) -> Result<()> {
        let mut nodes = self.lock();
        if !nodes.contains_key(p) {
            return Err(FsError::NotFound(p.to_string()));
        }
        for key in Self::subtree_keys(&nodes, p) {
            nodes.remove(&key);
        }
        Ok(())
    }

    async fn mkdir(&self, p: &str, recursive: bool) -> Result<()> {
        let p = path::normalize(p);
        let mut nodes = self.lock();
        if nodes.contains_key(&p) {
            return Err(FsError::AlreadyExists(p));
        }
        match path::parent(&p) {
            Some(parent_dir) if nodes.contains_key(&parent_dir) => {}
            Some(parent_dir) => {
                if !recursive {
                    return Err(FsError::NotFound(parent_dir));
                }
                let mut missing = vec![parent_dir.clone()];
                let mut cur = path::parent(&parent_dir);
                while let Some(dir) = cur {
                    if nodes.contains_key(&dir) {
                        break;
                    }
                    missing.push(dir.clone());
                    cur = path::parent(&dir);
                }
                for dir in missing {
                    nodes.insert(dir, Node::Directory);
                }
            }
            None => return Err(FsError::InvalidPath(p.clone())),
        }
        nodes.insert(p, Node::Directory);
        Ok(())
    }

    async fn symlink(&self, target: &str, link_path: &str) -> Result<()> {
        let mut nodes = self.lock();
        if nodes.contains_key(link_path) {
            return Err(FsError::AlreadyExists(link_path.to_string()));
        }
        match path::parent(link_path) {
            Some(parent_dir) if nodes.contains_key(&parent_dir) => {}
            Some(parent_dir) => return Err(FsError::NotFound(parent_dir)),
            None => return Err(FsError::InvalidPath(link_path.to_string())),
        }
        nodes.insert(link_path.to_string(), Node::Symlink(target.to_string()));
        Ok(())
    }

    async fn exists(&self, p: &str) -> bool {
        self.lock().contains_key(p)
    }
}
