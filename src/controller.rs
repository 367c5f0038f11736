//! Explorer controller: composition root and command surface.
//!
//! Owns the active directory, its listing, selection, clipboard, and
//! navigation history for one explorer window/session, and drives the
//! orchestrator against the injected collaborators. State is plain mutable
//! data; an observer list is invoked after each mutation so the
//! presentation layer can re-render.

use tracing::{debug, error};

use crate::config::ExplorerConfig;
use crate::error::Result;
use crate::fs::clipboard::{ClipboardOp, ClipboardState};
use crate::fs::operations;
use crate::fs::selection::SelectionModel;
use crate::fs::storage::{AppLauncher, ConflictResolver, DirectoryEntry, StorageBackend};
use crate::history::NavigationHistory;
use crate::path;

/// One explorer window's controller.
pub struct ExplorerController<S, C, A> {
    store: S,
    resolver: C,
    launcher: A,
    config: ExplorerConfig,

    active_path: String,
    entries: Vec<DirectoryEntry>,
    selection: SelectionModel,
    clipboard: ClipboardState,
    history: NavigationHistory,
    layout: String,

    observers: Vec<Box<dyn Fn()>>,
}

impl<S, C, A> ExplorerController<S, C, A>
where
    S: StorageBackend,
    C: ConflictResolver,
    A: AppLauncher,
{
    /// Build a controller starting at the configured initial path.
    pub fn new(store: S, resolver: C, launcher: A, config: ExplorerConfig) -> Self {
        let active_path = config.initial_path.clone();
        let layout = config.layout.clone();
        Self {
            store,
            resolver,
            launcher,
            config,
            active_path,
            entries: Vec::new(),
            selection: SelectionModel::new(),
            clipboard: ClipboardState::new(),
            history: NavigationHistory::new(),
            layout,
            observers: Vec::new(),
        }
    }

    /// Register a change observer, invoked after each state mutation.
    pub fn subscribe(&mut self, observer: impl Fn() + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn notify(&self) {
        for observer in &self.observers {
            observer();
        }
    }

    // ── State accessors ─────────────────────────────────────────────────────

    pub fn active_path(&self) -> &str {
        &self.active_path
    }

    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    pub fn clipboard(&self) -> &ClipboardState {
        &self.clipboard
    }

    pub fn layout(&self) -> &str {
        &self.layout
    }

    pub fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.history.can_go_forward()
    }

    // ── Listing & navigation ────────────────────────────────────────────────

    /// List the active directory for the first time.
    pub async fn initialize(&mut self) {
        let p = self.active_path.clone();
        self.list_into_entries(&p).await;
    }

    /// Re-list the active directory.
    pub async fn refresh_directory(&mut self) {
        let p = self.active_path.clone();
        self.list_into_entries(&p).await;
    }

    /// Listing failures are recovered locally: empty entries plus a log
    /// line, never an error to the caller.
    async fn list_into_entries(&mut self, p: &str) {
        self.entries = match self.store.list_directory(p).await {
            Ok(entries) => entries,
            Err(err) => {
                error!(%err, path = %p, "failed to list directory");
                Vec::new()
            }
        };
        self.notify();
    }

    /// Enter a child directory of the active path.
    ///
    /// A stat failure or a non-directory target silently returns; on
    /// success the new path is pushed onto the navigation history.
    pub async fn open_directory(&mut self, name: &str) {
        let full = path::join(&self.active_path, name);
        match self.store.stat(&full).await {
            Ok(stat) if stat.is_dir() => {}
            Ok(_) => return,
            Err(err) => {
                debug!(%err, path = %full, "stat failed while opening directory");
                return;
            }
        }
        self.active_path = full.clone();
        self.history.push(full.clone());
        self.list_into_entries(&full).await;
    }

    /// Hand a file to its associated application, if one is registered.
    pub fn open_file(&self, name: &str) {
        let Some(app_id) = self.config.app_for_filename(name) else {
            return;
        };
        let full = path::join(&self.active_path, name);
        let command = format!("'{}' --autoplay", path::shell_escape(&full));
        self.launcher.launch(&app_id, &command);
    }

    /// Pop the last path segment; a no-op at the root.
    pub async fn directory_up(&mut self) {
        let Some(up) = path::parent(&self.active_path) else {
            return;
        };
        self.active_path = up.clone();
        self.list_into_entries(&up).await;
    }

    /// Step back in history and re-list, without pushing a new entry.
    pub async fn directory_back(&mut self) {
        if let Some(prev) = self.history.back() {
            self.active_path = prev.clone();
            self.list_into_entries(&prev).await;
        }
    }

    /// Step forward in history and re-list, without pushing a new entry.
    pub async fn directory_forward(&mut self) {
        if let Some(next) = self.history.forward() {
            self.active_path = next.clone();
            self.list_into_entries(&next).await;
        }
    }

    // ── Selection & clipboard ───────────────────────────────────────────────

    /// Replace the selection with the given names resolved against the
    /// active directory.
    pub fn select_files(&mut self, names: &[&str]) {
        let paths = names
            .iter()
            .map(|name| path::join(&self.active_path, name))
            .collect();
        self.selection.select(paths);
        self.notify();
    }

    /// Select every entry of the current listing.
    pub fn select_all(&mut self) {
        let paths = self.listed_paths();
        self.selection.select_all(paths);
        self.notify();
    }

    /// Selection becomes all listed entries minus the current selection.
    pub fn invert_selection(&mut self) {
        let all = self.listed_paths();
        self.selection.invert(&all);
        self.notify();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.notify();
    }

    fn listed_paths(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| path::join(&self.active_path, &e.name))
            .collect()
    }

    /// Stage the selection for a later move.
    pub fn cut_selected(&mut self) {
        self.clipboard
            .set(self.selection.paths().to_vec(), ClipboardOp::Cut);
        self.notify();
    }

    /// Stage the selection for a later copy.
    pub fn copy_selected(&mut self) {
        self.clipboard
            .set(self.selection.paths().to_vec(), ClipboardOp::Copy);
        self.notify();
    }

    // ── Mutating operations ─────────────────────────────────────────────────

    /// Delete the selection, either into the trash (best effort) or
    /// permanently (propagating). The selection is cleared and the listing
    /// refreshed once the operation completes.
    pub async fn delete_selected(&mut self, to_trash: bool) -> Result<()> {
        let targets = self.selection.paths().to_vec();
        if to_trash {
            operations::move_to_trash(&self.store, &self.config.trash_path, &targets).await;
        } else {
            operations::delete_paths(&self.store, &targets).await?;
        }
        self.selection.clear();
        self.refresh_directory().await;
        Ok(())
    }

    /// Paste the clipboard into the active directory.
    ///
    /// On success the clipboard is cleared for a Cut and the listing is
    /// refreshed; on a batch failure both post-actions are skipped and
    /// already-completed items stay applied.
    pub async fn paste_clipboard(&mut self) -> Result<()> {
        let Some(op) = self.clipboard.operation() else {
            return Ok(());
        };
        if self.clipboard.is_empty() {
            return Ok(());
        }
        let sources = self.clipboard.paths().to_vec();
        operations::paste_clipboard(
            &self.store,
            &self.resolver,
            &sources,
            op,
            &self.active_path,
        )
        .await?;
        if op == ClipboardOp::Cut {
            self.clipboard.clear();
        }
        self.refresh_directory().await;
        Ok(())
    }

    /// Create shortcuts in the active directory for the clipboard paths.
    pub async fn paste_as_shortcuts(&mut self) -> Result<()> {
        if self.clipboard.is_empty() {
            return Ok(());
        }
        let sources = self.clipboard.paths().to_vec();
        operations::paste_as_shortcuts(&self.store, &self.resolver, &sources, &self.active_path)
            .await?;
        self.refresh_directory().await;
        Ok(())
    }

    /// Create a directory under the active path; failures are logged, a
    /// success refreshes the listing.
    pub async fn create_new_directory(&mut self, name: &str) {
        let full = path::join(&self.active_path, name);
        match self.store.mkdir(&full, false).await {
            Ok(()) => self.refresh_directory().await,
            Err(err) => error!(%err, path = %full, "failed to create directory"),
        }
    }

    /// Create a symbolic link named `link_name` under the active path,
    /// pointing at `target_path`.
    pub async fn create_symbolic_link(&mut self, target_path: &str, link_name: &str) {
        let link_path = path::join(&self.active_path, link_name);
        match self.store.symlink(target_path, &link_path).await {
            Ok(()) => self.refresh_directory().await,
            Err(err) => error!(%err, path = %link_path, "failed to create symbolic link"),
        }
    }

    /// Record the listing layout chosen by the presentation layer.
    pub fn set_layout(&mut self, value: impl Into<String>) {
        self.layout = value.into();
        self.notify();
    }
}
