//! File-operation orchestrator: move, trash, delete, paste, and shortcut
//! creation against a [`StorageBackend`].
//!
//! Paste and shortcut batches run in two phases. The conflict phase is
//! sequential: each item's existence check and possible dialog fully
//! resolves before the next item is examined. The I/O phase then awaits all
//! accepted items jointly, with no ordering guarantee between them and no
//! rollback of items that completed before a failure.

use std::future::Future;
use std::pin::Pin;
use std::time::{SystemTime, UNIX_EPOCH};

use futures::future::try_join_all;
use tracing::error;

use crate::error::Result;
use crate::fs::clipboard::ClipboardOp;
use crate::fs::storage::{ConflictPrompt, ConflictResolver, StorageBackend};
use crate::path;

type ItemFuture<'a> = Pin<Box<dyn Future<Output = Result<()>> + 'a>>;

/// Move `source` to `target`, falling back to copy + delete when the
/// backend reports a cross-device rename.
///
/// Only [`FsError::CrossDevice`](crate::error::FsError) is recovered here:
/// files fall back to `copy_file` + `remove_file`, directories to
/// `copy_recursive` + `remove_recursive`. Every other error propagates
/// unchanged. This makes a move succeed whenever copy + delete would, even
/// when atomic rename is unavailable across storage mounts.
pub async fn move_safe<S: StorageBackend>(store: &S, source: &str, target: &str) -> Result<()> {
    match store.rename(source, target).await {
        Ok(()) => Ok(()),
        Err(err) if err.is_cross_device() => {
            let stat = store.stat(source).await?;
            if stat.is_dir() {
                store.copy_recursive(source, target).await?;
                store.remove_recursive(source).await?;
            } else {
                store.copy_file(source, target).await?;
                store.remove_file(source).await?;
            }
            Ok(())
        }
        Err(err) => Err(err),
    }
}

/// Collision-free trash destination for one item at one timestamp.
///
/// First candidate is `{trash_dir}/{millis}_{name}`; identical timestamps
/// (simulated clocks, two items with the same basename in one batch) are
/// disambiguated with a numeric infix probe.
async fn trash_destination<S: StorageBackend>(
    store: &S,
    trash_dir: &str,
    name: &str,
    millis: u128,
) -> String {
    let first = path::join(trash_dir, &format!("{}_{}", millis, name));
    if !store.exists(&first).await {
        return first;
    }
    let mut n = 1u32;
    loop {
        let candidate = path::join(trash_dir, &format!("{}_{}_{}", millis, n, name));
        if !store.exists(&candidate).await {
            return candidate;
        }
        n += 1;
    }
}

/// Move each path into the trash directory, best effort.
///
/// The trash directory is created recursively if absent; a creation failure
/// is logged and the batch still proceeds. Each path is handled
/// independently: one item's failure is logged and does not abort the rest.
pub async fn move_to_trash<S: StorageBackend>(store: &S, trash_dir: &str, paths: &[String]) {
    if !store.exists(trash_dir).await {
        if let Err(err) = store.mkdir(trash_dir, true).await {
            error!(%err, trash_dir, "failed to create trash directory");
        }
    }

    for source in paths {
        let name = path::basename(source).unwrap_or("unknown");
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        let dest = trash_destination(store, trash_dir, name, millis).await;
        if let Err(err) = move_safe(store, source, &dest).await {
            error!(%err, path = %source, "failed to move path to trash");
        }
    }
}

/// Permanently delete each path: unlink files and symlinks, recursively
/// remove directories. Unlike trash, failures propagate immediately.
pub async fn delete_paths<S: StorageBackend>(store: &S, paths: &[String]) -> Result<()> {
    for p in paths {
        let stat = store.stat(p).await?;
        if stat.is_dir() {
            store.remove_recursive(p).await?;
        } else {
            store.remove_file(p).await?;
        }
    }
    Ok(())
}

/// Paste clipboard paths into `target_dir`.
///
/// Per item: the target is `target_dir/basename`; an existing target asks
/// the resolver, and a declined item is skipped. Accepted and
/// non-conflicting items are scheduled — `copy_file`/`copy_recursive` for
/// Copy, `rename` for Cut — and awaited jointly. A failure anywhere fails
/// the whole batch; items that already completed are not rolled back.
pub async fn paste_clipboard<S, C>(
    store: &S,
    resolver: &C,
    paths: &[String],
    op: ClipboardOp,
    target_dir: &str,
) -> Result<()>
where
    S: StorageBackend,
    C: ConflictResolver,
{
    let mut scheduled: Vec<ItemFuture<'_>> = Vec::new();

    for source in paths {
        let Some(name) = path::basename(source) else {
            continue;
        };
        let target = path::join(target_dir, name);

        if store.exists(&target).await {
            let prompt = ConflictPrompt::overwrite("Paste", name);
            if !resolver.confirm(&prompt).await {
                continue;
            }
        }

        scheduled.push(Box::pin(async move {
            match op {
                ClipboardOp::Cut => store.rename(source, &target).await,
                ClipboardOp::Copy => {
                    let stat = store.stat(source).await?;
                    if stat.is_dir() {
                        store.copy_recursive(source, &target).await
                    } else {
                        store.copy_file(source, &target).await
                    }
                }
            }
        }));
    }

    try_join_all(scheduled).await.map(|_| ())
}

/// Create symbolic links in `target_dir` pointing at the clipboard sources.
///
/// Same conflict flow as [`paste_clipboard`]; an accepted overwrite removes
/// the existing target before linking, since the backend refuses to link
/// over an existing path.
pub async fn paste_as_shortcuts<S, C>(
    store: &S,
    resolver: &C,
    paths: &[String],
    target_dir: &str,
) -> Result<()>
where
    S: StorageBackend,
    C: ConflictResolver,
{
    let mut scheduled: Vec<ItemFuture<'_>> = Vec::new();

    for source in paths {
        let Some(name) = path::basename(source) else {
            continue;
        };
        let link_path = path::join(target_dir, name);

        let mut replace = false;
        if store.exists(&link_path).await {
            let prompt = ConflictPrompt::overwrite("Create shortcut", name);
            if !resolver.confirm(&prompt).await {
                continue;
            }
            replace = true;
        }

        scheduled.push(Box::pin(async move {
            if replace {
                let stat = store.stat(&link_path).await?;
                if stat.is_dir() {
                    store.remove_recursive(&link_path).await?;
                } else {
                    store.remove_file(&link_path).await?;
                }
            }
            store.symlink(source, &link_path).await
        }));
    }

    try_join_all(scheduled).await.map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::memory::MemoryBackend;

    /// Resolver with a fixed answer that records each prompt it was asked.
    struct FixedResolver {
        answer: bool,
        prompts: std::sync::Mutex<Vec<ConflictPrompt>>,
    }

    impl FixedResolver {
        fn new(answer: bool) -> Self {
            Self {
                answer,
                prompts: std::sync::Mutex::new(Vec::new()),
            }
        }

        fn prompt_count(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    impl ConflictResolver for FixedResolver {
        async fn confirm(&self, prompt: &ConflictPrompt) -> bool {
            self.prompts.lock().unwrap().push(prompt.clone());
            self.answer
        }
    }

    fn owned(paths: &[&str]) -> Vec<String> {
        paths.iter().map(|s| s.to_string()).collect()
    }

    // === move_safe ===

    #[tokio::test]
    async fn move_safe_same_device_renames() {
        let store = MemoryBackend::new();
        store.seed_file("/a/f.txt", "data");
        store.seed_dir("/b");
        move_safe(&store, "/a/f.txt", "/b/f.txt").await.unwrap();
        assert!(!store.exists("/a/f.txt").await);
        assert_eq!(store.read_file("/b/f.txt"), Some("data".to_string()));
    }

    #[tokio::test]
    async fn move_safe_cross_device_file_falls_back_to_copy_delete() {
        let store = MemoryBackend::with_mounts(&["/home", "/tmp"]);
        store.seed_file("/home/f.txt", "data");
        move_safe(&store, "/home/f.txt", "/tmp/f.txt").await.unwrap();
        assert!(!store.exists("/home/f.txt").await);
        assert_eq!(store.read_file("/tmp/f.txt"), Some("data".to_string()));
    }

    #[tokio::test]
    async fn move_safe_cross_device_directory_moves_recursively() {
        let store = MemoryBackend::with_mounts(&["/home", "/tmp"]);
        store.seed_file("/home/dir/sub/x.txt", "x");
        store.seed_file("/home/dir/y.txt", "y");
        move_safe(&store, "/home/dir", "/tmp/dir").await.unwrap();
        assert!(!store.exists("/home/dir").await);
        assert_eq!(store.read_file("/tmp/dir/sub/x.txt"), Some("x".to_string()));
        assert_eq!(store.read_file("/tmp/dir/y.txt"), Some("y".to_string()));
    }

    #[tokio::test]
    async fn move_safe_propagates_non_cross_device_errors() {
        let store = MemoryBackend::new();
        let err = move_safe(&store, "/missing", "/dest").await.unwrap_err();
        assert!(matches!(err, crate::error::FsError::NotFound(_)));
    }

    // === trash ===

    #[tokio::test]
    async fn trash_creates_directory_and_prefixes_names() {
        let store = MemoryBackend::new();
        store.seed_file("/home/doc.txt", "doc");
        assert!(!store.exists("/trash").await);

        move_to_trash(&store, "/trash", &owned(&["/home/doc.txt"])).await;

        assert!(!store.exists("/home/doc.txt").await);
        let entries = store.list_directory("/trash").await.unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].name.ends_with("_doc.txt"));
    }

    #[tokio::test]
    async fn trash_same_basename_twice_yields_distinct_entries() {
        let store = MemoryBackend::new();
        store.seed_file("/a/notes.txt", "a");
        store.seed_file("/b/notes.txt", "b");

        move_to_trash(&store, "/trash", &owned(&["/a/notes.txt", "/b/notes.txt"])).await;

        let entries = store.list_directory("/trash").await.unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[tokio::test]
    async fn trash_destination_probes_past_identical_timestamps() {
        let store = MemoryBackend::new();
        store.seed_dir("/trash");
        store.seed_file("/trash/42_f.txt", "taken");
        store.seed_file("/trash/42_1_f.txt", "also taken");

        let dest = trash_destination(&store, "/trash", "f.txt", 42).await;
        assert_eq!(dest, "/trash/42_2_f.txt");
    }

    #[tokio::test]
    async fn trash_continues_past_failed_items() {
        let store = MemoryBackend::new();
        store.seed_file("/ok.txt", "ok");

        move_to_trash(
            &store,
            "/trash",
            &owned(&["/vanished.txt", "/ok.txt"]),
        )
        .await;

        // The missing item was logged and skipped, the good one moved.
        let entries = store.list_directory("/trash").await.unwrap();
        assert_eq!(entries.len(), 1);
        assert!(!store.exists("/ok.txt").await);
    }

    // === delete ===

    #[tokio::test]
    async fn delete_unlinks_files_and_removes_directories() {
        let store = MemoryBackend::new();
        store.seed_file("/f.txt", "f");
        store.seed_file("/dir/inner.txt", "i");

        delete_paths(&store, &owned(&["/f.txt", "/dir"])).await.unwrap();
        assert!(!store.exists("/f.txt").await);
        assert!(!store.exists("/dir").await);
    }

    #[tokio::test]
    async fn delete_propagates_missing_path() {
        let store = MemoryBackend::new();
        store.seed_file("/f.txt", "f");
        let err = delete_paths(&store, &owned(&["/gone", "/f.txt"]))
            .await
            .unwrap_err();
        assert!(matches!(err, crate::error::FsError::NotFound(_)));
        // No per-item isolation here: the later item was never reached.
        assert!(store.exists("/f.txt").await);
    }

    // === paste ===

    #[tokio::test]
    async fn paste_copy_duplicates_files_and_keeps_sources() {
        let store = MemoryBackend::new();
        store.seed_file("/src/a.txt", "a");
        store.seed_file("/src/tree/deep.txt", "deep");
        store.seed_dir("/dst");
        let resolver = FixedResolver::new(true);

        paste_clipboard(
            &store,
            &resolver,
            &owned(&["/src/a.txt", "/src/tree"]),
            ClipboardOp::Copy,
            "/dst",
        )
        .await
        .unwrap();

        assert_eq!(store.read_file("/dst/a.txt"), Some("a".to_string()));
        assert_eq!(store.read_file("/dst/tree/deep.txt"), Some("deep".to_string()));
        assert!(store.exists("/src/a.txt").await);
        assert!(store.exists("/src/tree").await);
        // No conflicts, no prompts.
        assert_eq!(resolver.prompt_count(), 0);
    }

    #[tokio::test]
    async fn paste_cut_renames_sources_away() {
        let store = MemoryBackend::new();
        store.seed_file("/src/a.txt", "a");
        store.seed_dir("/dst");
        let resolver = FixedResolver::new(true);

        paste_clipboard(
            &store,
            &resolver,
            &owned(&["/src/a.txt"]),
            ClipboardOp::Cut,
            "/dst",
        )
        .await
        .unwrap();

        assert!(!store.exists("/src/a.txt").await);
        assert_eq!(store.read_file("/dst/a.txt"), Some("a".to_string()));
    }

    #[tokio::test]
    async fn paste_declined_conflict_touches_nothing() {
        let store = MemoryBackend::new();
        store.seed_file("/src/a.txt", "new");
        store.seed_file("/dst/a.txt", "old");
        let resolver = FixedResolver::new(false);

        paste_clipboard(
            &store,
            &resolver,
            &owned(&["/src/a.txt"]),
            ClipboardOp::Cut,
            "/dst",
        )
        .await
        .unwrap();

        assert_eq!(resolver.prompt_count(), 1);
        assert_eq!(store.read_file("/src/a.txt"), Some("new".to_string()));
        assert_eq!(store.read_file("/dst/a.txt"), Some("old".to_string()));
    }

    #[tokio::test]
    async fn paste_accepted_conflict_overwrites_target() {
        let store = MemoryBackend::new();
        store.seed_file("/src/a.txt", "new");
        store.seed_file("/dst/a.txt", "old");
        let resolver = FixedResolver::new(true);

        paste_clipboard(
            &store,
            &resolver,
            &owned(&["/src/a.txt"]),
            ClipboardOp::Cut,
            "/dst",
        )
        .await
        .unwrap();

        assert_eq!(store.read_file("/dst/a.txt"), Some("new".to_string()));
        assert!(!store.exists("/src/a.txt").await);
    }

    #[tokio::test]
    async fn paste_mixed_batch_skips_only_declined_items() {
        let store = MemoryBackend::new();
        store.seed_file("/src/clash.txt", "new");
        store.seed_file("/src/clean.txt", "clean");
        store.seed_file("/dst/clash.txt", "old");
        let resolver = FixedResolver::new(false);

        paste_clipboard(
            &store,
            &resolver,
            &owned(&["/src/clash.txt", "/src/clean.txt"]),
            ClipboardOp::Copy,
            "/dst",
        )
        .await
        .unwrap();

        assert_eq!(store.read_file("/dst/clash.txt"), Some("old".to_string()));
        assert_eq!(store.read_file("/dst/clean.txt"), Some("clean".to_string()));
    }

    #[tokio::test]
    async fn paste_batch_failure_surfaces_without_rollback() {
        let store = MemoryBackend::new();
        store.seed_file("/src/good.txt", "good");
        store.seed_dir("/dst");
        let resolver = FixedResolver::new(true);

        let result = paste_clipboard(
            &store,
            &resolver,
            &owned(&["/src/good.txt", "/src/gone.txt"]),
            ClipboardOp::Copy,
            "/dst",
        )
        .await;

        assert!(result.is_err());
        // The item that completed stays applied.
        assert_eq!(store.read_file("/dst/good.txt"), Some("good".to_string()));
    }

    // === shortcuts ===

    #[tokio::test]
    async fn shortcuts_link_back_to_sources() {
        let store = MemoryBackend::new();
        store.seed_file("/src/a.txt", "a");
        store.seed_dir("/dst");
        let resolver = FixedResolver::new(true);

        paste_as_shortcuts(&store, &resolver, &owned(&["/src/a.txt"]), "/dst")
            .await
            .unwrap();

        assert_eq!(
            store.symlink_target("/dst/a.txt"),
            Some("/src/a.txt".to_string())
        );
        assert!(store.exists("/src/a.txt").await);
    }

    #[tokio::test]
    async fn shortcuts_declined_conflict_keeps_existing_target() {
        let store = MemoryBackend::new();
        store.seed_file("/src/a.txt", "src");
        store.seed_file("/dst/a.txt", "existing");
        let resolver = FixedResolver::new(false);

        paste_as_shortcuts(&store, &resolver, &owned(&["/src/a.txt"]), "/dst")
            .await
            .unwrap();

        assert_eq!(resolver.prompt_count(), 1);
        assert_eq!(store.read_file("/dst/a.txt"), Some("existing".to_string()));
        assert_eq!(store.symlink_target("/dst/a.txt"), None);
    }

    #[tokio::test]
    async fn shortcuts_accepted_conflict_replaces_target_with_link() {
        let store = MemoryBackend::new();
        store.seed_file("/src/a.txt", "src");
        store.seed_file("/dst/a.txt", "existing");
        let resolver = FixedResolver::new(true);

        paste_as_shortcuts(&store, &resolver, &owned(&["/src/a.txt"]), "/dst")
            .await
            .unwrap();

        assert_eq!(
            store.symlink_target("/dst/a.txt"),
            Some("/src/a.txt".to_string())
        );
    }
}
