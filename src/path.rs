//! Path helpers for the simulated store.
//!
//! Paths are absolute, `/`-rooted strings: the root is `/`, no path other
//! than the root carries a trailing slash, and segments are never empty.
//! All joining and parent-popping goes through here so the rest of the crate
//! never concatenates path strings by hand.

/// Whether `path` is the store root.
pub fn is_root(path: &str) -> bool {
    path == "/"
}

/// Join a child name onto an absolute base path.
pub fn join(base: &str, name: &str) -> String {
    if is_root(base) {
        format!("/{}", name)
    } else {
        format!("{}/{}", base, name)
    }
}

/// Last segment of an absolute path, or `None` for the root.
pub fn basename(path: &str) -> Option<&str> {
    if is_root(path) {
        return None;
    }
    path.rsplit('/').next().filter(|s| !s.is_empty())
}

/// Parent of an absolute path: pop the last segment, or `None` for the root.
pub fn parent(path: &str) -> Option<String> {
    if is_root(path) {
        return None;
    }
    let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if parts.is_empty() {
        return None;
    }
    let up = &parts[..parts.len() - 1];
    if up.is_empty() {
        Some("/".to_string())
    } else {
        Some(format!("/{}", up.join("/")))
    }
}

/// Collapse empty segments and strip any trailing slash.
///
/// `"/a//b/"` becomes `"/a/b"`; anything that reduces to no segments
/// becomes `"/"`. Relative input is rooted rather than rejected.
pub fn normalize(path: &str) -> String {
    let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if parts.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", parts.join("/"))
    }
}

/// Lowercased final extension of a file name, or `None` when the name has
/// no extension (fewer than two dot-separated parts).
pub fn extension(file_name: &str) -> Option<String> {
    let lower = file_name.to_lowercase();
    let parts: Vec<&str> = lower.split('.').collect();
    if parts.len() < 2 {
        return None;
    }
    parts.last().map(|s| s.to_string())
}

/// Quote a path for use inside a single-quoted shell argument.
pub fn shell_escape(path: &str) -> String {
    path.replace('\'', "'\\''")
}
