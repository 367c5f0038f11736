use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, FsError>;

/// Errors surfaced by the storage backend and the controller layer.
///
/// `CrossDevice` is the one variant the move path recovers from locally
/// (copy + delete fallback); everything else propagates to the caller.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path does not exist in the store.
    #[error("not found: {0}")]
    NotFound(String),

    /// Backend refused access to the path.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Rename across storage boundaries is unsupported.
    #[error("cross-device rename: {source_path} -> {target_path}")]
    CrossDevice {
        source_path: String,
        target_path: String,
    },

    /// Target path already exists.
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// Path exists but is not a directory.
    #[error("not a directory: {0}")]
    NotADirectory(String),

    /// Path is not absolute or otherwise malformed.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// Any other backend failure.
    #[error("backend error: {0}")]
    Backend(String),
}

impl FsError {
    /// Whether this error is the distinguishable cross-device rename failure.
    pub fn is_cross_device(&self) -> bool {
        matches!(self, FsError::CrossDevice { .. })
    }
}
