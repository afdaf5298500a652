use std::path::{Path, PathBuf};

/// Resolve `path` to an absolute path, following symlinks when it exists
///
/// Paths that do not exist are made absolute against the working directory
/// without touching the filesystem further.
pub fn normalize_path(path: &Path) -> PathBuf {
    std::fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Async form of [`normalize_path`]; the symlink resolution runs on tokio's
/// blocking pool instead of the calling task
pub async fn resolve_path(path: &Path) -> PathBuf {
    match tokio::fs::canonicalize(path).await {
        Ok(resolved) => resolved,
        Err(_) => std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf()),
    }
}

/// Final path component as an owned string, empty for paths like `/`
pub fn file_name_string(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
