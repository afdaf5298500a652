//! Recursive, pattern-filtered directory listing

use regex::{Regex, RegexBuilder};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::errors::{GalleryError, GalleryResult};
use crate::utils::normalize_path;

/// Walks a directory tree and returns the regular files whose full path
/// matches a case-insensitive pattern
///
/// Symlinked directories are not descended into; symlinks to files are listed.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryScanner;

impl DirectoryScanner {
    pub fn new() -> Self {
        Self
    }

    /// Compile a listing pattern; an empty pattern matches every path
    pub fn compile_pattern(pattern: &str) -> GalleryResult<Regex> {
        RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| GalleryError::invalid_pattern(pattern, e))
    }

    /// Blocking scan of `folder`, sorted by full path
    pub fn scan(&self, folder: &Path, pattern: &str) -> GalleryResult<Vec<PathBuf>> {
        let root = normalize_path(folder);
        if !root.is_dir() {
            return Err(GalleryError::directory_not_found(folder));
        }
        let regex = Self::compile_pattern(pattern)?;

        debug!(folder = %root.display(), pattern, "Scanning directory");

        let mut files = Vec::new();
        for entry in WalkDir::new(&root).follow_links(false) {
            match entry {
                Ok(entry) => {
                    if is_regular_file(&entry) && regex.is_match(&entry.path().to_string_lossy()) {
                        files.push(entry.into_path());
                    }
                }
                Err(e) => {
                    warn!(folder = %root.display(), "Skipping unreadable entry: {}", e);
                }
            }
        }

        files.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));

        debug!(folder = %root.display(), pattern, matched = files.len(), "Directory scan complete");
        Ok(files)
    }
}

/// Regular files, plus symlinks that resolve to one
fn is_regular_file(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    if file_type.is_file() {
        return true;
    }
    file_type.is_symlink()
        && std::fs::metadata(entry.path())
            .map(|m| m.is_file())
            .unwrap_or(false)
}
