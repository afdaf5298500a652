use bytes::Bytes;
use serde::Serialize;
use std::path::PathBuf;

use crate::cache::Weighted;

/// Image bytes ready to be served, together with their media type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedImage {
    pub media_type: String,
    pub bytes: Bytes,
}

impl LoadedImage {
    pub fn new<M: Into<String>, B: Into<Bytes>>(media_type: M, bytes: B) -> Self {
        Self {
            media_type: media_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Only the payload counts towards the cache budget
impl Weighted for LoadedImage {
    fn weight(&self) -> usize {
        self.bytes.len()
    }
}

/// Whether a served image came out of memory or had to be produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
        }
    }
}

/// One page of a filtered directory listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileListing {
    pub files: Vec<PathBuf>,
    pub total: usize,
    pub has_more: bool,
    /// Offset to request the following page with
    pub next_offset: usize,
}

/// A single file located within a filtered listing, plus its siblings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewContext {
    pub filename: String,
    pub full_path: PathBuf,
    /// File names (not paths) of every file in the listing, in listing order
    pub file_list: Vec<String>,
    /// Position of the located file in `file_list`
    pub index: usize,
}

/// Result of copying an original into the results folder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SaveOutcome {
    pub saved: bool,
    pub already_exists: bool,
}
