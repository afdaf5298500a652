//! Results folder: originals the user chose to keep

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::errors::{GalleryError, GalleryResult};
use crate::models::SaveOutcome;

#[derive(Debug, Clone)]
pub struct ResultsStore {
    root: PathBuf,
}

impl ResultsStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn ensure_dir(&self) -> GalleryResult<()> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Names of the regular files in the results folder, sorted
    pub async fn list(&self) -> GalleryResult<Vec<String>> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Copy `source` into the results folder under its own file name
    ///
    /// An existing file with the same name is left untouched.
    pub async fn save(&self, source: &Path) -> GalleryResult<SaveOutcome> {
        let is_file = tokio::fs::metadata(source)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false);
        if !is_file {
            return Err(GalleryError::not_found(source));
        }

        let file_name = source
            .file_name()
            .ok_or_else(|| GalleryError::invalid_request("path", "path has no file name"))?;
        let destination = self.root.join(file_name);

        if tokio::fs::try_exists(&destination).await? {
            debug!(destination = %destination.display(), "Result already saved");
            return Ok(SaveOutcome {
                saved: true,
                already_exists: true,
            });
        }

        self.ensure_dir().await?;
        let bytes = tokio::fs::copy(source, &destination).await?;
        info!(
            source = %source.display(),
            destination = %destination.display(),
            bytes,
            "Saved image to results"
        );

        Ok(SaveOutcome {
            saved: true,
            already_exists: false,
        })
    }
}
