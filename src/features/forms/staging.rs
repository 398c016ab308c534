//! Local file staging for entity forms.
//!
//! Files picked in a form are held here until submission; nothing is
//! uploaded before the submit pipeline runs. Each staged image gets a
//! displayable preview derived off the async runtime.

use axum::body::Bytes;
use base64::prelude::*;
use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, warn};

use crate::features::files::dtos::is_previewable;

/// A locally selected file that has not been uploaded yet
#[derive(Debug, Clone)]
pub struct StagedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl StagedFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Something an `<img src>` can display: a remote URL or an inline data URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Preview(String);

impl Preview {
    pub fn remote(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn src(&self) -> &str {
        &self.0
    }
}

/// Derive a preview for a staged file.
///
/// Returns `None` for files that cannot be shown inline or whose contents
/// cannot be read; a missing preview never blocks submission.
pub async fn derive_preview(file: &StagedFile) -> Option<Preview> {
    if file.bytes.is_empty() {
        debug!("No preview for empty file {}", file.file_name);
        return None;
    }
    if !is_previewable(&file.content_type) {
        debug!(
            "No preview for {} ({} is not an inline image type)",
            file.file_name, file.content_type
        );
        return None;
    }

    let bytes = file.bytes.clone();
    let content_type = file.content_type.clone();
    match tokio::task::spawn_blocking(move || {
        format!("data:{};base64,{}", content_type, BASE64_STANDARD.encode(&bytes))
    })
    .await
    {
        Ok(data_url) => Some(Preview(data_url)),
        Err(e) => {
            warn!("Failed to derive preview for {}: {}", file.file_name, e);
            None
        }
    }
}

/// Single-file slot (logo, hero image, thumbnail)
#[derive(Debug, Clone, Default)]
pub struct ImageSlot {
    existing_url: Option<String>,
    staged: Option<StagedFile>,
    preview: Option<Preview>,
}

impl ImageSlot {
    /// Slot seeded from an already uploaded image
    pub fn from_existing(url: Option<String>) -> Self {
        let url = url.filter(|u| !u.trim().is_empty());
        Self {
            preview: url.clone().map(Preview::remote),
            existing_url: url,
            staged: None,
        }
    }

    /// Replace the staged file. Staging `None` discards a pending file and
    /// falls back to the previously uploaded image, if any.
    pub async fn stage(&mut self, file: Option<StagedFile>) {
        match file {
            Some(file) => {
                self.preview = derive_preview(&file).await;
                self.staged = Some(file);
            }
            None => {
                self.unstage();
            }
        }
    }

    /// Drop the staged file, if any, and show the uploaded image again.
    /// Returns whether a file was dropped.
    pub fn unstage(&mut self) -> bool {
        self.preview = self.existing_url.clone().map(Preview::remote);
        self.staged.take().is_some()
    }

    pub fn staged(&self) -> Option<&StagedFile> {
        self.staged.as_ref()
    }

    pub fn existing_url(&self) -> Option<&str> {
        self.existing_url.as_deref()
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }
}

/// One position in a gallery: already uploaded, or staged with its preview.
///
/// File and preview live in the same entry so positional removal can never
/// separate them.
#[derive(Debug, Clone)]
pub enum GalleryEntry {
    Existing { url: String },
    Staged {
        file: StagedFile,
        preview: Option<Preview>,
    },
}

impl GalleryEntry {
    pub fn preview(&self) -> Option<Preview> {
        match self {
            GalleryEntry::Existing { url } => Some(Preview::remote(url.clone())),
            GalleryEntry::Staged { preview, .. } => preview.clone(),
        }
    }
}

/// Ordered gallery of existing and pending images
#[derive(Debug, Clone, Default)]
pub struct GalleryStaging {
    entries: Vec<GalleryEntry>,
}

impl GalleryStaging {
    pub fn from_existing(urls: &[String]) -> Self {
        Self {
            entries: urls
                .iter()
                .filter(|u| !u.trim().is_empty())
                .map(|url| GalleryEntry::Existing { url: url.clone() })
                .collect(),
        }
    }

    /// Append files in the order given.
    ///
    /// Previews are derived concurrently but joined before any entry is
    /// appended, so each entry always carries its own file's preview.
    pub async fn stage(&mut self, files: Vec<StagedFile>) {
        if files.is_empty() {
            return;
        }
        let previews = join_all(files.iter().map(derive_preview)).await;
        self.entries.extend(
            files
                .into_iter()
                .zip(previews)
                .map(|(file, preview)| GalleryEntry::Staged { file, preview }),
        );
    }

    /// Remove the entry at `index` (file and preview together)
    pub fn remove(&mut self, index: usize) -> Option<GalleryEntry> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    /// Remove an uploaded image by its URL.
    ///
    /// Positions shift as entries are removed; URLs do not, so removals
    /// posted from an earlier render still hit the intended image.
    pub fn remove_existing(&mut self, url: &str) -> Option<GalleryEntry> {
        let index = self
            .entries
            .iter()
            .position(|e| matches!(e, GalleryEntry::Existing { url: u } if u == url))?;
        Some(self.entries.remove(index))
    }

    /// Drop every staged entry, keeping uploaded images in order.
    /// Returns how many were dropped.
    pub fn discard_staged(&mut self) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|e| matches!(e, GalleryEntry::Existing { .. }));
        before - self.entries.len()
    }

    pub fn entries(&self) -> &[GalleryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn staged_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, GalleryEntry::Staged { .. }))
            .count()
    }
}
