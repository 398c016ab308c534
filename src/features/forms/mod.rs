//! Machinery shared by the project and video form controllers.
//!
//! A form instance walks `Idle -> Loading (edit only) -> Ready -> Submitting`
//! and ends in `Succeeded`, or falls back to `Ready` with a notification
//! when submission fails. Drafts and staged files are owned by the form and
//! never shared between requests.

mod featured;
mod field_errors;
mod multipart;
mod staging;

use serde::Serialize;

pub use featured::{ensure_featured_capacity, FeaturedCounts, FeaturedKind};
pub use field_errors::FieldErrors;
pub use multipart::FormFields;
pub use staging::{derive_preview, GalleryEntry, GalleryStaging, ImageSlot, Preview, StagedFile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormPhase {
    Idle,
    Loading,
    Ready,
    Submitting,
    Succeeded,
}

/// Whether a submit creates a new entity or updates an existing one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: String },
}

impl FormMode {
    pub fn is_edit(&self) -> bool {
        matches!(self, FormMode::Edit { .. })
    }
}

/// Notification for a failed submit.
///
/// Picked files cannot be carried into the re-rendered page, so when any
/// were dropped the user is told to choose them again.
pub fn failure_notification(message: String, dropped_files: bool) -> String {
    if dropped_files {
        format!(
            "{}. Selected images were not kept; choose them again.",
            message.trim_end_matches('.')
        )
    } else {
        message
    }
}

/// Successful submission: the persisted entity and where to navigate next
#[derive(Debug, Clone)]
pub struct SubmitOutcome<T> {
    pub entity: T,
    pub redirect_to: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_notification_mentions_dropped_files() {
        assert_eq!(
            failure_notification("Upload failed.".to_string(), false),
            "Upload failed."
        );
        assert_eq!(
            failure_notification("Something went wrong".to_string(), true),
            "Something went wrong. Selected images were not kept; choose them again."
        );
    }
}
