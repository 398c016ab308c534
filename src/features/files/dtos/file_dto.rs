use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request DTO for creating a remote upload folder
#[derive(Debug, Serialize, Validate)]
pub struct CreateFolderDto {
    #[validate(length(min = 1, message = "Folder name is required"))]
    pub name: String,
}

/// Response DTO for folder creation
#[derive(Debug, Deserialize)]
pub struct FolderResponseDto {
    /// Folder path to pass back on upload
    pub path: String,
}

/// Response DTO for a single uploaded file
#[derive(Debug, Deserialize)]
pub struct UploadedFileDto {
    /// Public URL of the uploaded file
    pub url: String,
}

/// Image types offered by the form file pickers
pub const ACCEPTED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Image types that can be previewed inline before upload
pub fn is_previewable(content_type: &str) -> bool {
    ACCEPTED_IMAGE_TYPES.contains(&content_type) || content_type == "image/svg+xml"
}

/// Value for the `accept` attribute of image pickers
pub fn accept_attribute() -> String {
    ACCEPTED_IMAGE_TYPES.join(",")
}

/// Get file extension from content type
pub fn get_extension_from_content_type(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        "image/svg+xml" => Some("svg"),
        _ => None,
    }
}
