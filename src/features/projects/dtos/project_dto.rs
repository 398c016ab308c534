use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::features::projects::models::{ProjectStatus, SocialPlatform};

/// Create/update body sent to `POST /projects` and `PUT /projects/{id}`.
///
/// Conditional URL fields are omitted when their flag is off.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPayload {
    pub name: String,
    pub tagline: String,
    pub description: String,
    pub categories: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    pub social_links: BTreeMap<SocialPlatform, String>,
    pub is_hiring: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub career_page_url: Option<String>,
    pub is_open_for_bounty: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounty_submission_url: Option<String>,
    pub is_open_source: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_image_url: Option<String>,
    pub gallery_images: Vec<String>,
    pub featured: bool,
    pub status: ProjectStatus,
}

/// Uploaded (or retained) image URLs merged into a payload
#[derive(Debug, Clone, Default)]
pub struct ProjectImageUrls {
    pub logo_url: Option<String>,
    pub hero_image_url: Option<String>,
    pub gallery_images: Vec<String>,
}
