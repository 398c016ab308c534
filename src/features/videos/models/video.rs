use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Minimal project reference the API embeds in video responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoProjectRef {
    pub id: String,
    pub name: String,
}

/// Directory video as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub playback_id: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    pub project_id: String,
    #[serde(default)]
    pub project: Option<VideoProjectRef>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Video {
    /// Owning project's name when the API embedded it
    pub fn project_name(&self) -> Option<&str> {
        self.project.as_ref().map(|p| p.name.as_str())
    }
}
