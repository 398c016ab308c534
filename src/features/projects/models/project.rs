use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProjectStatus {
    Published,
    #[default]
    Unpublished,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Published => "PUBLISHED",
            ProjectStatus::Unpublished => "UNPUBLISHED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "PUBLISHED" => Some(ProjectStatus::Published),
            "UNPUBLISHED" => Some(ProjectStatus::Unpublished),
            _ => None,
        }
    }
}

/// Social platforms a project can link to.
///
/// Serialized as lowercase map keys in the `socialLinks` object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Twitter,
    Discord,
    Telegram,
    Medium,
    Linkedin,
    Youtube,
}

impl SocialPlatform {
    pub const ALL: [SocialPlatform; 6] = [
        SocialPlatform::Twitter,
        SocialPlatform::Discord,
        SocialPlatform::Telegram,
        SocialPlatform::Medium,
        SocialPlatform::Linkedin,
        SocialPlatform::Youtube,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            SocialPlatform::Twitter => "twitter",
            SocialPlatform::Discord => "discord",
            SocialPlatform::Telegram => "telegram",
            SocialPlatform::Medium => "medium",
            SocialPlatform::Linkedin => "linkedin",
            SocialPlatform::Youtube => "youtube",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SocialPlatform::Twitter => "X / Twitter",
            SocialPlatform::Discord => "Discord",
            SocialPlatform::Telegram => "Telegram",
            SocialPlatform::Medium => "Medium",
            SocialPlatform::Linkedin => "LinkedIn",
            SocialPlatform::Youtube => "YouTube",
        }
    }
}

impl fmt::Display for SocialPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Directory project as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub tagline: String,
    pub description: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub social_links: BTreeMap<SocialPlatform, String>,
    #[serde(default)]
    pub is_hiring: bool,
    #[serde(default)]
    pub career_page_url: Option<String>,
    #[serde(default)]
    pub is_open_for_bounty: bool,
    #[serde(default)]
    pub bounty_submission_url: Option<String>,
    #[serde(default)]
    pub is_open_source: bool,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub hero_image_url: Option<String>,
    #[serde(default)]
    pub gallery_images: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Project {
    pub fn is_published(&self) -> bool {
        self.status == ProjectStatus::Published
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_parses_camel_case_payload() {
        let json = r#"{
            "id": "p1",
            "name": "Foo",
            "tagline": "bar",
            "description": "a sufficiently long description",
            "categories": ["DeFi"],
            "socialLinks": {"twitter": "https://x.com/foo"},
            "isHiring": true,
            "careerPageUrl": "https://foo.xyz/jobs",
            "status": "PUBLISHED",
            "createdAt": "2024-05-01T10:00:00Z"
        }"#;

        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.categories, vec!["DeFi"]);
        assert_eq!(
            project.social_links.get(&SocialPlatform::Twitter).map(String::as_str),
            Some("https://x.com/foo")
        );
        assert!(project.is_hiring);
        assert!(project.is_published());
        assert!(project.gallery_images.is_empty());
        assert!(project.created_at.is_some());
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(ProjectStatus::parse("published"), Some(ProjectStatus::Published));
        assert_eq!(ProjectStatus::parse(" UNPUBLISHED "), Some(ProjectStatus::Unpublished));
        assert_eq!(ProjectStatus::parse("draft"), None);
    }
}
