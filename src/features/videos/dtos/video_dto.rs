use serde::{Deserialize, Serialize};

/// Create/update body sent to `POST /videos` and `PUT /videos/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoPayload {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub playback_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    pub featured: bool,
    pub project_id: String,
}

/// Entry in the video form's project picker
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectOptionDto {
    pub id: String,
    pub name: String,
    pub selected: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_camel_case() {
        let payload = VideoPayload {
            title: "Launch".to_string(),
            playback_id: "dQw4w9WgXcQ".to_string(),
            project_id: "p1".to_string(),
            ..VideoPayload::default()
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["playbackId"], "dQw4w9WgXcQ");
        assert_eq!(json["projectId"], "p1");
        assert!(json.get("thumbnailUrl").is_none());
        assert!(json.get("description").is_none());
    }
}
