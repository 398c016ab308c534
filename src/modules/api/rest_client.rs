//! reqwest-backed client for the directory REST API.
//!
//! Every response is wrapped in the standard `{ success, data, message }`
//! envelope; non-2xx statuses are mapped onto `AppError` variants.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};
use validator::Validate;

use crate::core::config::ApiConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::LoginRequestDto;
use crate::features::auth::model::{AuthSession, User};
use crate::features::categories::models::Category;
use crate::features::files::dtos::{CreateFolderDto, FolderResponseDto, UploadedFileDto};
use crate::features::forms::{FeaturedCounts, StagedFile};
use crate::features::projects::dtos::ProjectPayload;
use crate::features::projects::models::Project;
use crate::features::videos::dtos::VideoPayload;
use crate::features::videos::models::Video;
use crate::modules::api::AdminApi;
use crate::shared::types::ApiResponse;

/// Client for the directory REST API
pub struct RestApiClient {
    base_url: String,
    http_client: Client,
}

impl RestApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.base_url.clone(),
            http_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn entity_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{}/{}", self.base_url, collection, urlencoding::encode(id))
    }

    /// Send a request and unwrap the `data` member of the envelope
    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder, action: &str) -> Result<T> {
        let response = Self::send(request, action).await?;

        let envelope = response.json::<ApiResponse<T>>().await.map_err(|e| {
            error!("Failed to parse response while trying to {}: {}", action, e);
            AppError::ExternalServiceError(format!("Failed to parse response: {}", e))
        })?;

        envelope.data.ok_or_else(|| {
            error!("Empty response while trying to {}", action);
            AppError::ExternalServiceError(format!("Empty response while trying to {}", action))
        })
    }

    /// Send a request whose response body carries nothing we need
    async fn execute(&self, request: RequestBuilder, action: &str) -> Result<()> {
        let response = Self::send(request, action).await?;
        // Drain the body so the connection can be reused
        let _ = response.bytes().await;
        Ok(())
    }

    async fn send(request: RequestBuilder, action: &str) -> Result<Response> {
        debug!("Directory API: {}", action);

        let response = request.send().await.map_err(|e| {
            error!("Failed to {}: {}", action, e);
            AppError::ExternalServiceError(format!("Failed to {}: {}", action, e))
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(Self::map_error(status, &body, action))
    }

    fn map_error(status: StatusCode, body: &str, action: &str) -> AppError {
        let detail = serde_json::from_str::<ApiResponse<serde_json::Value>>(body)
            .ok()
            .and_then(|envelope| envelope.describe())
            .unwrap_or_else(|| format!("HTTP {}", status));

        match status {
            StatusCode::UNAUTHORIZED => AppError::Unauthorized(detail),
            StatusCode::FORBIDDEN => AppError::Forbidden(detail),
            StatusCode::NOT_FOUND => AppError::NotFound(detail),
            StatusCode::CONFLICT => AppError::Conflict(detail),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                AppError::Validation(detail)
            }
            _ => {
                error!(
                    "Directory API error while trying to {}: HTTP {} - {}",
                    action, status, body
                );
                AppError::ExternalServiceError(format!("Directory API error: HTTP {}", status))
            }
        }
    }
}

#[async_trait]
impl AdminApi for RestApiClient {
    async fn login(&self, credentials: &LoginRequestDto) -> Result<AuthSession> {
        let request = self
            .http_client
            .post(self.url("/auth/login"))
            .json(credentials);

        let session: AuthSession = self.fetch(request, "log in").await?;
        info!("Signed in as {} ({:?})", session.user.username, session.user.role);
        Ok(session)
    }

    async fn current_user(&self, token: &str) -> Result<User> {
        let request = self.http_client.get(self.url("/auth/me")).bearer_auth(token);
        self.fetch(request, "look up session").await
    }

    async fn logout(&self, token: &str) -> Result<()> {
        let request = self
            .http_client
            .post(self.url("/auth/logout"))
            .bearer_auth(token);
        self.execute(request, "log out").await
    }

    async fn list_projects(&self, token: &str) -> Result<Vec<Project>> {
        let request = self.http_client.get(self.url("/projects")).bearer_auth(token);
        self.fetch(request, "list projects").await
    }

    async fn get_project(&self, token: &str, id: &str) -> Result<Project> {
        let request = self
            .http_client
            .get(self.entity_url("projects", id))
            .bearer_auth(token);
        self.fetch(request, "fetch project").await
    }

    async fn create_project(&self, token: &str, payload: &ProjectPayload) -> Result<Project> {
        let request = self
            .http_client
            .post(self.url("/projects"))
            .bearer_auth(token)
            .json(payload);
        self.fetch(request, "create project").await
    }

    async fn update_project(
        &self,
        token: &str,
        id: &str,
        payload: &ProjectPayload,
    ) -> Result<Project> {
        let request = self
            .http_client
            .put(self.entity_url("projects", id))
            .bearer_auth(token)
            .json(payload);
        self.fetch(request, "update project").await
    }

    async fn delete_project(&self, token: &str, id: &str) -> Result<()> {
        let request = self
            .http_client
            .delete(self.entity_url("projects", id))
            .bearer_auth(token);
        self.execute(request, "delete project").await
    }

    async fn list_categories(&self, token: &str) -> Result<Vec<Category>> {
        let request = self
            .http_client
            .get(self.url("/categories"))
            .bearer_auth(token);
        self.fetch(request, "list categories").await
    }

    async fn list_videos(&self, token: &str) -> Result<Vec<Video>> {
        let request = self.http_client.get(self.url("/videos")).bearer_auth(token);
        self.fetch(request, "list videos").await
    }

    async fn get_video(&self, token: &str, id: &str) -> Result<Video> {
        let request = self
            .http_client
            .get(self.entity_url("videos", id))
            .bearer_auth(token);
        self.fetch(request, "fetch video").await
    }

    async fn create_video(&self, token: &str, payload: &VideoPayload) -> Result<Video> {
        let request = self
            .http_client
            .post(self.url("/videos"))
            .bearer_auth(token)
            .json(payload);
        self.fetch(request, "create video").await
    }

    async fn update_video(&self, token: &str, id: &str, payload: &VideoPayload) -> Result<Video> {
        let request = self
            .http_client
            .put(self.entity_url("videos", id))
            .bearer_auth(token)
            .json(payload);
        self.fetch(request, "update video").await
    }

    async fn delete_video(&self, token: &str, id: &str) -> Result<()> {
        let request = self
            .http_client
            .delete(self.entity_url("videos", id))
            .bearer_auth(token);
        self.execute(request, "delete video").await
    }

    async fn featured_counts(&self, token: &str) -> Result<FeaturedCounts> {
        let request = self
            .http_client
            .get(self.url("/featured/count"))
            .bearer_auth(token);
        self.fetch(request, "count featured entities").await
    }

    async fn create_folder(&self, token: &str, name: &str) -> Result<String> {
        let body = CreateFolderDto {
            name: name.to_string(),
        };
        body.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        let request = self
            .http_client
            .post(self.url("/upload/folders"))
            .bearer_auth(token)
            .json(&body);

        let folder: FolderResponseDto = self.fetch(request, "create upload folder").await?;
        Ok(folder.path)
    }

    async fn upload_file(&self, token: &str, folder: &str, file: &StagedFile) -> Result<String> {
        let part = Part::bytes(file.bytes.to_vec())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)
            .map_err(|e| {
                AppError::BadRequest(format!(
                    "Invalid content type '{}' for {}: {}",
                    file.content_type, file.file_name, e
                ))
            })?;

        let form = Form::new().text("folder", folder.to_string()).part("file", part);

        let request = self
            .http_client
            .post(self.url("/upload"))
            .bearer_auth(token)
            .multipart(form);

        let uploaded: UploadedFileDto = self.fetch(request, "upload file").await?;
        Ok(uploaded.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::projects::models::ProjectStatus;
    use crate::shared::test_helpers::{png_file, TEST_TOKEN};
    use mockito::{Matcher, Server};
    use std::time::Duration;

    fn client_for(server: &Server) -> RestApiClient {
        let config = ApiConfig::new(&server.url(), Duration::from_secs(5)).unwrap();
        RestApiClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_login_unwraps_envelope() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/auth/login")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "email": "admin@example.org"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"success":true,"data":{"token":"tok-1","user":{"id":"u1","username":"admin","email":"admin@example.org","role":"admin"}}}"#,
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let session = client
            .login(&LoginRequestDto {
                email: "admin@example.org".to_string(),
                password: "hunter22".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(session.token, "tok-1");
        assert!(session.user.is_admin());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_featured_counts_sends_bearer_token() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/featured/count")
            .match_header("authorization", format!("Bearer {}", TEST_TOKEN).as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success":true,"data":{"projects":3,"videos":1}}"#)
            .create_async()
            .await;

        let counts = client_for(&server).featured_counts(TEST_TOKEN).await.unwrap();

        assert_eq!(counts, FeaturedCounts { projects: 3, videos: 1 });
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_statuses_map_to_app_errors() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/projects/missing")
            .with_status(404)
            .with_body(r#"{"success":false,"message":"Project not found"}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/auth/me")
            .with_status(401)
            .with_body("")
            .create_async()
            .await;
        server
            .mock("GET", "/videos")
            .with_status(503)
            .with_body("upstream down")
            .create_async()
            .await;

        let client = client_for(&server);

        match client.get_project(TEST_TOKEN, "missing").await {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, "Project not found"),
            other => panic!("expected NotFound, got {:?}", other),
        }
        assert!(matches!(
            client.current_user(TEST_TOKEN).await,
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            client.list_videos(TEST_TOKEN).await,
            Err(AppError::ExternalServiceError(_))
        ));
    }

    #[tokio::test]
    async fn test_create_project_posts_camel_case_payload() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/projects")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "name": "Foo",
                "isHiring": false,
                "status": "UNPUBLISHED"
            })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"success":true,"data":{"id":"p9","name":"Foo","tagline":"bar","description":"a sufficiently long description","categories":["DeFi"]}}"#,
            )
            .create_async()
            .await;

        let payload = ProjectPayload {
            name: "Foo".to_string(),
            tagline: "bar".to_string(),
            description: "a sufficiently long description".to_string(),
            categories: vec!["DeFi".to_string()],
            status: ProjectStatus::Unpublished,
            ..ProjectPayload::default()
        };

        let project = client_for(&server)
            .create_project(TEST_TOKEN, &payload)
            .await
            .unwrap();

        assert_eq!(project.id, "p9");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_upload_file_returns_url() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/upload")
            .match_header(
                "content-type",
                Matcher::Regex("multipart/form-data; boundary=.*".to_string()),
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success":true,"data":{"url":"https://cdn.example.org/foo/logo.png"}}"#)
            .create_async()
            .await;

        let url = client_for(&server)
            .upload_file(TEST_TOKEN, "foo", &png_file("logo.png"))
            .await
            .unwrap();

        assert_eq!(url, "https://cdn.example.org/foo/logo.png");
        mock.assert_async().await;
    }
}
