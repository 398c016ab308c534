//! In-memory directory backend and fixtures for unit tests.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use fake::faker::lorem::en::Paragraph;
use fake::Fake;

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::LoginRequestDto;
use crate::features::auth::model::{AuthSession, Role, User};
use crate::features::categories::models::Category;
use crate::features::forms::{FeaturedCounts, StagedFile};
use crate::features::projects::dtos::ProjectPayload;
use crate::features::projects::models::{Project, ProjectStatus};
use crate::features::videos::dtos::VideoPayload;
use crate::features::videos::models::{Video, VideoProjectRef};
use crate::modules::api::AdminApi;

pub const TEST_TOKEN: &str = "test-token";

/// The only password [`FakeApi::login`] accepts
pub const TEST_PASSWORD: &str = "correct horse";

/// Smallest valid PNG header, enough for preview derivation
const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

pub fn admin_user() -> User {
    User {
        id: "user-1".to_string(),
        username: "admin".to_string(),
        email: "admin@example.org".to_string(),
        role: Role::Admin,
    }
}

pub fn png_file(name: &str) -> StagedFile {
    StagedFile::new(name, "image/png", PNG_BYTES.to_vec())
}

pub fn text_file(name: &str) -> StagedFile {
    StagedFile::new(name, "text/plain", b"plain notes".to_vec())
}

pub fn category(name: &str) -> Category {
    Category {
        id: format!("cat-{}", name.to_lowercase()),
        name: name.to_string(),
        description: None,
        icon: None,
        color: Some("#336699".to_string()),
        project_count: 0,
    }
}

pub fn sample_project(id: &str, name: &str) -> Project {
    Project {
        id: id.to_string(),
        name: name.to_string(),
        tagline: format!("{} tagline", name),
        description: Paragraph(1..3).fake(),
        categories: vec!["DeFi".to_string()],
        website_url: Some("https://example.org".to_string()),
        social_links: Default::default(),
        is_hiring: false,
        career_page_url: None,
        is_open_for_bounty: false,
        bounty_submission_url: None,
        is_open_source: false,
        github_url: None,
        logo_url: None,
        hero_image_url: None,
        gallery_images: Vec::new(),
        featured: false,
        status: ProjectStatus::Unpublished,
        created_at: None,
        updated_at: None,
    }
}

pub fn sample_video(id: &str, title: &str, project: &Project) -> Video {
    Video {
        id: id.to_string(),
        title: title.to_string(),
        description: None,
        playback_id: "dQw4w9WgXcQ".to_string(),
        thumbnail_url: None,
        featured: false,
        project_id: project.id.clone(),
        project: Some(VideoProjectRef {
            id: project.id.clone(),
            name: project.name.clone(),
        }),
        created_at: None,
        updated_at: None,
    }
}

#[derive(Default)]
struct FakeState {
    sessions: HashMap<String, User>,
    projects: Vec<Project>,
    videos: Vec<Video>,
    categories: Vec<Category>,
    featured: FeaturedCounts,
    calls: Vec<String>,
    next_id: u32,
    failing_loads: u32,
}

/// In-memory [`AdminApi`] that records every call it receives.
///
/// Folders are returned as requested; uploads resolve to
/// `https://cdn.example.org/{folder}/{file_name}`.
#[derive(Default)]
pub struct FakeApi {
    state: Mutex<FakeState>,
    failing_uploads: bool,
    failing_lists: bool,
    unauthorized_writes: bool,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(mut self, token: &str, user: User) -> Self {
        self.state_mut().sessions.insert(token.to_string(), user);
        self
    }

    pub fn with_featured(mut self, projects: u64, videos: u64) -> Self {
        self.state_mut().featured = FeaturedCounts { projects, videos };
        self
    }

    pub fn with_project(mut self, project: Project) -> Self {
        self.state_mut().projects.push(project);
        self
    }

    pub fn with_video(mut self, video: Video) -> Self {
        self.state_mut().videos.push(video);
        self
    }

    pub fn with_categories(mut self, categories: Vec<Category>) -> Self {
        self.state_mut().categories = categories;
        self
    }

    /// Every upload fails with an upstream error
    pub fn failing_uploads(mut self) -> Self {
        self.failing_uploads = true;
        self
    }

    /// Every list endpoint fails with an upstream error
    pub fn failing_lists(mut self) -> Self {
        self.failing_lists = true;
        self
    }

    /// The next `count` single-entity loads (`get_project`, `get_video`)
    /// fail with an upstream error
    pub fn failing_loads(mut self, count: u32) -> Self {
        self.state_mut().failing_loads = count;
        self
    }

    /// Creates, updates and deletes are rejected as if the token expired
    pub fn unauthorized_writes(mut self) -> Self {
        self.unauthorized_writes = true;
        self
    }

    /// Calls received so far, e.g. `"create_folder:foo"`
    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    /// Whether any recorded call starts with `prefix`
    pub fn called(&self, prefix: &str) -> bool {
        self.lock().calls.iter().any(|c| c.starts_with(prefix))
    }

    pub fn projects(&self) -> Vec<Project> {
        self.lock().projects.clone()
    }

    pub fn videos(&self) -> Vec<Video> {
        self.lock().videos.clone()
    }

    fn state_mut(&mut self) -> &mut FakeState {
        self.state.get_mut().unwrap_or_else(|e| e.into_inner())
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, call: String) -> MutexGuard<'_, FakeState> {
        let mut state = self.lock();
        state.calls.push(call);
        state
    }

    fn write_failure(&self) -> Result<()> {
        if self.unauthorized_writes {
            Err(AppError::Unauthorized("Invalid or expired token".to_string()))
        } else {
            Ok(())
        }
    }

    fn list_failure(&self, what: &str) -> Result<()> {
        if self.failing_lists {
            Err(AppError::ExternalServiceError(format!(
                "Failed to list {}: connection refused",
                what
            )))
        } else {
            Ok(())
        }
    }
}

fn load_failure(state: &mut FakeState, what: &str) -> Result<()> {
    if state.failing_loads > 0 {
        state.failing_loads -= 1;
        return Err(AppError::ExternalServiceError(format!(
            "Failed to load {}: HTTP 502",
            what
        )));
    }
    Ok(())
}

fn apply_project_payload(project: &mut Project, payload: &ProjectPayload) {
    project.name = payload.name.clone();
    project.tagline = payload.tagline.clone();
    project.description = payload.description.clone();
    project.categories = payload.categories.clone();
    project.website_url = payload.website_url.clone();
    project.social_links = payload.social_links.clone();
    project.is_hiring = payload.is_hiring;
    project.career_page_url = payload.career_page_url.clone();
    project.is_open_for_bounty = payload.is_open_for_bounty;
    project.bounty_submission_url = payload.bounty_submission_url.clone();
    project.is_open_source = payload.is_open_source;
    project.github_url = payload.github_url.clone();
    project.logo_url = payload.logo_url.clone();
    project.hero_image_url = payload.hero_image_url.clone();
    project.gallery_images = payload.gallery_images.clone();
    project.featured = payload.featured;
    project.status = payload.status;
}

fn apply_video_payload(video: &mut Video, payload: &VideoPayload, projects: &[Project]) {
    video.title = payload.title.clone();
    video.description = payload.description.clone();
    video.playback_id = payload.playback_id.clone();
    video.thumbnail_url = payload.thumbnail_url.clone();
    video.featured = payload.featured;
    video.project_id = payload.project_id.clone();
    video.project = projects
        .iter()
        .find(|p| p.id == payload.project_id)
        .map(|p| VideoProjectRef {
            id: p.id.clone(),
            name: p.name.clone(),
        });
}

#[async_trait]
impl AdminApi for FakeApi {
    async fn login(&self, credentials: &LoginRequestDto) -> Result<AuthSession> {
        let state = self.record(format!("login:{}", credentials.email));
        if credentials.password != TEST_PASSWORD {
            return Err(AppError::Unauthorized("Invalid email or password".to_string()));
        }
        state
            .sessions
            .iter()
            .find(|(_, user)| user.email == credentials.email)
            .map(|(token, user)| AuthSession {
                token: token.clone(),
                user: user.clone(),
            })
            .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))
    }

    async fn current_user(&self, token: &str) -> Result<User> {
        self.lock()
            .sessions
            .get(token)
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Invalid or expired token".to_string()))
    }

    async fn logout(&self, token: &str) -> Result<()> {
        self.record(format!("logout:{}", token));
        Ok(())
    }

    async fn list_projects(&self, _token: &str) -> Result<Vec<Project>> {
        let state = self.record("list_projects".to_string());
        self.list_failure("projects")?;
        Ok(state.projects.clone())
    }

    async fn get_project(&self, _token: &str, id: &str) -> Result<Project> {
        let mut state = self.record(format!("get_project:{}", id));
        load_failure(&mut state, "project")?;
        state
            .projects
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Project {} not found", id)))
    }

    async fn create_project(&self, _token: &str, payload: &ProjectPayload) -> Result<Project> {
        let mut state = self.record(format!("create_project:{}", payload.name));
        self.write_failure()?;
        state.next_id += 1;
        let mut project = sample_project(&format!("project-{}", state.next_id), &payload.name);
        apply_project_payload(&mut project, payload);
        state.projects.push(project.clone());
        Ok(project)
    }

    async fn update_project(
        &self,
        _token: &str,
        id: &str,
        payload: &ProjectPayload,
    ) -> Result<Project> {
        let mut state = self.record(format!("update_project:{}", id));
        self.write_failure()?;
        let project = state
            .projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Project {} not found", id)))?;
        apply_project_payload(project, payload);
        Ok(project.clone())
    }

    async fn delete_project(&self, _token: &str, id: &str) -> Result<()> {
        let mut state = self.record(format!("delete_project:{}", id));
        self.write_failure()?;
        let before = state.projects.len();
        state.projects.retain(|p| p.id != id);
        if state.projects.len() == before {
            return Err(AppError::NotFound(format!("Project {} not found", id)));
        }
        Ok(())
    }

    async fn list_categories(&self, _token: &str) -> Result<Vec<Category>> {
        let state = self.record("list_categories".to_string());
        self.list_failure("categories")?;
        Ok(state.categories.clone())
    }

    async fn list_videos(&self, _token: &str) -> Result<Vec<Video>> {
        let state = self.record("list_videos".to_string());
        self.list_failure("videos")?;
        Ok(state.videos.clone())
    }

    async fn get_video(&self, _token: &str, id: &str) -> Result<Video> {
        let mut state = self.record(format!("get_video:{}", id));
        load_failure(&mut state, "video")?;
        state
            .videos
            .iter()
            .find(|v| v.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Video {} not found", id)))
    }

    async fn create_video(&self, _token: &str, payload: &VideoPayload) -> Result<Video> {
        let mut state = self.record(format!("create_video:{}", payload.title));
        self.write_failure()?;
        state.next_id += 1;
        let mut video = Video {
            id: format!("video-{}", state.next_id),
            title: String::new(),
            description: None,
            playback_id: String::new(),
            thumbnail_url: None,
            featured: false,
            project_id: String::new(),
            project: None,
            created_at: None,
            updated_at: None,
        };
        apply_video_payload(&mut video, payload, &state.projects);
        state.videos.push(video.clone());
        Ok(video)
    }

    async fn update_video(&self, _token: &str, id: &str, payload: &VideoPayload) -> Result<Video> {
        let mut state = self.record(format!("update_video:{}", id));
        self.write_failure()?;
        let projects = state.projects.clone();
        let video = state
            .videos
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Video {} not found", id)))?;
        apply_video_payload(video, payload, &projects);
        Ok(video.clone())
    }

    async fn delete_video(&self, _token: &str, id: &str) -> Result<()> {
        let mut state = self.record(format!("delete_video:{}", id));
        self.write_failure()?;
        let before = state.videos.len();
        state.videos.retain(|v| v.id != id);
        if state.videos.len() == before {
            return Err(AppError::NotFound(format!("Video {} not found", id)));
        }
        Ok(())
    }

    async fn featured_counts(&self, _token: &str) -> Result<FeaturedCounts> {
        Ok(self.record("featured_counts".to_string()).featured)
    }

    async fn create_folder(&self, _token: &str, name: &str) -> Result<String> {
        self.record(format!("create_folder:{}", name));
        Ok(name.to_string())
    }

    async fn upload_file(&self, _token: &str, folder: &str, file: &StagedFile) -> Result<String> {
        self.record(format!("upload:{}/{}", folder, file.file_name));
        if self.failing_uploads {
            return Err(AppError::ExternalServiceError(
                "Upload failed with status 500".to_string(),
            ));
        }
        Ok(format!("https://cdn.example.org/{}/{}", folder, file.file_name))
    }
}
