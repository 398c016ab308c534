use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::auth::dtos::LoginRequestDto;
use crate::features::auth::model::{AuthSession, User};
use crate::features::categories::models::Category;
use crate::features::forms::{FeaturedCounts, StagedFile};
use crate::features::projects::dtos::ProjectPayload;
use crate::features::projects::models::Project;
use crate::features::videos::dtos::VideoPayload;
use crate::features::videos::models::Video;

/// Operations the console needs from the directory backend.
///
/// Every call that acts on behalf of a signed-in user takes that user's
/// bearer token explicitly; implementations hold no session state.
#[async_trait]
pub trait AdminApi: Send + Sync {
    // Auth
    async fn login(&self, credentials: &LoginRequestDto) -> Result<AuthSession>;
    async fn current_user(&self, token: &str) -> Result<User>;
    async fn logout(&self, token: &str) -> Result<()>;

    // Projects
    async fn list_projects(&self, token: &str) -> Result<Vec<Project>>;
    async fn get_project(&self, token: &str, id: &str) -> Result<Project>;
    async fn create_project(&self, token: &str, payload: &ProjectPayload) -> Result<Project>;
    async fn update_project(
        &self,
        token: &str,
        id: &str,
        payload: &ProjectPayload,
    ) -> Result<Project>;
    async fn delete_project(&self, token: &str, id: &str) -> Result<()>;

    // Categories
    async fn list_categories(&self, token: &str) -> Result<Vec<Category>>;

    // Videos
    async fn list_videos(&self, token: &str) -> Result<Vec<Video>>;
    async fn get_video(&self, token: &str, id: &str) -> Result<Video>;
    async fn create_video(&self, token: &str, payload: &VideoPayload) -> Result<Video>;
    async fn update_video(&self, token: &str, id: &str, payload: &VideoPayload) -> Result<Video>;
    async fn delete_video(&self, token: &str, id: &str) -> Result<()>;

    // Featured
    async fn featured_counts(&self, token: &str) -> Result<FeaturedCounts>;

    // Storage
    /// Create (or reuse) a remote folder and return its path
    async fn create_folder(&self, token: &str, name: &str) -> Result<String>;
    /// Upload a file into `folder` and return its public URL
    async fn upload_file(&self, token: &str, folder: &str, file: &StagedFile) -> Result<String>;
}
