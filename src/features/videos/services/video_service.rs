use std::sync::Arc;

use tracing::{error, info};

use crate::core::error::Result;
use crate::features::files::FileService;
use crate::features::projects::models::Project;
use crate::features::videos::form::VideoForm;
use crate::features::videos::models::Video;
use crate::modules::api::AdminApi;

/// Service behind the video pages
pub struct VideoService {
    api: Arc<dyn AdminApi>,
    files: Arc<FileService>,
}

impl VideoService {
    pub fn new(api: Arc<dyn AdminApi>, files: Arc<FileService>) -> Self {
        Self { api, files }
    }

    pub async fn list(&self, token: &str) -> Result<Vec<Video>> {
        self.api.list_videos(token).await
    }

    pub async fn get(&self, token: &str, id: &str) -> Result<Video> {
        self.api.get_video(token, id).await
    }

    pub async fn delete(&self, token: &str, id: &str) -> Result<()> {
        self.api.delete_video(token, id).await?;
        info!("Video {} deleted", id);
        Ok(())
    }

    /// Projects for the form's picker, sorted by name.
    ///
    /// A failed fetch is logged and rendered as an empty picker.
    pub async fn project_options(&self, token: &str) -> Vec<Project> {
        match self.api.list_projects(token).await {
            Ok(mut projects) => {
                projects.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
                projects
            }
            Err(e) => {
                error!("Failed to load projects for the video form: {}", e);
                Vec::new()
            }
        }
    }

    pub fn new_form(&self, token: &str) -> VideoForm {
        VideoForm::create(self.api.clone(), self.files.clone(), token)
    }

    pub async fn edit_form(&self, token: &str, id: &str) -> VideoForm {
        VideoForm::edit(self.api.clone(), self.files.clone(), token, id).await
    }
}
