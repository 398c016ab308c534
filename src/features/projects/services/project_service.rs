use std::sync::Arc;

use tracing::{error, info};

use crate::core::error::Result;
use crate::features::categories::models::Category;
use crate::features::categories::CategoryService;
use crate::features::files::FileService;
use crate::features::projects::form::ProjectForm;
use crate::features::projects::models::Project;
use crate::features::videos::models::Video;
use crate::modules::api::AdminApi;

/// Service behind the project pages
pub struct ProjectService {
    api: Arc<dyn AdminApi>,
    files: Arc<FileService>,
    categories: Arc<CategoryService>,
}

impl ProjectService {
    pub fn new(
        api: Arc<dyn AdminApi>,
        files: Arc<FileService>,
        categories: Arc<CategoryService>,
    ) -> Self {
        Self {
            api,
            files,
            categories,
        }
    }

    pub async fn list(&self, token: &str) -> Result<Vec<Project>> {
        self.api.list_projects(token).await
    }

    pub async fn get(&self, token: &str, id: &str) -> Result<Project> {
        self.api.get_project(token, id).await
    }

    /// Videos attached to a project, for its detail page.
    ///
    /// A failed fetch is logged and rendered as no videos.
    pub async fn videos_of(&self, token: &str, project_id: &str) -> Vec<Video> {
        match self.api.list_videos(token).await {
            Ok(videos) => videos
                .into_iter()
                .filter(|v| v.project_id == project_id)
                .collect(),
            Err(e) => {
                error!("Failed to load videos for project {}: {}", project_id, e);
                Vec::new()
            }
        }
    }

    pub async fn delete(&self, token: &str, id: &str) -> Result<()> {
        self.api.delete_project(token, id).await?;
        info!("Project {} deleted", id);
        Ok(())
    }

    /// Categories for the form's picker; empty when the fetch fails
    pub async fn category_options(&self, token: &str) -> Vec<Category> {
        self.categories.list_or_empty(token).await
    }

    pub fn new_form(&self, token: &str) -> ProjectForm {
        ProjectForm::create(self.api.clone(), self.files.clone(), token)
    }

    pub async fn edit_form(&self, token: &str, id: &str) -> ProjectForm {
        ProjectForm::edit(self.api.clone(), self.files.clone(), token, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use crate::shared::test_helpers::{sample_project, sample_video, FakeApi, TEST_TOKEN};

    fn service_for(api: Arc<FakeApi>) -> ProjectService {
        ProjectService::new(
            api.clone(),
            Arc::new(FileService::new(api.clone())),
            Arc::new(CategoryService::new(api)),
        )
    }

    #[tokio::test]
    async fn test_videos_of_filters_by_project() {
        let foo = sample_project("p1", "Foo");
        let bar = sample_project("p2", "Bar");
        let api = Arc::new(
            FakeApi::new()
                .with_video(sample_video("v1", "Foo launch", &foo))
                .with_video(sample_video("v2", "Bar launch", &bar))
                .with_project(foo)
                .with_project(bar),
        );
        let service = service_for(api);

        let videos = service.videos_of(TEST_TOKEN, "p1").await;
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].id, "v1");
    }

    #[tokio::test]
    async fn test_delete_missing_project() {
        let api = Arc::new(FakeApi::new().with_project(sample_project("p1", "Foo")));
        let service = service_for(api.clone());

        service.delete(TEST_TOKEN, "p1").await.unwrap();
        assert!(api.projects().is_empty());

        let result = service.delete(TEST_TOKEN, "p1").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
