use std::sync::Arc;
use tracing::{debug, info};

use crate::core::error::Result;
use crate::features::files::dtos::get_extension_from_content_type;
use crate::features::forms::StagedFile;
use crate::modules::api::AdminApi;
use crate::shared::validation::folder_segment;

/// Uploads staged files through the directory API's storage endpoints
pub struct FileService {
    api: Arc<dyn AdminApi>,
}

impl FileService {
    pub fn new(api: Arc<dyn AdminApi>) -> Self {
        Self { api }
    }

    /// Create the remote folder for a set of uploads.
    ///
    /// # Arguments
    /// * `token` - Bearer token of the current session
    /// * `project_name` - Human-readable project name, sanitized into a path segment
    /// * `scope` - Optional already-validated sub-folder, e.g. a playback identifier
    ///
    /// # Returns
    /// The folder path reported by the API
    pub async fn open_folder(
        &self,
        token: &str,
        project_name: &str,
        scope: Option<&str>,
    ) -> Result<String> {
        let name = match scope {
            Some(scope) => format!("{}/{}", folder_segment(project_name), scope),
            None => folder_segment(project_name),
        };

        let path = self.api.create_folder(token, &name).await?;
        debug!("Upload folder ready: {}", path);
        Ok(path)
    }

    /// Upload one staged file into `folder` and return its public URL
    pub async fn upload(&self, token: &str, folder: &str, file: &StagedFile) -> Result<String> {
        let url = self.api.upload_file(token, folder, file).await?;

        info!(
            "File uploaded: name={}, type={}, ext={}, size={}, folder={}",
            file.file_name,
            file.content_type,
            get_extension_from_content_type(&file.content_type).unwrap_or("bin"),
            file.size(),
            folder
        );

        Ok(url)
    }
}
