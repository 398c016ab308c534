//! Video editor: draft, staged thumbnail and the submit pipeline.

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::files::dtos::accept_attribute;
use crate::features::files::FileService;
use crate::features::forms::{
    ensure_featured_capacity, failure_notification, FeaturedKind, FieldErrors, FormFields,
    FormMode, FormPhase, ImageSlot, Preview, StagedFile, SubmitOutcome,
};
use crate::features::projects::models::Project;
use crate::features::videos::dtos::{ProjectOptionDto, VideoPayload};
use crate::features::videos::models::Video;
use crate::modules::api::AdminApi;
use crate::shared::constants::VIDEOS_ROUTE;
use crate::shared::validation::PLAYBACK_ID_REGEX;

/// Editable video fields
#[derive(Debug, Clone, Default, Validate)]
pub struct VideoDraft {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    pub description: String,

    #[validate(length(min = 1, message = "Project is required"))]
    pub project_id: String,

    #[validate(regex(
        path = *PLAYBACK_ID_REGEX,
        message = "Playback id may only contain letters, digits, '_' and '-'"
    ))]
    pub playback_id: String,

    pub featured: bool,
}

impl VideoDraft {
    pub fn from_video(video: &Video) -> Self {
        Self {
            title: video.title.clone(),
            description: video.description.clone().unwrap_or_default(),
            project_id: video.project_id.clone(),
            playback_id: video.playback_id.clone(),
            featured: video.featured,
        }
    }

    pub fn to_payload(&self, thumbnail_url: Option<String>) -> VideoPayload {
        VideoPayload {
            title: self.title.trim().to_string(),
            description: Some(self.description.trim().to_string()).filter(|d| !d.is_empty()),
            playback_id: self.playback_id.trim().to_string(),
            thumbnail_url,
            featured: self.featured,
            project_id: self.project_id.clone(),
        }
    }
}

pub fn validate_draft(draft: &VideoDraft) -> std::result::Result<(), FieldErrors> {
    match draft.validate() {
        Ok(()) => Ok(()),
        Err(e) => Err(FieldErrors::from(e)),
    }
}

/// Video create/edit form controller
pub struct VideoForm {
    api: Arc<dyn AdminApi>,
    files: Arc<FileService>,
    token: String,
    mode: FormMode,
    phase: FormPhase,
    original: Option<Video>,
    load_error: Option<AppError>,
    draft: VideoDraft,
    thumbnail: ImageSlot,
    errors: FieldErrors,
    notification: Option<String>,
}

impl VideoForm {
    fn new(api: Arc<dyn AdminApi>, files: Arc<FileService>, token: &str, mode: FormMode) -> Self {
        Self {
            api,
            files,
            token: token.to_string(),
            mode,
            phase: FormPhase::Idle,
            original: None,
            load_error: None,
            draft: VideoDraft::default(),
            thumbnail: ImageSlot::default(),
            errors: FieldErrors::default(),
            notification: None,
        }
    }

    pub fn create(api: Arc<dyn AdminApi>, files: Arc<FileService>, token: &str) -> Self {
        let mut form = Self::new(api, files, token, FormMode::Create);
        form.phase = FormPhase::Ready;
        form
    }

    /// Form for an existing video. A failed fetch leaves it ready but empty,
    /// and `submit` refuses to save it.
    pub async fn edit(
        api: Arc<dyn AdminApi>,
        files: Arc<FileService>,
        token: &str,
        id: &str,
    ) -> Self {
        let mut form = Self::new(
            api,
            files,
            token,
            FormMode::Edit { id: id.to_string() },
        );
        form.phase = FormPhase::Loading;

        match form.api.get_video(token, id).await {
            Ok(video) => {
                form.draft = VideoDraft::from_video(&video);
                form.thumbnail = ImageSlot::from_existing(video.thumbnail_url.clone());
                form.original = Some(video);
            }
            Err(e) => {
                error!("Failed to load video {} for editing: {}", id, e);
                form.load_error = Some(e);
            }
        }

        form.phase = FormPhase::Ready;
        form
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn original(&self) -> Option<&Video> {
        self.original.as_ref()
    }

    pub fn draft(&self) -> &VideoDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut VideoDraft {
        &mut self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn notification(&self) -> Option<&str> {
        self.notification.as_deref()
    }

    pub async fn stage_thumbnail(&mut self, file: Option<StagedFile>) {
        self.thumbnail.stage(file).await;
    }

    pub async fn apply_fields(&mut self, fields: &mut FormFields) {
        self.draft = VideoDraft {
            title: fields.text_or_empty("title"),
            description: fields.text_or_empty("description"),
            project_id: fields.text_or_empty("project_id"),
            playback_id: fields.text_or_empty("playback_id"),
            featured: fields.flag("featured"),
        };

        if let Some(file) = fields.take_file("thumbnail") {
            self.stage_thumbnail(Some(file)).await;
        }
    }

    pub fn validate(&mut self) -> std::result::Result<(), FieldErrors> {
        let result = validate_draft(&self.draft);
        self.errors = match &result {
            Ok(()) => FieldErrors::default(),
            Err(errors) => errors.clone(),
        };
        result
    }

    fn begin_submit(&mut self) -> Result<()> {
        if self.phase == FormPhase::Submitting {
            return Err(AppError::Conflict(
                "This form is already being submitted".to_string(),
            ));
        }
        self.phase = FormPhase::Submitting;
        self.notification = None;
        Ok(())
    }

    /// Validate and persist the video.
    ///
    /// On failure the form returns to `Ready` with a notification; an
    /// uploaded thumbnail is not removed again.
    pub async fn submit(&mut self) -> Result<SubmitOutcome<Video>> {
        if self.phase == FormPhase::Submitting {
            return Err(AppError::Conflict(
                "This form is already being submitted".to_string(),
            ));
        }
        self.ensure_loaded()?;
        if let Err(errors) = self.validate() {
            let e = AppError::InvalidFields(errors);
            let message = e.notification();
            return Err(self.fail(e, message));
        }
        self.begin_submit()?;

        match self.run_pipeline().await {
            Ok(video) => {
                self.phase = FormPhase::Succeeded;
                info!("Video {} saved ({})", video.id, video.title);
                Ok(SubmitOutcome {
                    entity: video,
                    redirect_to: VIDEOS_ROUTE,
                })
            }
            Err(e) => {
                error!("Video submission failed: {}", e);
                let message = e.notification();
                Err(self.fail(e, message))
            }
        }
    }

    fn ensure_loaded(&mut self) -> Result<()> {
        if !self.mode.is_edit() || self.original.is_some() {
            return Ok(());
        }
        let e = self
            .load_error
            .take()
            .unwrap_or_else(|| AppError::NotFound("Video could not be loaded".to_string()));
        let message = "This video could not be loaded, so nothing was saved. \
                       Reload the page and try again"
            .to_string();
        Err(self.fail(e, message))
    }

    /// Back to `Ready`; a staged thumbnail does not survive the re-render
    fn fail(&mut self, e: AppError, message: String) -> AppError {
        self.phase = FormPhase::Ready;
        let dropped = self.thumbnail.unstage();
        self.notification = Some(failure_notification(message, dropped));
        e
    }

    async fn run_pipeline(&self) -> Result<Video> {
        if self.draft.featured {
            let already_featured = self.original.as_ref().is_some_and(|v| v.featured);
            ensure_featured_capacity(
                self.api.as_ref(),
                &self.token,
                FeaturedKind::Videos,
                already_featured,
            )
            .await?;
        }

        let thumbnail_url = match self.thumbnail.staged() {
            Some(file) => {
                let project_name = self.project_name().await?;
                let folder = self
                    .files
                    .open_folder(&self.token, &project_name, Some(self.draft.playback_id.trim()))
                    .await?;
                Some(self.files.upload(&self.token, &folder, file).await?)
            }
            None => self.thumbnail.existing_url().map(str::to_string),
        };

        let payload = self.draft.to_payload(thumbnail_url);
        match &self.mode {
            FormMode::Create => self.api.create_video(&self.token, &payload).await,
            FormMode::Edit { id } => self.api.update_video(&self.token, id, &payload).await,
        }
    }

    /// Name of the owning project, used to namespace uploads
    async fn project_name(&self) -> Result<String> {
        let embedded = self
            .original
            .as_ref()
            .and_then(|v| v.project.as_ref())
            .filter(|p| p.id == self.draft.project_id);

        match embedded {
            Some(project) => Ok(project.name.clone()),
            None => Ok(self
                .api
                .get_project(&self.token, &self.draft.project_id)
                .await?
                .name),
        }
    }

    /// Template context; `projects` feeds the project picker
    pub fn view(&self, projects: &[Project]) -> VideoFormView {
        let mut options: Vec<ProjectOptionDto> = projects
            .iter()
            .map(|p| ProjectOptionDto {
                id: p.id.clone(),
                name: p.name.clone(),
                selected: p.id == self.draft.project_id,
            })
            .collect();

        // Keep the current project selectable when the list failed to load
        if !self.draft.project_id.is_empty() && !options.iter().any(|o| o.selected) {
            let name = self
                .original
                .as_ref()
                .and_then(|v| v.project.as_ref())
                .filter(|p| p.id == self.draft.project_id)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| self.draft.project_id.clone());
            options.push(ProjectOptionDto {
                id: self.draft.project_id.clone(),
                name,
                selected: true,
            });
        }

        VideoFormView {
            is_edit: self.mode.is_edit(),
            id: match &self.mode {
                FormMode::Edit { id } => Some(id.clone()),
                FormMode::Create => None,
            },
            loaded: !self.mode.is_edit() || self.original.is_some(),
            phase: self.phase,
            title: self.draft.title.clone(),
            description: self.draft.description.clone(),
            playback_id: self.draft.playback_id.clone(),
            featured: self.draft.featured,
            projects: options,
            thumbnail_preview: self.thumbnail.preview().cloned(),
            errors: self.errors.clone(),
            accept: accept_attribute(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VideoFormView {
    pub is_edit: bool,
    pub id: Option<String>,
    pub loaded: bool,
    pub phase: FormPhase,
    pub title: String,
    pub description: String,
    pub playback_id: String,
    pub featured: bool,
    pub projects: Vec<ProjectOptionDto>,
    pub thumbnail_preview: Option<Preview>,
    pub errors: FieldErrors,
    pub accept: String,
}
