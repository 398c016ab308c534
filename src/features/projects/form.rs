//! Project editor: draft, staged images and the submit pipeline.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::CategoryOptionDto;
use crate::features::categories::models::Category;
use crate::features::files::dtos::accept_attribute;
use crate::features::files::FileService;
use crate::features::forms::{
    ensure_featured_capacity, failure_notification, FeaturedKind, FieldErrors, FormFields,
    FormMode, FormPhase, GalleryEntry, GalleryStaging, ImageSlot, Preview, StagedFile,
    SubmitOutcome,
};
use crate::features::projects::dtos::{ProjectImageUrls, ProjectPayload};
use crate::features::projects::models::{Project, ProjectStatus, SocialPlatform};
use crate::modules::api::AdminApi;
use crate::shared::constants::{MIN_DESCRIPTION_LENGTH, PROJECTS_ROUTE};

/// Social link as edited in the form: an inclusion toggle plus its URL
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocialLinkDraft {
    pub include: bool,
    pub url: String,
}

/// Editable project fields
#[derive(Debug, Clone, Default, Validate)]
pub struct ProjectDraft {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Tagline is required"))]
    pub tagline: String,

    pub description: String,

    pub categories: BTreeSet<String>,

    #[validate(url(message = "Website must be a valid URL"))]
    pub website_url: Option<String>,

    pub social_links: BTreeMap<SocialPlatform, SocialLinkDraft>,

    pub is_hiring: bool,
    pub career_page_url: String,

    pub is_open_for_bounty: bool,
    pub bounty_submission_url: String,

    pub is_open_source: bool,
    pub github_url: String,

    pub featured: bool,
    pub status: ProjectStatus,
}

impl ProjectDraft {
    /// Draft populated from a persisted project, social links decomposed
    /// into include + URL for every platform
    pub fn from_project(project: &Project) -> Self {
        let social_links = SocialPlatform::ALL
            .iter()
            .map(|platform| {
                let url = project.social_links.get(platform).cloned();
                (
                    *platform,
                    SocialLinkDraft {
                        include: url.is_some(),
                        url: url.unwrap_or_default(),
                    },
                )
            })
            .collect();

        Self {
            name: project.name.clone(),
            tagline: project.tagline.clone(),
            description: project.description.clone(),
            categories: project.categories.iter().cloned().collect(),
            website_url: project.website_url.clone().filter(|u| !u.trim().is_empty()),
            social_links,
            is_hiring: project.is_hiring,
            career_page_url: project.career_page_url.clone().unwrap_or_default(),
            is_open_for_bounty: project.is_open_for_bounty,
            bounty_submission_url: project.bounty_submission_url.clone().unwrap_or_default(),
            is_open_source: project.is_open_source,
            github_url: project.github_url.clone().unwrap_or_default(),
            featured: project.featured,
            status: project.status,
        }
    }

    /// Flip membership of `name` in the category set
    pub fn toggle_category(&mut self, name: &str) {
        if !self.categories.remove(name) {
            self.categories.insert(name.to_string());
        }
    }

    /// Flip inclusion of a social platform, keeping any URL already typed
    pub fn toggle_social(&mut self, platform: SocialPlatform) {
        let link = self.social_links.entry(platform).or_default();
        link.include = !link.include;
    }

    /// Assemble the API payload. Conditional URLs are sent only when their
    /// flag is on; excluded social links are dropped.
    pub fn to_payload(&self, images: ProjectImageUrls) -> ProjectPayload {
        let conditional = |enabled: bool, url: &str| {
            Some(url.trim().to_string()).filter(|u| enabled && !u.is_empty())
        };

        ProjectPayload {
            name: self.name.trim().to_string(),
            tagline: self.tagline.trim().to_string(),
            description: self.description.trim().to_string(),
            categories: self.categories.iter().cloned().collect(),
            website_url: self
                .website_url
                .as_deref()
                .map(str::trim)
                .filter(|u| !u.is_empty())
                .map(str::to_string),
            social_links: self
                .social_links
                .iter()
                .filter(|(_, link)| link.include && !link.url.trim().is_empty())
                .map(|(platform, link)| (*platform, link.url.trim().to_string()))
                .collect(),
            is_hiring: self.is_hiring,
            career_page_url: conditional(self.is_hiring, &self.career_page_url),
            is_open_for_bounty: self.is_open_for_bounty,
            bounty_submission_url: conditional(self.is_open_for_bounty, &self.bounty_submission_url),
            is_open_source: self.is_open_source,
            github_url: conditional(self.is_open_source, &self.github_url),
            logo_url: images.logo_url,
            hero_image_url: images.hero_image_url,
            gallery_images: images.gallery_images,
            featured: self.featured,
            status: self.status,
        }
    }
}

/// Validate a project draft.
///
/// Combines the derived rules with the ones that depend on other fields:
/// description length, a non-empty category set, URLs for included social
/// links and the conditional hiring/bounty/open-source URLs.
pub fn validate_draft(draft: &ProjectDraft) -> std::result::Result<(), FieldErrors> {
    let mut errors = match draft.validate() {
        Ok(()) => FieldErrors::default(),
        Err(e) => FieldErrors::from(e),
    };

    if draft.description.trim().chars().count() < MIN_DESCRIPTION_LENGTH {
        errors.add(
            "description",
            format!(
                "Description must be at least {} characters",
                MIN_DESCRIPTION_LENGTH
            ),
        );
    }

    if draft.categories.is_empty() {
        errors.add("categories", "Select at least one category");
    }

    for (platform, link) in &draft.social_links {
        errors.conditional_url(
            &format!("social_{}_url", platform.key()),
            &format!("{} URL", platform.label()),
            link.include,
            Some(&link.url),
        );
    }

    errors.conditional_url(
        "career_page_url",
        "Career page URL",
        draft.is_hiring,
        Some(&draft.career_page_url),
    );
    errors.conditional_url(
        "bounty_submission_url",
        "Bounty submission URL",
        draft.is_open_for_bounty,
        Some(&draft.bounty_submission_url),
    );
    errors.conditional_url(
        "github_url",
        "GitHub URL",
        draft.is_open_source,
        Some(&draft.github_url),
    );

    errors.into_result()
}

/// Project create/edit form controller
pub struct ProjectForm {
    api: Arc<dyn AdminApi>,
    files: Arc<FileService>,
    token: String,
    mode: FormMode,
    phase: FormPhase,
    original: Option<Project>,
    load_error: Option<AppError>,
    draft: ProjectDraft,
    logo: ImageSlot,
    hero_image: ImageSlot,
    gallery: GalleryStaging,
    /// Uploaded gallery URLs removed so far; re-posted with every render
    removed_gallery: Vec<String>,
    errors: FieldErrors,
    notification: Option<String>,
}

impl ProjectForm {
    fn new(api: Arc<dyn AdminApi>, files: Arc<FileService>, token: &str, mode: FormMode) -> Self {
        Self {
            api,
            files,
            token: token.to_string(),
            mode,
            phase: FormPhase::Idle,
            original: None,
            load_error: None,
            draft: ProjectDraft::default(),
            logo: ImageSlot::default(),
            hero_image: ImageSlot::default(),
            gallery: GalleryStaging::default(),
            removed_gallery: Vec::new(),
            errors: FieldErrors::default(),
            notification: None,
        }
    }

    /// Empty form for a new project
    pub fn create(api: Arc<dyn AdminApi>, files: Arc<FileService>, token: &str) -> Self {
        let mut form = Self::new(api, files, token, FormMode::Create);
        form.phase = FormPhase::Ready;
        form
    }

    /// Form for an existing project.
    ///
    /// A failed fetch is logged and leaves the form ready but empty; it is
    /// not retried, and [`ProjectForm::submit`] refuses to save such a form.
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

        match form.api.get_project(token, id).await {
            Ok(project) => form.populate(project),
            Err(e) => {
                error!("Failed to load project {} for editing: {}", id, e);
                form.load_error = Some(e);
            }
        }

        form.phase = FormPhase::Ready;
        form
    }

    fn populate(&mut self, project: Project) {
        self.draft = ProjectDraft::from_project(&project);
        self.logo = ImageSlot::from_existing(project.logo_url.clone());
        self.hero_image = ImageSlot::from_existing(project.hero_image_url.clone());
        self.gallery = GalleryStaging::from_existing(&project.gallery_images);
        self.original = Some(project);
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    /// The persisted project this form edits, when it loaded
    pub fn original(&self) -> Option<&Project> {
        self.original.as_ref()
    }

    pub fn draft(&self) -> &ProjectDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut ProjectDraft {
        &mut self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn notification(&self) -> Option<&str> {
        self.notification.as_deref()
    }

    pub fn toggle_category(&mut self, name: &str) {
        self.draft.toggle_category(name);
    }

    pub fn toggle_social(&mut self, platform: SocialPlatform) {
        self.draft.toggle_social(platform);
    }

    pub async fn stage_logo(&mut self, file: Option<StagedFile>) {
        self.logo.stage(file).await;
    }

    pub async fn stage_hero_image(&mut self, file: Option<StagedFile>) {
        self.hero_image.stage(file).await;
    }

    pub async fn stage_gallery(&mut self, files: Vec<StagedFile>) {
        self.gallery.stage(files).await;
    }

    pub fn remove_gallery(&mut self, index: usize) -> Option<GalleryEntry> {
        let entry = self.gallery.remove(index)?;
        if let GalleryEntry::Existing { url } = &entry {
            self.removed_gallery.push(url.clone());
        }
        Some(entry)
    }

    /// Remove an uploaded gallery image by URL; unknown URLs are ignored
    pub fn remove_gallery_url(&mut self, url: &str) -> Option<GalleryEntry> {
        let entry = self.gallery.remove_existing(url)?;
        self.removed_gallery.push(url.to_string());
        Some(entry)
    }

    pub fn gallery(&self) -> &GalleryStaging {
        &self.gallery
    }

    /// Apply a posted form: draft fields, gallery removals, then staged files
    pub async fn apply_fields(&mut self, fields: &mut FormFields) {
        {
            let draft = &mut self.draft;
            draft.name = fields.text_or_empty("name");
            draft.tagline = fields.text_or_empty("tagline");
            draft.description = fields.text_or_empty("description");
            draft.website_url = fields.text("website_url");
            draft.categories = fields.all("categories").into_iter().collect();
            draft.social_links = SocialPlatform::ALL
                .iter()
                .map(|platform| {
                    (
                        *platform,
                        SocialLinkDraft {
                            include: fields.flag(&format!("social_{}_include", platform.key())),
                            url: fields.text_or_empty(&format!("social_{}_url", platform.key())),
                        },
                    )
                })
                .collect();
            draft.is_hiring = fields.flag("is_hiring");
            draft.career_page_url = fields.text_or_empty("career_page_url");
            draft.is_open_for_bounty = fields.flag("is_open_for_bounty");
            draft.bounty_submission_url = fields.text_or_empty("bounty_submission_url");
            draft.is_open_source = fields.flag("is_open_source");
            draft.github_url = fields.text_or_empty("github_url");
            draft.featured = fields.flag("featured");
            draft.status = fields
                .text("status")
                .and_then(|s| ProjectStatus::parse(&s))
                .unwrap_or_default();
        }

        for url in fields.all("remove_gallery") {
            self.remove_gallery_url(&url);
        }

        if let Some(file) = fields.take_file("logo") {
            self.stage_logo(Some(file)).await;
        }
        if let Some(file) = fields.take_file("hero_image") {
            self.stage_hero_image(Some(file)).await;
        }
        self.stage_gallery(fields.take_files("gallery")).await;
    }

    /// Validate the draft, recording field errors on the form
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

    /// Validate and persist the project.
    ///
    /// On failure the form returns to `Ready` with a notification; uploads
    /// that completed before the failure are not rolled back.
    pub async fn submit(&mut self) -> Result<SubmitOutcome<Project>> {
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
            Ok(project) => {
                self.phase = FormPhase::Succeeded;
                info!("Project {} saved ({})", project.id, project.name);
                Ok(SubmitOutcome {
                    entity: project,
                    redirect_to: PROJECTS_ROUTE,
                })
            }
            Err(e) => {
                error!("Project submission failed: {}", e);
                let message = e.notification();
                Err(self.fail(e, message))
            }
        }
    }

    /// An edit whose project never loaded has no stored images to keep, so
    /// saving it would wipe them. Refuse and surface the load error instead.
    fn ensure_loaded(&mut self) -> Result<()> {
        if !self.mode.is_edit() || self.original.is_some() {
            return Ok(());
        }
        let e = self
            .load_error
            .take()
            .unwrap_or_else(|| AppError::NotFound("Project could not be loaded".to_string()));
        let message = "This project could not be loaded, so nothing was saved. \
                       Reload the page and try again"
            .to_string();
        Err(self.fail(e, message))
    }

    /// Back to `Ready` after a failure. Staged files are dropped because
    /// they cannot survive the re-render.
    fn fail(&mut self, e: AppError, message: String) -> AppError {
        self.phase = FormPhase::Ready;
        let dropped = self.release_staged();
        self.notification = Some(failure_notification(message, dropped));
        e
    }

    fn release_staged(&mut self) -> bool {
        let logo = self.logo.unstage();
        let hero_image = self.hero_image.unstage();
        let gallery = self.gallery.discard_staged() > 0;
        logo || hero_image || gallery
    }

    async fn run_pipeline(&self) -> Result<Project> {
        if self.draft.featured {
            let already_featured = self.original.as_ref().is_some_and(|p| p.featured);
            ensure_featured_capacity(
                self.api.as_ref(),
                &self.token,
                FeaturedKind::Projects,
                already_featured,
            )
            .await?;
        }

        let images = self.upload_images().await?;
        let payload = self.draft.to_payload(images);

        match &self.mode {
            FormMode::Create => self.api.create_project(&self.token, &payload).await,
            FormMode::Edit { id } => self.api.update_project(&self.token, id, &payload).await,
        }
    }

    /// Upload staged images into the project's folder, keeping existing
    /// URLs for slots and gallery positions that were not replaced
    async fn upload_images(&self) -> Result<ProjectImageUrls> {
        let has_staged = self.logo.staged().is_some()
            || self.hero_image.staged().is_some()
            || self.gallery.staged_count() > 0;

        if !has_staged {
            return Ok(ProjectImageUrls {
                logo_url: self.logo.existing_url().map(str::to_string),
                hero_image_url: self.hero_image.existing_url().map(str::to_string),
                gallery_images: self
                    .gallery
                    .entries()
                    .iter()
                    .filter_map(|entry| match entry {
                        GalleryEntry::Existing { url } => Some(url.clone()),
                        GalleryEntry::Staged { .. } => None,
                    })
                    .collect(),
            });
        }

        let folder = self
            .files
            .open_folder(&self.token, self.draft.name.trim(), None)
            .await?;

        let logo_url = self.upload_slot(&folder, &self.logo).await?;
        let hero_image_url = self.upload_slot(&folder, &self.hero_image).await?;

        let mut gallery_images = Vec::with_capacity(self.gallery.len());
        for entry in self.gallery.entries() {
            match entry {
                GalleryEntry::Existing { url } => gallery_images.push(url.clone()),
                GalleryEntry::Staged { file, .. } => {
                    gallery_images.push(self.files.upload(&self.token, &folder, file).await?)
                }
            }
        }

        Ok(ProjectImageUrls {
            logo_url,
            hero_image_url,
            gallery_images,
        })
    }

    async fn upload_slot(&self, folder: &str, slot: &ImageSlot) -> Result<Option<String>> {
        match slot.staged() {
            Some(file) => Ok(Some(self.files.upload(&self.token, folder, file).await?)),
            None => Ok(slot.existing_url().map(str::to_string)),
        }
    }

    /// Template context for the form page
    pub fn view(&self, categories: &[Category]) -> ProjectFormView {
        let draft = &self.draft;
        ProjectFormView {
            is_edit: self.mode.is_edit(),
            id: match &self.mode {
                FormMode::Edit { id } => Some(id.clone()),
                FormMode::Create => None,
            },
            loaded: !self.mode.is_edit() || self.original.is_some(),
            phase: self.phase,
            name: draft.name.clone(),
            tagline: draft.tagline.clone(),
            description: draft.description.clone(),
            website_url: draft.website_url.clone().unwrap_or_default(),
            categories: CategoryOptionDto::options(categories, &draft.categories),
            socials: SocialPlatform::ALL
                .iter()
                .map(|platform| {
                    let link = draft.social_links.get(platform).cloned().unwrap_or_default();
                    SocialLinkView {
                        key: platform.key(),
                        label: platform.label(),
                        include: link.include,
                        url: link.url,
                    }
                })
                .collect(),
            is_hiring: draft.is_hiring,
            career_page_url: draft.career_page_url.clone(),
            is_open_for_bounty: draft.is_open_for_bounty,
            bounty_submission_url: draft.bounty_submission_url.clone(),
            is_open_source: draft.is_open_source,
            github_url: draft.github_url.clone(),
            featured: draft.featured,
            status: draft.status.as_str(),
            logo_preview: self.logo.preview().cloned(),
            hero_image_preview: self.hero_image.preview().cloned(),
            gallery: self
                .gallery
                .entries()
                .iter()
                .map(|entry| GalleryItemView {
                    url: match entry {
                        GalleryEntry::Existing { url } => Some(url.clone()),
                        GalleryEntry::Staged { .. } => None,
                    },
                    preview: entry.preview(),
                    staged: matches!(entry, GalleryEntry::Staged { .. }),
                })
                .collect(),
            removed_gallery: self.removed_gallery.clone(),
            errors: self.errors.clone(),
            accept: accept_attribute(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SocialLinkView {
    pub key: &'static str,
    pub label: &'static str,
    pub include: bool,
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct GalleryItemView {
    /// Uploaded image URL; `None` for a file staged in this request
    pub url: Option<String>,
    pub preview: Option<Preview>,
    pub staged: bool,
}

#[derive(Debug, Serialize)]
pub struct ProjectFormView {
    pub is_edit: bool,
    pub id: Option<String>,
    pub loaded: bool,
    pub phase: FormPhase,
    pub name: String,
    pub tagline: String,
    pub description: String,
    pub website_url: String,
    pub categories: Vec<CategoryOptionDto>,
    pub socials: Vec<SocialLinkView>,
    pub is_hiring: bool,
    pub career_page_url: String,
    pub is_open_for_bounty: bool,
    pub bounty_submission_url: String,
    pub is_open_source: bool,
    pub github_url: String,
    pub featured: bool,
    pub status: &'static str,
    pub logo_preview: Option<Preview>,
    pub hero_image_preview: Option<Preview>,
    pub gallery: Vec<GalleryItemView>,
    pub removed_gallery: Vec<String>,
    pub errors: FieldErrors,
    pub accept: String,
}
