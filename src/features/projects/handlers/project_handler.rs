use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use minijinja::context;
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::auth::guards::redirect_to_login;
use crate::features::auth::model::CurrentSession;
use crate::features::forms::FormFields;
use crate::features::projects::form::ProjectForm;
use crate::features::projects::services::ProjectService;
use crate::shared::constants::PROJECTS_ROUTE;
use crate::shared::views::page;

// ============================================================================
// List / Detail
// ============================================================================

/// List all projects
pub async fn list_projects(
    State(service): State<Arc<ProjectService>>,
    session: CurrentSession,
) -> Result<Html<String>> {
    let projects = service.list(&session.token).await?;
    page(
        "projects/list.html",
        context! {
            user => session.user,
            active => "projects",
            projects => projects,
        },
    )
}

/// Show one project with its videos
pub async fn show_project(
    State(service): State<Arc<ProjectService>>,
    session: CurrentSession,
    Path(id): Path<String>,
) -> Result<Html<String>> {
    let project = service.get(&session.token, &id).await?;
    let videos = service.videos_of(&session.token, &id).await;
    page(
        "projects/detail.html",
        context! {
            user => session.user,
            active => "projects",
            project => project,
            videos => videos,
        },
    )
}

// ============================================================================
// Create / Edit
// ============================================================================

pub async fn new_project_page(
    State(service): State<Arc<ProjectService>>,
    session: CurrentSession,
) -> Result<Response> {
    let form = service.new_form(&session.token);
    render_form(&service, &session, &form, StatusCode::OK).await
}

pub async fn create_project(
    State(service): State<Arc<ProjectService>>,
    session: CurrentSession,
    multipart: Multipart,
) -> Result<Response> {
    let mut fields = FormFields::from_multipart(multipart).await?;
    let mut form = service.new_form(&session.token);
    form.apply_fields(&mut fields).await;
    submit_form(&service, &session, form).await
}

pub async fn edit_project_page(
    State(service): State<Arc<ProjectService>>,
    session: CurrentSession,
    Path(id): Path<String>,
) -> Result<Response> {
    let form = service.edit_form(&session.token, &id).await;
    render_form(&service, &session, &form, StatusCode::OK).await
}

pub async fn update_project(
    State(service): State<Arc<ProjectService>>,
    session: CurrentSession,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Response> {
    let mut fields = FormFields::from_multipart(multipart).await?;
    let mut form = service.edit_form(&session.token, &id).await;
    form.apply_fields(&mut fields).await;
    submit_form(&service, &session, form).await
}

/// Delete a project (confirmed in the browser) and return to the list
pub async fn delete_project(
    State(service): State<Arc<ProjectService>>,
    session: CurrentSession,
    Path(id): Path<String>,
) -> Result<Response> {
    match service.delete(&session.token, &id).await {
        Ok(()) => Ok(Redirect::to(PROJECTS_ROUTE).into_response()),
        Err(AppError::Unauthorized(_)) => Ok(redirect_to_login(true)),
        Err(e) => Err(e),
    }
}

/// Submit the form; on failure re-render it with errors and notification
async fn submit_form(
    service: &ProjectService,
    session: &CurrentSession,
    mut form: ProjectForm,
) -> Result<Response> {
    match form.submit().await {
        Ok(outcome) => Ok(Redirect::to(outcome.redirect_to).into_response()),
        Err(AppError::Unauthorized(_)) => Ok(redirect_to_login(true)),
        Err(e) => render_form(service, session, &form, e.status_code()).await,
    }
}

async fn render_form(
    service: &ProjectService,
    session: &CurrentSession,
    form: &ProjectForm,
    status: StatusCode,
) -> Result<Response> {
    let categories = service.category_options(&session.token).await;
    let html = page(
        "projects/form.html",
        context! {
            user => session.user,
            active => "projects",
            notification => form.notification(),
            form => form.view(&categories),
        },
    )?;
    Ok((status, html).into_response())
}
