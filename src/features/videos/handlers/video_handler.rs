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
use crate::features::videos::form::VideoForm;
use crate::features::videos::services::VideoService;
use crate::shared::constants::VIDEOS_ROUTE;
use crate::shared::views::page;

/// List all videos
pub async fn list_videos(
    State(service): State<Arc<VideoService>>,
    session: CurrentSession,
) -> Result<Html<String>> {
    let videos = service.list(&session.token).await?;
    page(
        "videos/list.html",
        context! {
            user => session.user,
            active => "videos",
            videos => videos,
        },
    )
}

pub async fn show_video(
    State(service): State<Arc<VideoService>>,
    session: CurrentSession,
    Path(id): Path<String>,
) -> Result<Html<String>> {
    let video = service.get(&session.token, &id).await?;
    page(
        "videos/detail.html",
        context! {
            user => session.user,
            active => "videos",
            video => video,
        },
    )
}

pub async fn new_video_page(
    State(service): State<Arc<VideoService>>,
    session: CurrentSession,
) -> Result<Response> {
    let form = service.new_form(&session.token);
    render_form(&service, &session, &form, StatusCode::OK).await
}

pub async fn create_video(
    State(service): State<Arc<VideoService>>,
    session: CurrentSession,
    multipart: Multipart,
) -> Result<Response> {
    let mut fields = FormFields::from_multipart(multipart).await?;
    let mut form = service.new_form(&session.token);
    form.apply_fields(&mut fields).await;
    submit_form(&service, &session, form).await
}

pub async fn edit_video_page(
    State(service): State<Arc<VideoService>>,
    session: CurrentSession,
    Path(id): Path<String>,
) -> Result<Response> {
    let form = service.edit_form(&session.token, &id).await;
    render_form(&service, &session, &form, StatusCode::OK).await
}

pub async fn update_video(
    State(service): State<Arc<VideoService>>,
    session: CurrentSession,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Response> {
    let mut fields = FormFields::from_multipart(multipart).await?;
    let mut form = service.edit_form(&session.token, &id).await;
    form.apply_fields(&mut fields).await;
    submit_form(&service, &session, form).await
}

pub async fn delete_video(
    State(service): State<Arc<VideoService>>,
    session: CurrentSession,
    Path(id): Path<String>,
) -> Result<Response> {
    match service.delete(&session.token, &id).await {
        Ok(()) => Ok(Redirect::to(VIDEOS_ROUTE).into_response()),
        Err(AppError::Unauthorized(_)) => Ok(redirect_to_login(true)),
        Err(e) => Err(e),
    }
}

async fn submit_form(
    service: &VideoService,
    session: &CurrentSession,
    mut form: VideoForm,
) -> Result<Response> {
    match form.submit().await {
        Ok(outcome) => Ok(Redirect::to(outcome.redirect_to).into_response()),
        Err(AppError::Unauthorized(_)) => Ok(redirect_to_login(true)),
        Err(e) => render_form(service, session, &form, e.status_code()).await,
    }
}

async fn render_form(
    service: &VideoService,
    session: &CurrentSession,
    form: &VideoForm,
    status: StatusCode,
) -> Result<Response> {
    let projects = service.project_options(&session.token).await;
    let html = page(
        "videos/form.html",
        context! {
            user => session.user,
            active => "videos",
            notification => form.notification(),
            form => form.view(&projects),
        },
    )?;
    Ok((status, html).into_response())
}
