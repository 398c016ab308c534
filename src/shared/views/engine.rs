//! Page rendering with minijinja.
//!
//! Templates are compiled into the binary and registered once, on first use.
//! Names ending in `.html` get HTML autoescaping.

use std::sync::OnceLock;

use axum::response::Html;
use minijinja::{Environment, Value};
use thiserror::Error;

use crate::core::error::AppError;

/// Global template environment
static VIEW_ENV: OnceLock<Environment<'static>> = OnceLock::new();

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../../../templates/layout.html")),
    ("login.html", include_str!("../../../templates/login.html")),
    ("dashboard.html", include_str!("../../../templates/dashboard.html")),
    ("settings.html", include_str!("../../../templates/settings.html")),
    (
        "projects/list.html",
        include_str!("../../../templates/projects/list.html"),
    ),
    (
        "projects/detail.html",
        include_str!("../../../templates/projects/detail.html"),
    ),
    (
        "projects/form.html",
        include_str!("../../../templates/projects/form.html"),
    ),
    (
        "videos/list.html",
        include_str!("../../../templates/videos/list.html"),
    ),
    (
        "videos/detail.html",
        include_str!("../../../templates/videos/detail.html"),
    ),
    (
        "videos/form.html",
        include_str!("../../../templates/videos/form.html"),
    ),
];

/// Errors that can occur while rendering a page
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

impl From<ViewError> for AppError {
    fn from(e: ViewError) -> Self {
        AppError::Internal(e.to_string())
    }
}

fn init_environment() -> Environment<'static> {
    let mut env = Environment::new();
    for (name, source) in TEMPLATES {
        if let Err(e) = env.add_template(name, source) {
            tracing::warn!("Failed to load template {}: {}", name, e);
        } else {
            tracing::debug!("Loaded template: {}", name);
        }
    }
    env
}

fn get_environment() -> &'static Environment<'static> {
    VIEW_ENV.get_or_init(init_environment)
}

/// Render a template with the given context.
///
/// # Example
/// ```ignore
/// let html = render("login.html", minijinja::context! { email => "" })?;
/// ```
pub fn render(template_name: &str, ctx: Value) -> Result<String, ViewError> {
    let template = get_environment()
        .get_template(template_name)
        .map_err(|_| ViewError::NotFound(template_name.to_string()))?;

    template.render(ctx).map_err(|e| {
        tracing::error!("Failed to render {}: {:#}", template_name, e);
        ViewError::RenderError(e.to_string())
    })
}

/// Render a full page
pub fn page(template_name: &str, ctx: Value) -> Result<Html<String>, AppError> {
    Ok(Html(render(template_name, ctx)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_all_templates_register() {
        let env = get_environment();
        for (name, _) in TEMPLATES {
            assert!(env.get_template(name).is_ok(), "template {} failed to load", name);
        }
    }

    #[test]
    fn test_render_escapes_html() {
        let html = render(
            "login.html",
            context! { email => "<script>alert(1)</script>", error => Option::<String>::None },
        )
        .unwrap();
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>alert"));
    }

    #[test]
    fn test_unknown_template() {
        assert!(matches!(
            render("missing.html", context! {}),
            Err(ViewError::NotFound(_))
        ));
    }
}
