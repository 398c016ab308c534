//! Features layer - one module per console area

pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod files;
pub mod forms;
pub mod projects;
pub mod videos;
