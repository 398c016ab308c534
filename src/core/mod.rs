//! Core layer - configuration, errors, extractors, middleware and routing

pub mod config;
pub mod error;
pub mod extractor;
pub mod middleware;
pub mod router;
