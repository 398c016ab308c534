//! Modules layer - Infrastructure components for external integrations
//!
//! Contains the client for the directory REST API and its storage endpoints.

pub mod api;
