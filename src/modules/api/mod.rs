//! Directory API integration
//!
//! The console owns no data: every read and write goes through
//! [`AdminApi`], implemented over HTTP by [`RestApiClient`].

mod admin_api;
mod rest_client;

pub use admin_api::AdminApi;
pub use rest_client::RestApiClient;
