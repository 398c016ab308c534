/// Maximum number of entities of one kind that may be featured at once
pub const FEATURED_LIMIT: u64 = 3;

/// Minimum length of a project description
pub const MIN_DESCRIPTION_LENGTH: usize = 10;

/// Cookie carrying the bearer token issued by the directory API
pub const SESSION_COOKIE: &str = "ecosystem_admin_session";

// =============================================================================
// ROUTES
// =============================================================================

pub const LOGIN_ROUTE: &str = "/login";

pub const DASHBOARD_ROUTE: &str = "/dashboard";

pub const PROJECTS_ROUTE: &str = "/projects";

pub const VIDEOS_ROUTE: &str = "/videos";
