mod project;

pub use project::{Project, ProjectStatus, SocialPlatform};
