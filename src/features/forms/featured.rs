use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::error::{AppError, Result};
use crate::modules::api::AdminApi;
use crate::shared::constants::FEATURED_LIMIT;

/// Number of currently featured entities per kind, as reported by the API
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturedCounts {
    pub projects: u64,
    pub videos: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeaturedKind {
    Projects,
    Videos,
}

impl fmt::Display for FeaturedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeaturedKind::Projects => f.write_str("projects"),
            FeaturedKind::Videos => f.write_str("videos"),
        }
    }
}

impl FeaturedCounts {
    pub fn for_kind(&self, kind: FeaturedKind) -> u64 {
        match kind {
            FeaturedKind::Projects => self.projects,
            FeaturedKind::Videos => self.videos,
        }
    }

    /// Featured slots still free for `kind`
    pub fn remaining(&self, kind: FeaturedKind) -> u64 {
        FEATURED_LIMIT.saturating_sub(self.for_kind(kind))
    }
}

/// Check that one more entity of `kind` may carry the featured flag.
///
/// `already_featured` marks an edit of an entity that is featured on the
/// backend already; it occupies one of the counted slots itself.
///
/// Check-then-act: a concurrent submission can pass the same check before
/// either one is persisted.
pub async fn ensure_featured_capacity(
    api: &dyn AdminApi,
    token: &str,
    kind: FeaturedKind,
    already_featured: bool,
) -> Result<()> {
    let counts = api.featured_counts(token).await?;
    let current = counts.for_kind(kind);
    let others = if already_featured {
        current.saturating_sub(1)
    } else {
        current
    };

    if others >= FEATURED_LIMIT {
        warn!(
            "Featured limit reached for {}: {} of {} slots in use",
            kind, current, FEATURED_LIMIT
        );
        return Err(AppError::FeaturedLimit(format!(
            "Only {} {} can be featured at a time. Unfeature one before featuring another.",
            FEATURED_LIMIT, kind
        )));
    }

    info!(
        "Featured capacity ok for {}: {} of {} slots in use",
        kind, current, FEATURED_LIMIT
    );
    Ok(())
}
