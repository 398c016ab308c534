use std::sync::Arc;

use tracing::error;

use crate::features::dashboard::dtos::DashboardStatsDto;
use crate::features::forms::{FeaturedCounts, FeaturedKind};
use crate::modules::api::AdminApi;

/// Service for dashboard figures
pub struct DashboardService {
    api: Arc<dyn AdminApi>,
}

impl DashboardService {
    pub fn new(api: Arc<dyn AdminApi>) -> Self {
        Self { api }
    }

    /// Aggregate counts from the list endpoints.
    ///
    /// All lookups run concurrently. Each failure is logged and its section
    /// rendered as empty; featured counts fall back to counting the lists.
    pub async fn get_stats(&self, token: &str) -> DashboardStatsDto {
        let (projects, videos, categories, featured) = tokio::join!(
            self.api.list_projects(token),
            self.api.list_videos(token),
            self.api.list_categories(token),
            self.api.featured_counts(token),
        );

        let projects = projects.unwrap_or_else(|e| {
            error!("Failed to load projects for dashboard: {}", e);
            Vec::new()
        });
        let videos = videos.unwrap_or_else(|e| {
            error!("Failed to load videos for dashboard: {}", e);
            Vec::new()
        });
        let mut categories = categories.unwrap_or_else(|e| {
            error!("Failed to load categories for dashboard: {}", e);
            Vec::new()
        });
        let featured = featured.unwrap_or_else(|e| {
            error!("Failed to load featured counts for dashboard: {}", e);
            FeaturedCounts {
                projects: projects.iter().filter(|p| p.featured).count() as u64,
                videos: videos.iter().filter(|v| v.featured).count() as u64,
            }
        });

        categories.sort_by(|a, b| {
            b.project_count
                .cmp(&a.project_count)
                .then_with(|| a.name.cmp(&b.name))
        });

        DashboardStatsDto {
            total_projects: projects.len(),
            published_projects: projects.iter().filter(|p| p.is_published()).count(),
            featured_projects: featured.projects,
            featured_project_slots: featured.remaining(FeaturedKind::Projects),
            total_videos: videos.len(),
            featured_videos: featured.videos,
            featured_video_slots: featured.remaining(FeaturedKind::Videos),
            categories: categories.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::projects::models::ProjectStatus;
    use crate::shared::test_helpers::{
        category, sample_project, sample_video, FakeApi, TEST_TOKEN,
    };

    #[tokio::test]
    async fn test_stats_from_lists_and_featured_counts() {
        let mut published = sample_project("p1", "Foo");
        published.status = ProjectStatus::Published;
        let draft = sample_project("p2", "Bar");
        let mut defi = category("DeFi");
        defi.project_count = 2;

        let api = Arc::new(
            FakeApi::new()
                .with_video(sample_video("v1", "Launch", &published))
                .with_project(published)
                .with_project(draft)
                .with_categories(vec![category("Gaming"), defi])
                .with_featured(1, 3),
        );

        let stats = DashboardService::new(api).get_stats(TEST_TOKEN).await;

        assert_eq!(stats.total_projects, 2);
        assert_eq!(stats.published_projects, 1);
        assert_eq!(stats.featured_project_slots, 2);
        assert_eq!(stats.total_videos, 1);
        assert_eq!(stats.featured_video_slots, 0);
        assert_eq!(stats.categories[0].name, "DeFi");
    }

    #[tokio::test]
    async fn test_list_failures_render_empty() {
        let api = Arc::new(FakeApi::new().failing_lists().with_featured(2, 0));

        let stats = DashboardService::new(api).get_stats(TEST_TOKEN).await;

        assert_eq!(stats.total_projects, 0);
        assert!(stats.categories.is_empty());
        assert_eq!(stats.featured_projects, 2);
        assert_eq!(stats.featured_project_slots, 1);
    }
}
