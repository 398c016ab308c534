use serde::Serialize;

use crate::features::categories::dtos::CategorySummaryDto;

/// Figures shown on the dashboard
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardStatsDto {
    pub total_projects: usize,
    pub published_projects: usize,
    pub featured_projects: u64,
    /// Featured project slots still free
    pub featured_project_slots: u64,
    pub total_videos: usize,
    pub featured_videos: u64,
    pub featured_video_slots: u64,
    pub categories: Vec<CategorySummaryDto>,
}
