use std::sync::Arc;

use tracing::error;

use crate::core::error::Result;
use crate::features::categories::models::Category;
use crate::modules::api::AdminApi;

/// Service for category lookups
pub struct CategoryService {
    api: Arc<dyn AdminApi>,
}

impl CategoryService {
    pub fn new(api: Arc<dyn AdminApi>) -> Self {
        Self { api }
    }

    /// List all categories, sorted by name
    pub async fn list(&self, token: &str) -> Result<Vec<Category>> {
        let mut categories = self.api.list_categories(token).await?;
        categories.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(categories)
    }

    /// List categories for a background fetch; failures are logged and
    /// rendered as an empty list.
    pub async fn list_or_empty(&self, token: &str) -> Vec<Category> {
        match self.list(token).await {
            Ok(categories) => categories,
            Err(e) => {
                error!("Failed to load categories: {}", e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{category, FakeApi, TEST_TOKEN};

    #[tokio::test]
    async fn test_list_sorted_by_name() {
        let api = Arc::new(FakeApi::new().with_categories(vec![
            category("nft"),
            category("DeFi"),
            category("Gaming"),
        ]));
        let service = CategoryService::new(api);

        let names: Vec<_> = service
            .list(TEST_TOKEN)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["DeFi", "Gaming", "nft"]);
    }

    #[tokio::test]
    async fn test_list_or_empty_swallows_failures() {
        let api = Arc::new(FakeApi::new().with_categories(vec![category("DeFi")]).failing_lists());
        let service = CategoryService::new(api);

        assert!(service.list_or_empty(TEST_TOKEN).await.is_empty());
    }
}
