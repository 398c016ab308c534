use std::collections::BTreeSet;

use serde::Serialize;

use crate::features::categories::models::Category;

/// One checkbox in the project form's category picker
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryOptionDto {
    pub name: String,
    pub color: Option<String>,
    pub selected: bool,
}

impl CategoryOptionDto {
    /// Build picker options from the fetched categories.
    ///
    /// Selected names the API did not return (for example when the category
    /// list failed to load) are appended so a re-rendered form never drops
    /// the user's selection.
    pub fn options(categories: &[Category], selected: &BTreeSet<String>) -> Vec<Self> {
        let mut options: Vec<Self> = categories
            .iter()
            .map(|c| Self {
                name: c.name.clone(),
                color: c.color.clone(),
                selected: selected.contains(&c.name),
            })
            .collect();

        for name in selected {
            if !categories.iter().any(|c| &c.name == name) {
                options.push(Self {
                    name: name.clone(),
                    color: None,
                    selected: true,
                });
            }
        }

        options
    }
}

/// Category row on the dashboard
#[derive(Debug, Clone, Serialize)]
pub struct CategorySummaryDto {
    pub name: String,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub project_count: i64,
}

impl From<Category> for CategorySummaryDto {
    fn from(c: Category) -> Self {
        Self {
            name: c.name,
            icon: c.icon,
            color: c.color,
            project_count: c.project_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::category;

    #[test]
    fn test_options_mark_selected_and_keep_unknown_selection() {
        let categories = vec![category("DeFi"), category("NFT")];
        let selected: BTreeSet<String> = ["NFT".to_string(), "Gaming".to_string()].into();

        let options = CategoryOptionDto::options(&categories, &selected);

        let names: Vec<_> = options.iter().map(|o| (o.name.as_str(), o.selected)).collect();
        assert_eq!(names, vec![("DeFi", false), ("NFT", true), ("Gaming", true)]);
    }
}
