//! Catalog Sources
//!
//! Backend bindings for the lazily loaded group trees.

use async_trait::async_trait;
use lazy_forest::{Branch, BranchSource, ForestCell, Forest, ToggleOutcome};
use leptos::prelude::*;

use crate::api::{ApiClient, ApiError, ParentRef};
use crate::models::{Group, Product};
use crate::tree::CatalogForest;

/// Forest held by a page; updates after the page is gone are dropped
impl ForestCell<Group, Product> for RwSignal<Forest<Group, Product>> {
    fn update_forest<R>(&self, f: impl FnOnce(&mut Forest<Group, Product>) -> R) -> Option<R> {
        self.try_update(f)
    }
}

pub async fn toggle_group<S>(forest: RwSignal<CatalogForest>, source: &S, id: &String) -> ToggleOutcome
where
    S: BranchSource<Group, Product>,
{
    lazy_forest::toggle::<Group, Product, _, _>(&forest, source, id).await
}

/// Error banner after a toggle: a failure sets it, a successful load clears it,
/// anything else leaves it as it was
pub fn toggle_feedback(outcome: ToggleOutcome, failure: &str, current: Option<String>) -> Option<String> {
    match outcome {
        ToggleOutcome::Failed => Some(failure.to_string()),
        ToggleOutcome::Loaded { .. } => None,
        _ => current,
    }
}

pub async fn reload_roots<S>(forest: RwSignal<CatalogForest>, source: &S) -> Result<usize, S::Error>
where
    S: BranchSource<Group, Product>,
{
    lazy_forest::refresh_roots::<Group, Product, _, _>(&forest, source).await
}

pub async fn sync_catalog<S>(forest: RwSignal<CatalogForest>, source: &S) -> Result<usize, S::Error>
where
    S: BranchSource<Group, Product>,
{
    lazy_forest::sync_and_refresh::<Group, Product, _, _>(&forest, source).await
}

async fn root_groups(api: &ApiClient, limit: u32) -> Result<Vec<Group>, ApiError> {
    Ok(api.list_groups(&ParentRef::Root, limit).await?.items)
}

/// Group tree without products
pub struct GroupTreeSource {
    api: ApiClient,
    limit: u32,
}

impl GroupTreeSource {
    pub fn new(api: ApiClient, limit: u32) -> Self {
        Self { api, limit }
    }
}

#[async_trait(?Send)]
impl BranchSource<Group, Product> for GroupTreeSource {
    type Error = ApiError;

    async fn fetch_roots(&self) -> Result<Vec<Group>, ApiError> {
        root_groups(&self.api, self.limit).await
    }

    async fn fetch_branch(&self, parent: &String) -> Result<Branch<Group, Product>, ApiError> {
        let page = self.api.list_groups(&ParentRef::Group(parent.clone()), self.limit).await?;
        Ok(Branch::groups_only(page.items))
    }

    async fn sync(&self) -> Result<(), ApiError> {
        self.api.sync_products().await
    }
}

/// Group tree with the products attached to each group
pub struct ProductTreeSource {
    api: ApiClient,
    limit: u32,
}

impl ProductTreeSource {
    pub fn new(api: ApiClient, limit: u32) -> Self {
        Self { api, limit }
    }
}

#[async_trait(?Send)]
impl BranchSource<Group, Product> for ProductTreeSource {
    type Error = ApiError;

    async fn fetch_roots(&self) -> Result<Vec<Group>, ApiError> {
        root_groups(&self.api, self.limit).await
    }

    async fn fetch_branch(&self, parent: &String) -> Result<Branch<Group, Product>, ApiError> {
        let parent_ref = ParentRef::Group(parent.clone());
        let (groups, products) = futures::try_join!(
            self.api.list_groups(&parent_ref, self.limit),
            self.api.list_products_in_group(parent, self.limit),
        )?;
        Ok(Branch::new(groups.items, products.items))
    }

    async fn sync(&self) -> Result<(), ApiError> {
        self.api.sync_products().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_toggle_sets_error() {
        let error = toggle_feedback(ToggleOutcome::Failed, "Failed to load subgroups", None);
        assert_eq!(error.as_deref(), Some("Failed to load subgroups"));
    }

    #[test]
    fn test_successful_retry_clears_error() {
        let error = toggle_feedback(ToggleOutcome::Failed, "Failed to load subgroups", None);
        let error = toggle_feedback(ToggleOutcome::Loaded { groups: 2, items: 0 }, "Failed to load subgroups", error);
        assert_eq!(error, None);
    }

    #[test]
    fn test_local_toggles_keep_error() {
        let current = Some("Failed to load group contents".to_string());
        for outcome in [
            ToggleOutcome::Expanded,
            ToggleOutcome::Collapsed,
            ToggleOutcome::InFlight,
            ToggleOutcome::Discarded,
        ] {
            assert_eq!(toggle_feedback(outcome, "unused", current.clone()), current);
        }
    }
}
