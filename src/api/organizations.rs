//! Organization Endpoints

use serde::Serialize;

use super::{segment, ApiClient, ApiResult};
use crate::models::{Organization, OrganizationUpdate, Paginated};

#[derive(Serialize)]
struct OrganizationQuery {
    limit: u32,
}

impl ApiClient {
    pub async fn list_organizations(&self, limit: u32) -> ApiResult<Paginated<Organization>> {
        self.get_json("/organizations", &OrganizationQuery { limit }).await
    }

    pub async fn get_organization(&self, id: &str) -> ApiResult<Organization> {
        self.get(&format!("/organizations/{}", segment(id))).await
    }

    pub async fn update_organization(&self, id: &str, update: &OrganizationUpdate) -> ApiResult<()> {
        self.put_json(&format!("/organizations/{}", segment(id)), update).await
    }

    /// Pull organizations from iiko into the backend
    pub async fn sync_organizations(&self) -> ApiResult<()> {
        self.post_empty("/organizations/sync").await
    }
}
