//! User Endpoints

use serde::Serialize;

use super::{segment, ApiClient, ApiResult};
use crate::models::{Paginated, User, UserUpdate};

/// Activation filter on the users list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveFilter {
    All,
    Active,
    Inactive,
}

impl ActiveFilter {
    pub const ALL: [ActiveFilter; 3] = [ActiveFilter::All, ActiveFilter::Active, ActiveFilter::Inactive];

    pub fn label(&self) -> &'static str {
        match self {
            ActiveFilter::All => "All",
            ActiveFilter::Active => "Active",
            ActiveFilter::Inactive => "Inactive",
        }
    }

    fn as_param(&self) -> Option<bool> {
        match self {
            ActiveFilter::All => None,
            ActiveFilter::Active => Some(true),
            ActiveFilter::Inactive => Some(false),
        }
    }
}

#[derive(Serialize)]
struct UserQuery {
    limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_active: Option<bool>,
}

impl ApiClient {
    pub async fn list_users(&self, filter: ActiveFilter, limit: u32) -> ApiResult<Paginated<User>> {
        let query = UserQuery { limit, is_active: filter.as_param() };
        self.get_json("/users", &query).await
    }

    pub async fn get_user(&self, id: &str) -> ApiResult<User> {
        self.get(&format!("/users/{}", segment(id))).await
    }

    pub async fn update_user(&self, id: &str, update: &UserUpdate) -> ApiResult<()> {
        self.put_json(&format!("/users/{}", segment(id)), update).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_maps_to_is_active_param() {
        let all = UserQuery { limit: 100, is_active: ActiveFilter::All.as_param() };
        assert_eq!(serde_json::to_value(&all).unwrap(), serde_json::json!({ "limit": 100 }));

        let inactive = UserQuery { limit: 100, is_active: ActiveFilter::Inactive.as_param() };
        assert_eq!(
            serde_json::to_value(&inactive).unwrap(),
            serde_json::json!({ "limit": 100, "is_active": false })
        );
    }
}
