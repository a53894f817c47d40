//! Group Endpoints

use serde::{Serialize, Serializer};

use super::{segment, ApiClient, ApiResult};
use crate::models::{Group, Paginated};

/// Level of the group tree to list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParentRef {
    Root,
    Group(String),
}

impl Serialize for ParentRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // The backend reads the literal string "null" as "no parent"
            ParentRef::Root => serializer.serialize_str("null"),
            ParentRef::Group(id) => serializer.serialize_str(id),
        }
    }
}

#[derive(Serialize)]
struct GroupQuery<'a> {
    parent_id: &'a ParentRef,
    limit: u32,
}

impl ApiClient {
    pub async fn list_groups(&self, parent: &ParentRef, limit: u32) -> ApiResult<Paginated<Group>> {
        self.get_json("/groups", &GroupQuery { parent_id: parent, limit }).await
    }

    pub async fn get_group(&self, id: &str) -> ApiResult<Group> {
        self.get(&format!("/groups/{}", segment(id))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_marker_serializes_as_null_string() {
        let query = GroupQuery { parent_id: &ParentRef::Root, limit: 100 };
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            serde_json::json!({ "parent_id": "null", "limit": 100 })
        );

        let child = ParentRef::Group("g1".to_string());
        assert_eq!(serde_json::to_value(&child).unwrap(), serde_json::json!("g1"));
    }
}
