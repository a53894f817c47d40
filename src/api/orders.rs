//! Order Endpoints

use serde::Serialize;

use super::{segment, ApiClient, ApiResult};
use crate::models::{Order, OrderStatus, OrderUpdate, Paginated};

#[derive(Serialize)]
struct OrderQuery {
    limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<OrderStatus>,
}

impl ApiClient {
    /// Orders, optionally narrowed to one status
    pub async fn list_orders(&self, status: Option<OrderStatus>, limit: u32) -> ApiResult<Paginated<Order>> {
        self.get_json("/orders", &OrderQuery { limit, status }).await
    }

    /// Order with its line items
    pub async fn get_order(&self, id: &str) -> ApiResult<Order> {
        self.get(&format!("/orders/{}", segment(id))).await
    }

    pub async fn update_order(&self, id: &str, update: &OrderUpdate) -> ApiResult<()> {
        self.put_json(&format!("/orders/{}", segment(id)), update).await
    }
}
