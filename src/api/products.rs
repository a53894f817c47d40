//! Product Endpoints

use reqwest::multipart::{Form, Part};
use serde::Serialize;

use super::{segment, ApiClient, ApiError, ApiResult};
use crate::models::{Paginated, Product, ProductUpdate, UploadedFile};

#[derive(Serialize, Default)]
struct ProductQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    group_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<&'a str>,
    limit: u32,
}

impl ApiClient {
    /// Products attached directly to a group
    pub async fn list_products_in_group(&self, group_id: &str, limit: u32) -> ApiResult<Paginated<Product>> {
        let query = ProductQuery { group_id: Some(group_id), limit, ..Default::default() };
        self.get_json("/products", &query).await
    }

    /// Server-side text search across all products
    pub async fn search_products(&self, text: &str, limit: u32) -> ApiResult<Paginated<Product>> {
        let query = ProductQuery { search: Some(text), limit, ..Default::default() };
        self.get_json("/products", &query).await
    }

    pub async fn get_product(&self, id: &str) -> ApiResult<Product> {
        self.get(&format!("/products/{}", segment(id))).await
    }

    pub async fn update_product(&self, id: &str, update: &ProductUpdate) -> ApiResult<()> {
        update.validate().map_err(ApiError::Invalid)?;
        self.put_json(&format!("/products/{}", segment(id)), update).await
    }

    /// Pull groups and products from iiko into the backend
    pub async fn sync_products(&self) -> ApiResult<()> {
        self.post_empty("/products/sync").await
    }

    /// Upload an image and return its public URL
    pub async fn upload_image(&self, file_name: &str, mime: &str, bytes: Vec<u8>) -> ApiResult<String> {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime)
            .map_err(|e| ApiError::Invalid(e.to_string()))?;
        let form = Form::new().part("file", part);
        let uploaded: UploadedFile = self.post_multipart("/files/upload", form).await?;
        Ok(uploaded.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_omits_unset_filters() {
        let query = ProductQuery { group_id: Some("g2"), limit: 100, ..Default::default() };
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            serde_json::json!({ "group_id": "g2", "limit": 100 })
        );
    }
}
