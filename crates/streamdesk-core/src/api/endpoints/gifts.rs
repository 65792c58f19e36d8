use serde_json::Value;

use crate::api::{ApiClient, ApiError, ApiRequest};
use crate::models::{GiftInput, Query};

use super::segment;

impl ApiClient {
    /// List the gift catalog. Filters: `isActive`, `page`, `limit`.
    pub async fn gifts(&self, query: &Query) -> Result<Value, ApiError> {
        self.send_json(
            ApiRequest::get("/admin/gifts")
                .with_query(query)
                .fallback("Failed to get gifts"),
        )
        .await
    }

    pub async fn create_gift(&self, gift: &GiftInput) -> Result<Value, ApiError> {
        let request = ApiRequest::post("/gift/products")
            .with_json(gift)?
            .fallback("Failed to create gift");
        self.send_json(request).await
    }

    /// Partial update; unset fields are left unchanged.
    pub async fn update_gift(&self, gift_id: &str, gift: &GiftInput) -> Result<Value, ApiError> {
        let request = ApiRequest::patch(format!("/gifts/products/{}", segment(gift_id)))
            .with_json(gift)?
            .fallback("Failed to update gift");
        self.send_json(request).await
    }

    pub async fn gift(&self, gift_id: &str) -> Result<Value, ApiError> {
        self.send_json(
            ApiRequest::get(format!("/gifts/products/{}", segment(gift_id)))
                .fallback("Failed to get gift details"),
        )
        .await
    }

    pub async fn delete_gift(&self, gift_id: &str) -> Result<Value, ApiError> {
        self.send_json(
            ApiRequest::delete(format!("/gifts/products/{}", segment(gift_id)))
                .fallback("Failed to delete gift"),
        )
        .await
    }
}
