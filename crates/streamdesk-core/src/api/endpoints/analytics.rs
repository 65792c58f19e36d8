//! Reporting endpoints. All accept `period` (day/week/month/year); most also
//! take `year` and `month`.

use serde_json::Value;

use crate::api::{ApiClient, ApiError, ApiRequest};
use crate::models::Query;

impl ApiClient {
    async fn analytics(&self, area: &str, query: &Query, fallback: &'static str) -> Result<Value, ApiError> {
        self.send_json(
            ApiRequest::get(format!("/admin/analytics/{}", area))
                .with_query(query)
                .fallback(fallback),
        )
        .await
    }

    pub async fn revenue_analytics(&self, query: &Query) -> Result<Value, ApiError> {
        self.analytics("revenue", query, "Failed to get revenue analytics").await
    }

    pub async fn user_analytics(&self, query: &Query) -> Result<Value, ApiError> {
        self.analytics("users", query, "Failed to get user analytics").await
    }

    pub async fn gift_analytics(&self, query: &Query) -> Result<Value, ApiError> {
        self.analytics("gifts", query, "Failed to get gift analytics").await
    }

    pub async fn stream_analytics_detail(&self, query: &Query) -> Result<Value, ApiError> {
        self.analytics("streams", query, "Failed to get stream analytics").await
    }

    pub async fn financial_analytics(&self, query: &Query) -> Result<Value, ApiError> {
        self.analytics("financial", query, "Failed to get financial analytics").await
    }

    pub async fn platform_performance(&self, query: &Query) -> Result<Value, ApiError> {
        self.analytics("performance", query, "Failed to get platform performance").await
    }

    /// Download a report file. Query: `type`, `format` (csv/excel/pdf), `period`.
    pub async fn export_analytics(&self, query: &Query) -> Result<Vec<u8>, ApiError> {
        self.send_bytes(
            ApiRequest::get("/admin/analytics/export")
                .with_query(query)
                .fallback("Failed to export analytics"),
        )
        .await
    }
}
