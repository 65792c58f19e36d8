use serde_json::Value;

use crate::api::{ApiClient, ApiError, ApiRequest};
use crate::models::{ConfigUpdate, Query};

impl ApiClient {
    /// Platform settings (top-up minimum, withdraw maximum, commission rates).
    pub async fn config(&self) -> Result<Value, ApiError> {
        self.send_json(ApiRequest::get("/admin/config").fallback("Failed to get config"))
            .await
    }

    pub async fn update_config(&self, update: &ConfigUpdate) -> Result<Value, ApiError> {
        let request = ApiRequest::patch("/admin/config")
            .with_json(update)?
            .fallback("Failed to update config");
        self.send_json(request).await
    }

    pub async fn dashboard_stats(&self) -> Result<Value, ApiError> {
        self.send_json(ApiRequest::get("/admin/dashboard").fallback("Failed to get dashboard stats"))
            .await
    }

    pub async fn stats(&self) -> Result<Value, ApiError> {
        self.send_json(ApiRequest::get("/admin/stats").fallback("Failed to get stats"))
            .await
    }

    pub async fn system_health(&self) -> Result<Value, ApiError> {
        self.send_json(ApiRequest::get("/admin/health").fallback("Failed to get system health"))
            .await
    }

    /// Admin action log. Filters: `level`, `page`, `limit`.
    pub async fn admin_logs(&self, query: &Query) -> Result<Value, ApiError> {
        self.send_json(
            ApiRequest::get("/admin/logs")
                .with_query(query)
                .fallback("Failed to get admin logs"),
        )
        .await
    }
}
