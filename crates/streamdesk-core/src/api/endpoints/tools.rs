//! System maintenance: caches, database, logs, backups.

use serde_json::Value;

use crate::api::{ApiClient, ApiError, ApiRequest};
use crate::models::{BackupRequest, CacheClear, DatabaseOptimize, Query, RedisClear, RestoreRequest};

impl ApiClient {
    pub async fn clear_system_cache(&self, options: &CacheClear) -> Result<Value, ApiError> {
        let request = ApiRequest::post("/admin/tools/cache/clear")
            .with_json(options)?
            .fallback("Failed to clear system cache");
        self.send_json(request).await
    }

    /// Health as reported by the tools service (distinct from `system_health`).
    pub async fn tools_health(&self) -> Result<Value, ApiError> {
        self.send_json(ApiRequest::get("/admin/tools/health").fallback("Failed to get system health"))
            .await
    }

    pub async fn database_stats(&self) -> Result<Value, ApiError> {
        self.send_json(
            ApiRequest::get("/admin/tools/database/stats").fallback("Failed to get database stats"),
        )
        .await
    }

    pub async fn optimize_database(&self, options: &DatabaseOptimize) -> Result<Value, ApiError> {
        let request = ApiRequest::post("/admin/tools/database/optimize")
            .with_json(options)?
            .fallback("Failed to optimize database");
        self.send_json(request).await
    }

    /// Server logs. Filters: `level`, `page`, `limit`, `startDate`, `endDate`.
    pub async fn system_logs(&self, query: &Query) -> Result<Value, ApiError> {
        self.send_json(
            ApiRequest::get("/admin/tools/logs")
                .with_query(query)
                .fallback("Failed to get system logs"),
        )
        .await
    }

    pub async fn export_system_logs(&self, query: &Query) -> Result<Vec<u8>, ApiError> {
        self.send_bytes(
            ApiRequest::get("/admin/tools/logs/export")
                .with_query(query)
                .fallback("Failed to export system logs"),
        )
        .await
    }

    pub async fn redis_stats(&self) -> Result<Value, ApiError> {
        self.send_json(ApiRequest::get("/admin/tools/redis/stats").fallback("Failed to get Redis stats"))
            .await
    }

    pub async fn clear_redis(&self, options: &RedisClear) -> Result<Value, ApiError> {
        let request = ApiRequest::post("/admin/tools/redis/clear")
            .with_json(options)?
            .fallback("Failed to clear Redis cache");
        self.send_json(request).await
    }

    /// Query: `period` (1h/6h/24h/7d).
    pub async fn server_performance(&self, query: &Query) -> Result<Value, ApiError> {
        self.send_json(
            ApiRequest::get("/admin/tools/performance")
                .with_query(query)
                .fallback("Failed to get server performance"),
        )
        .await
    }

    pub async fn backup_database(&self, options: &BackupRequest) -> Result<Value, ApiError> {
        let request = ApiRequest::post("/admin/tools/database/backup")
            .with_json(options)?
            .fallback("Failed to backup database");
        self.send_json(request).await
    }

    pub async fn restore_database(&self, restore: &RestoreRequest) -> Result<Value, ApiError> {
        let request = ApiRequest::post("/admin/tools/database/restore")
            .with_json(restore)?
            .fallback("Failed to restore database");
        self.send_json(request).await
    }

    pub async fn audit_logs(&self, query: &Query) -> Result<Value, ApiError> {
        self.send_json(
            ApiRequest::get("/admin/tools/audit-logs")
                .with_query(query)
                .fallback("Failed to get audit logs"),
        )
        .await
    }
}
