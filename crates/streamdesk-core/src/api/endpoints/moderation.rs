use serde_json::Value;

use crate::api::{ApiClient, ApiError, ApiRequest};
use crate::models::{AdminNote, BanRequest, Query, ReportAction, WarnRequest};

use super::segment;

impl ApiClient {
    /// User reports. Filters: `type` (user/stream/chat), `status`, `page`, `limit`.
    pub async fn reports(&self, query: &Query) -> Result<Value, ApiError> {
        self.send_json(
            ApiRequest::get("/admin/reports")
                .with_query(query)
                .fallback("Failed to get reports"),
        )
        .await
    }

    pub async fn handle_report(&self, report_id: &str, action: &ReportAction) -> Result<Value, ApiError> {
        let request = ApiRequest::patch(format!("/admin/reports/{}", segment(report_id)))
            .with_json(action)?
            .fallback("Failed to handle report");
        self.send_json(request).await
    }

    pub async fn banned_users(&self, query: &Query) -> Result<Value, ApiError> {
        self.send_json(
            ApiRequest::get("/admin/banned-users")
                .with_query(query)
                .fallback("Failed to get banned users"),
        )
        .await
    }

    pub async fn unban_user(&self, user_id: &str, note: &AdminNote) -> Result<Value, ApiError> {
        let request = ApiRequest::patch(format!("/admin/users/{}/unban", segment(user_id)))
            .with_json(note)?
            .fallback("Failed to unban user");
        self.send_json(request).await
    }

    pub async fn ban_user(&self, user_id: &str, ban: &BanRequest) -> Result<Value, ApiError> {
        let request = ApiRequest::patch(format!("/admin/users/{}/ban", segment(user_id)))
            .with_json(ban)?
            .fallback("Failed to ban user");
        self.send_json(request).await
    }

    pub async fn warn_user(&self, user_id: &str, warning: &WarnRequest) -> Result<Value, ApiError> {
        let request = ApiRequest::patch(format!("/admin/users/{}/warn", segment(user_id)))
            .with_json(warning)?
            .fallback("Failed to warn user");
        self.send_json(request).await
    }

    pub async fn moderation_stats(&self) -> Result<Value, ApiError> {
        self.send_json(
            ApiRequest::get("/admin/moderation/stats").fallback("Failed to get moderation stats"),
        )
        .await
    }

    pub async fn moderation_history(&self, user_id: &str, query: &Query) -> Result<Value, ApiError> {
        self.send_json(
            ApiRequest::get(format!("/admin/users/{}/moderation-history", segment(user_id)))
                .with_query(query)
                .fallback("Failed to get user moderation history"),
        )
        .await
    }
}
