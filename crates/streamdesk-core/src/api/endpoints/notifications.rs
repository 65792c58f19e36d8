use serde_json::Value;

use crate::api::{ApiClient, ApiError, ApiRequest};
use crate::models::{BroadcastInput, NotificationInput, Query};

use super::segment;

impl ApiClient {
    /// Send a notification to a single user.
    pub async fn create_notification(&self, notification: &NotificationInput) -> Result<Value, ApiError> {
        let request = ApiRequest::post("/notifications")
            .with_json(notification)?
            .fallback("Failed to create notification");
        self.send_json(request).await
    }

    /// Send a notification to every user, or to `target_user_ids` when set.
    pub async fn broadcast_notification(&self, broadcast: &BroadcastInput) -> Result<Value, ApiError> {
        let request = ApiRequest::post("/notifications/broadcast")
            .with_json(broadcast)?
            .fallback("Failed to create broadcast notification");
        self.send_json(request).await
    }

    pub async fn notification_stats(&self) -> Result<Value, ApiError> {
        self.send_json(
            ApiRequest::get("/notifications/admin/stats")
                .fallback("Failed to get notification stats"),
        )
        .await
    }

    pub async fn notifications(&self, query: &Query) -> Result<Value, ApiError> {
        self.send_json(
            ApiRequest::get("/notifications/admin/all")
                .with_query(query)
                .fallback("Failed to get notifications"),
        )
        .await
    }

    pub async fn delete_notification(&self, notification_id: &str) -> Result<Value, ApiError> {
        self.send_json(
            ApiRequest::delete(format!("/notifications/{}", segment(notification_id)))
                .fallback("Failed to delete notification"),
        )
        .await
    }

    pub async fn mark_notification_read(&self, notification_id: &str) -> Result<Value, ApiError> {
        self.send_json(
            ApiRequest::patch(format!("/notifications/{}/read", segment(notification_id)))
                .fallback("Failed to mark notification as read"),
        )
        .await
    }
}
