use serde_json::Value;

use crate::api::{ApiClient, ApiError, ApiRequest};
use crate::models::{Query, RoleUpdate, StatusUpdate};

use super::segment;

impl ApiClient {
    /// List users. Filters: `email`, `role`, `page`, `limit`.
    pub async fn users(&self, query: &Query) -> Result<Value, ApiError> {
        self.send_json(
            ApiRequest::get("/admin/users")
                .with_query(query)
                .fallback("Failed to get users list"),
        )
        .await
    }

    pub async fn user(&self, user_id: &str) -> Result<Value, ApiError> {
        self.send_json(
            ApiRequest::get(format!("/admin/users/{}", segment(user_id)))
                .fallback("Failed to get user details"),
        )
        .await
    }

    pub async fn update_user_role(&self, user_id: &str, role: &str) -> Result<Value, ApiError> {
        let request = ApiRequest::patch(format!("/admin/users/{}/role", segment(user_id)))
            .with_json(&RoleUpdate {
                role: role.to_string(),
            })?
            .fallback("Failed to update user role");
        self.send_json(request).await
    }

    /// Activate or deactivate an account (`active` / `inactive`).
    pub async fn update_user_status(&self, user_id: &str, status: &str) -> Result<Value, ApiError> {
        let request = ApiRequest::patch(format!("/admin/users/{}/status", segment(user_id)))
            .with_json(&StatusUpdate {
                status: status.to_string(),
            })?
            .fallback("Failed to update user status");
        self.send_json(request).await
    }
}
