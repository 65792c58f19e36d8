//! Top-up and withdraw request review.

use serde_json::Value;

use crate::api::{ApiClient, ApiError, ApiRequest};
use crate::models::{Query, WalletReview};

use super::segment;

impl ApiClient {
    pub async fn topup_requests(&self, query: &Query) -> Result<Value, ApiError> {
        self.send_json(
            ApiRequest::get("/admin/topup-requests")
                .with_query(query)
                .fallback("Failed to get topup requests"),
        )
        .await
    }

    /// Approve or reject a top-up request.
    pub async fn review_topup_request(
        &self,
        request_id: &str,
        review: &WalletReview,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::patch(format!("/wallet/topup/{}/status", segment(request_id)))
            .with_json(review)?
            .fallback("Failed to update topup request status");
        self.send_json(request).await
    }

    pub async fn withdraw_requests(&self, query: &Query) -> Result<Value, ApiError> {
        self.send_json(
            ApiRequest::get("/admin/withdraw-requests")
                .with_query(query)
                .fallback("Failed to get withdraw requests"),
        )
        .await
    }

    /// Approve or reject a withdraw request.
    pub async fn review_withdraw_request(
        &self,
        request_id: &str,
        review: &WalletReview,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::patch(format!("/wallet/withdraw/{}/status", segment(request_id)))
            .with_json(review)?
            .fallback("Failed to update withdraw request status");
        self.send_json(request).await
    }

    pub async fn topup_request(&self, request_id: &str) -> Result<Value, ApiError> {
        self.send_json(
            ApiRequest::get(format!("/wallet/topup/{}", segment(request_id)))
                .fallback("Failed to get topup request details"),
        )
        .await
    }

    pub async fn withdraw_request(&self, request_id: &str) -> Result<Value, ApiError> {
        self.send_json(
            ApiRequest::get(format!("/wallet/withdraw/{}", segment(request_id)))
                .fallback("Failed to get withdraw request details"),
        )
        .await
    }
}
