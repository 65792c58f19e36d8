use serde_json::Value;

use crate::api::{ApiClient, ApiError, ApiRequest};
use crate::models::{AdminNote, FlagRequest, ManualTransaction, Query, StatusChange};

use super::segment;

impl ApiClient {
    /// All wallet transactions. Filters: `type`, `status`, `userId`,
    /// `startDate`, `endDate`, `page`, `limit`.
    pub async fn transactions(&self, query: &Query) -> Result<Value, ApiError> {
        self.send_json(
            ApiRequest::get("/wallet/transactions/all")
                .with_query(query)
                .fallback("Failed to get all transactions"),
        )
        .await
    }

    pub async fn transaction(&self, transaction_id: &str) -> Result<Value, ApiError> {
        self.send_json(
            ApiRequest::get(format!("/wallet/transactions/{}", segment(transaction_id)))
                .fallback("Failed to get transaction details"),
        )
        .await
    }

    pub async fn update_transaction_status(
        &self,
        transaction_id: &str,
        change: &StatusChange,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::patch(format!("/wallet/transactions/{}/status", segment(transaction_id)))
            .with_json(change)?
            .fallback("Failed to update transaction status");
        self.send_json(request).await
    }

    pub async fn transaction_stats(&self, query: &Query) -> Result<Value, ApiError> {
        self.send_json(
            ApiRequest::get("/wallet/transactions/stats")
                .with_query(query)
                .fallback("Failed to get transaction stats"),
        )
        .await
    }

    pub async fn export_transactions(&self, query: &Query) -> Result<Vec<u8>, ApiError> {
        self.send_bytes(
            ApiRequest::get("/wallet/transactions/export")
                .with_query(query)
                .fallback("Failed to export transactions"),
        )
        .await
    }

    /// Filters: `minAmount`, `type`, `page`, `limit`.
    pub async fn suspicious_transactions(&self, query: &Query) -> Result<Value, ApiError> {
        self.send_json(
            ApiRequest::get("/wallet/transactions/suspicious")
                .with_query(query)
                .fallback("Failed to get suspicious transactions"),
        )
        .await
    }

    pub async fn flag_transaction(&self, transaction_id: &str, flag: &FlagRequest) -> Result<Value, ApiError> {
        let request = ApiRequest::post(format!("/wallet/transactions/{}/flag", segment(transaction_id)))
            .with_json(flag)?
            .fallback("Failed to flag transaction");
        self.send_json(request).await
    }

    pub async fn unflag_transaction(&self, transaction_id: &str, note: &AdminNote) -> Result<Value, ApiError> {
        let request = ApiRequest::delete(format!("/wallet/transactions/{}/flag", segment(transaction_id)))
            .with_json(note)?
            .fallback("Failed to unflag transaction");
        self.send_json(request).await
    }

    pub async fn user_transactions(&self, user_id: &str, query: &Query) -> Result<Value, ApiError> {
        self.send_json(
            ApiRequest::get(format!("/wallet/users/{}/transactions", segment(user_id)))
                .with_query(query)
                .fallback("Failed to get user transaction history"),
        )
        .await
    }

    pub async fn create_manual_transaction(&self, transaction: &ManualTransaction) -> Result<Value, ApiError> {
        let request = ApiRequest::post("/wallet/transactions/manual")
            .with_json(transaction)?
            .fallback("Failed to create manual transaction");
        self.send_json(request).await
    }

    pub async fn reverse_transaction(&self, transaction_id: &str, note: &AdminNote) -> Result<Value, ApiError> {
        let request = ApiRequest::post(format!("/wallet/transactions/{}/reverse", segment(transaction_id)))
            .with_json(note)?
            .fallback("Failed to reverse transaction");
        self.send_json(request).await
    }
}
