use serde_json::Value;

use crate::api::{ApiClient, ApiError, ApiRequest};
use crate::models::{AdminNote, Query, StatusChange};

use super::segment;

impl ApiClient {
    /// List livestreams. Filters: `status` (live/ended/scheduled), `streamerId`, `page`, `limit`.
    pub async fn streams(&self, query: &Query) -> Result<Value, ApiError> {
        self.send_json(
            ApiRequest::get("/stream/admin")
                .with_query(query)
                .fallback("Failed to get streams"),
        )
        .await
    }

    /// Force-end a live stream.
    pub async fn end_stream(&self, stream_id: &str, note: &AdminNote) -> Result<Value, ApiError> {
        let request = ApiRequest::delete(format!("/stream/{}", segment(stream_id)))
            .with_json(note)?
            .fallback("Failed to end stream");
        self.send_json(request).await
    }

    pub async fn stream_analytics(&self, query: &Query) -> Result<Value, ApiError> {
        self.send_json(
            ApiRequest::get("/stream/admin/analytics")
                .with_query(query)
                .fallback("Failed to get stream analytics"),
        )
        .await
    }

    pub async fn stream(&self, stream_id: &str) -> Result<Value, ApiError> {
        self.send_json(
            ApiRequest::get(format!("/stream/admin/{}", segment(stream_id)))
                .fallback("Failed to get stream details"),
        )
        .await
    }

    pub async fn update_stream_status(
        &self,
        stream_id: &str,
        change: &StatusChange,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::patch(format!("/stream/admin/{}/status", segment(stream_id)))
            .with_json(change)?
            .fallback("Failed to update stream status");
        self.send_json(request).await
    }
}
