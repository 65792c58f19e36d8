//! Support chat rooms between users and staff.

use serde_json::Value;

use crate::api::{ApiClient, ApiError, ApiRequest};
use crate::models::{AdminNote, Query, RoomAssignment, SupportMessage};

use super::segment;

impl ApiClient {
    /// Filters: `status` (open/closed), `page`, `limit`.
    pub async fn support_rooms(&self, query: &Query) -> Result<Value, ApiError> {
        self.send_json(
            ApiRequest::get("/chat/support/rooms")
                .with_query(query)
                .fallback("Failed to get support rooms"),
        )
        .await
    }

    /// A user's support conversation. Cursor-paginated: `cursor`, `limit`, `order`.
    pub async fn support_chat(&self, user_id: &str, query: &Query) -> Result<Value, ApiError> {
        self.send_json(
            ApiRequest::get(format!("/chat/support/{}", segment(user_id)))
                .with_query(query)
                .fallback("Failed to get support chat"),
        )
        .await
    }

    pub async fn send_support_message(&self, message: &SupportMessage) -> Result<Value, ApiError> {
        let request = ApiRequest::post("/chat/send")
            .with_json(message)?
            .fallback("Failed to send support message");
        self.send_json(request).await
    }

    pub async fn close_support_room(&self, room_id: &str, note: &AdminNote) -> Result<Value, ApiError> {
        let request = ApiRequest::patch(format!("/chat/support/rooms/{}/close", segment(room_id)))
            .with_json(note)?
            .fallback("Failed to close support room");
        self.send_json(request).await
    }

    pub async fn support_stats(&self) -> Result<Value, ApiError> {
        self.send_json(ApiRequest::get("/chat/support/stats").fallback("Failed to get support stats"))
            .await
    }

    pub async fn assign_support_room(
        &self,
        room_id: &str,
        assignment: &RoomAssignment,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::patch(format!("/chat/support/rooms/{}/assign", segment(room_id)))
            .with_json(assignment)?
            .fallback("Failed to assign support request");
        self.send_json(request).await
    }
}
