//! Login, logout and session helpers.

use serde_json::Value;
use tracing::info;

use crate::models::auth::LoginEnvelope;
use crate::models::{LoginData, LoginRequest};

use super::client::ApiClient;
use super::error::ApiError;
use super::events::AuthEvent;
use super::transport::ApiRequest;

impl ApiClient {
    /// Authenticate with email and password, storing the issued tokens.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginData, ApiError> {
        let request = ApiRequest::post("/auth/login")
            .with_json(&LoginRequest { email, password })?
            .without_reauthentication()
            .fallback("Login failed");

        let body = self.send_json(request).await?;
        let envelope: LoginEnvelope = serde_json::from_value(body).map_err(|e| {
            ApiError::invalid_response(format!("Failed to parse login response: {}", e))
        })?;
        let data = envelope.data.unwrap_or_default();

        let Some(access_token) = data.access_token.as_deref() else {
            return Err(ApiError::invalid_response(
                "Login response did not include an access token",
            ));
        };
        self.store_tokens(access_token, data.refresh_token.as_deref());

        info!(email = email, "Logged in");
        Ok(data)
    }

    /// Forget both tokens. Purely local; safe to call repeatedly.
    pub fn logout(&self) {
        self.credentials().clear();
        info!("Logged out");
    }

    pub fn access_token(&self) -> Option<String> {
        self.credentials().access_token()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.credentials().refresh_token()
    }

    /// Returns whether a session is active. When it is not, publishes
    /// `AuthEvent::ReauthenticationRequired` carrying `return_path`.
    pub fn require_auth(&self, return_path: &str) -> bool {
        if self.is_authenticated() {
            return true;
        }
        self.emit(AuthEvent::reauthentication_required(Some(return_path)));
        false
    }

    pub async fn profile(&self) -> Result<Value, ApiError> {
        self.send_json(ApiRequest::get("/auth/profile").fallback("Failed to get user profile"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Duration;
    use serde_json::json;

    use crate::api::testing::{json_response, FakeTransport};
    use crate::api::ErrorKind;
    use crate::auth::{CredentialStore, MemoryCredentialStore, TokenPolicy};

    use super::*;

    fn login_server() -> Arc<FakeTransport> {
        FakeTransport::new(|request| match request.path.as_str() {
            "/auth/login" => Ok(json_response(
                200,
                json!({
                    "success": true,
                    "data": {
                        "accessToken": "access-1",
                        "refreshToken": "refresh-1",
                        "user": {"email": "admin@example.com"}
                    }
                }),
            )),
            _ => Ok(json_response(404, json!({}))),
        })
    }

    #[tokio::test]
    async fn test_login_populates_store_with_configured_ttls() {
        let store = Arc::new(MemoryCredentialStore::new());
        store.set_refresh_token("old-refresh", Duration::days(30));
        let transport = login_server();
        let client = ApiClient::with_transport(transport.clone(), TokenPolicy::default(), store.clone());

        assert!(!client.is_authenticated());
        let data = client.login("admin@example.com", "hunter2").await.unwrap();

        assert_eq!(data.extra["user"]["email"], "admin@example.com");
        assert!(client.is_authenticated());
        assert_eq!(store.access_token().as_deref(), Some("access-1"));
        assert_eq!(store.refresh_token().as_deref(), Some("refresh-1"));

        let creds = store.credentials();
        let access_hours = creds.access.unwrap().time_until_expiry().num_hours();
        let refresh_hours = creds.refresh.unwrap().time_until_expiry().num_hours();
        assert!((7 * 24 - 1..=7 * 24).contains(&access_hours));
        assert!((30 * 24 - 1..=30 * 24).contains(&refresh_hours));

        let sent = transport.last();
        assert_eq!(sent.body, Some(json!({"email": "admin@example.com", "password": "hunter2"})));
    }

    #[tokio::test]
    async fn test_login_failure_uses_server_message() {
        let transport = FakeTransport::new(|_| {
            Ok(json_response(401, json!({"message": "Invalid email or password"})))
        });
        let store = Arc::new(MemoryCredentialStore::new());
        store.set_refresh_token("refresh-1", Duration::days(30));
        let client = ApiClient::with_transport(transport.clone(), TokenPolicy::default(), store.clone());

        let err = client.login("admin@example.com", "wrong").await.unwrap_err();
        assert_eq!(err.message, "Invalid email or password");
        assert_eq!(err.status, Some(401));
        // A rejected login never goes through the refresh path
        assert_eq!(transport.count("/auth/refresh-token"), 0);
        assert_eq!(store.refresh_token().as_deref(), Some("refresh-1"));
    }

    #[tokio::test]
    async fn test_login_without_access_token_is_invalid() {
        let transport = FakeTransport::new(|_| Ok(json_response(200, json!({"data": {}}))));
        let client = ApiClient::with_transport(
            transport,
            TokenPolicy::default(),
            Arc::new(MemoryCredentialStore::new()),
        );

        let err = client.login("a@b.c", "pw").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidResponse);
        assert!(!client.is_authenticated());
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let client = ApiClient::with_transport(
            login_server(),
            TokenPolicy::default(),
            Arc::new(MemoryCredentialStore::new()),
        );
        client.login("admin@example.com", "hunter2").await.unwrap();

        assert_eq!(client.refresh_token().as_deref(), Some("refresh-1"));

        client.logout();
        assert!(!client.is_authenticated());
        assert_eq!(client.access_token(), None);
        assert!(client.credentials().credentials().is_empty());

        client.logout();
        assert!(!client.is_authenticated());
    }

    #[tokio::test]
    async fn test_require_auth_signals_with_return_path() {
        let client = ApiClient::with_transport(
            login_server(),
            TokenPolicy::default(),
            Arc::new(MemoryCredentialStore::new()),
        );
        let mut events = client.subscribe();

        assert!(!client.require_auth("/withdraw-requests"));
        assert_eq!(
            events.try_recv().unwrap(),
            AuthEvent::reauthentication_required(Some("/withdraw-requests"))
        );

        client.login("admin@example.com", "hunter2").await.unwrap();
        assert!(client.require_auth("/withdraw-requests"));
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_profile_fallback_message() {
        let transport = FakeTransport::new(|_| Ok(json_response(502, json!({}))));
        let client = ApiClient::with_transport(
            transport,
            TokenPolicy::default(),
            Arc::new(MemoryCredentialStore::new()),
        );

        let err = client.profile().await.unwrap_err();
        assert_eq!(err.message, "Failed to get user profile");
    }
}
