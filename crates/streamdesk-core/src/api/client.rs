//! Authenticated API client for the platform's admin REST API.
//!
//! Every outgoing call goes through `ApiClient::execute`, which attaches the
//! stored access token and recovers from a 401 by refreshing the token once.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::Value;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

use crate::auth::{CredentialStore, TokenPolicy};
use crate::models::{RefreshRequest, RefreshedTokens};

use super::error::ApiError;
use super::events::AuthEvent;
use super::transport::{ApiRequest, HttpResponse, ReqwestTransport, Transport};

// ============================================================================
// Constants
// ============================================================================

/// Production admin API
pub const DEFAULT_API_BASE_URL: &str = "https://apilive.loltips.net/api/v1";

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Buffered auth events per subscriber before the oldest are dropped.
const AUTH_EVENT_CAPACITY: usize = 16;

const REFRESH_PATH: &str = "/auth/refresh-token";

/// Connection and token settings for an `ApiClient`.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    pub base_url: String,
    pub timeout: Duration,
    pub token_policy: TokenPolicy,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            token_policy: TokenPolicy::default(),
        }
    }
}

struct ClientInner {
    transport: Arc<dyn Transport>,
    credentials: Arc<dyn CredentialStore>,
    token_policy: TokenPolicy,
    /// Serializes token refreshes so concurrent 401s share one refresh call
    refresh_gate: Mutex<()>,
    events: broadcast::Sender<AuthEvent>,
}

/// API client for the admin REST API.
/// Clone is cheap - clones share the transport, credential store and refresh gate.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

impl ApiClient {
    /// Create a client that talks HTTP via reqwest.
    pub fn new(settings: &ClientSettings, credentials: Arc<dyn CredentialStore>) -> Result<Self> {
        let transport = ReqwestTransport::new(&settings.base_url, settings.timeout)
            .context("Failed to build HTTP client")?;
        Ok(Self::with_transport(
            Arc::new(transport),
            settings.token_policy,
            credentials,
        ))
    }

    /// Create a client over any transport.
    pub fn with_transport(
        transport: Arc<dyn Transport>,
        token_policy: TokenPolicy,
        credentials: Arc<dyn CredentialStore>,
    ) -> Self {
        let (events, _) = broadcast::channel(AUTH_EVENT_CAPACITY);
        Self {
            inner: Arc::new(ClientInner {
                transport,
                credentials,
                token_policy,
                refresh_gate: Mutex::new(()),
                events,
            }),
        }
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.inner.credentials
    }

    /// Receive `AuthEvent`s published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.inner.events.subscribe()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.credentials.is_authenticated()
    }

    /// Send a request and return its JSON body.
    pub async fn send_json(&self, request: ApiRequest) -> Result<Value, ApiError> {
        self.execute(request).await?.json()
    }

    /// Send a request and return its raw body (file exports).
    pub async fn send_bytes(&self, request: ApiRequest) -> Result<Vec<u8>, ApiError> {
        Ok(self.execute(request).await?.body)
    }

    /// Send a request with the stored credentials.
    ///
    /// A 401 on a request that has not been retried triggers one token
    /// refresh and one resend; the resend's outcome is final. If no refresh
    /// token is available the session is ended and the 401 is returned. If
    /// the refresh itself fails the session is ended and the refresh error is
    /// returned instead of the 401.
    pub async fn execute(&self, mut request: ApiRequest) -> Result<HttpResponse, ApiError> {
        let attached = self.inner.credentials.access_token();
        request.set_bearer(attached.clone());

        let response = self.dispatch(&request).await?;
        if response.is_success() {
            return Ok(response);
        }

        if response.status == 401 && request.reauthenticates() && !request.is_retried() {
            request.mark_retried();
            return self.resend_with_fresh_token(request, attached, response).await;
        }

        Err(ApiError::from_status(
            response.status,
            &response.body,
            request.fallback_message(),
        ))
    }

    /// Exchange a refresh token for a new access token and store the result.
    ///
    /// Goes straight to the transport, so a 401 here is never itself
    /// refreshed. Every failure is reported as `ErrorKind::RefreshFailed`.
    pub async fn refresh_access_token(&self, refresh_token: &str) -> Result<RefreshedTokens, ApiError> {
        if refresh_token.is_empty() {
            return Err(ApiError::invalid_request("Refresh token is required").into_refresh_failure());
        }

        let request = ApiRequest::post(REFRESH_PATH)
            .with_json(&RefreshRequest { refresh_token })?
            .without_reauthentication()
            .fallback("Refresh token failed");

        let response = self
            .dispatch(&request)
            .await
            .map_err(ApiError::into_refresh_failure)?;

        if !response.is_success() {
            return Err(ApiError::from_status(
                response.status,
                &response.body,
                request.fallback_message(),
            )
            .into_refresh_failure());
        }

        let body = response.json().map_err(ApiError::into_refresh_failure)?;
        let tokens = RefreshedTokens::from_body(&body).ok_or_else(|| {
            ApiError::invalid_response("Refresh response did not include an access token")
                .into_refresh_failure()
        })?;

        self.store_tokens(&tokens.access_token, tokens.refresh_token.as_deref());
        info!(rotated_refresh_token = tokens.refresh_token.is_some(), "Access token refreshed");
        Ok(tokens)
    }

    pub(crate) fn store_tokens(&self, access_token: &str, refresh_token: Option<&str>) {
        let policy = self.inner.token_policy;
        self.inner
            .credentials
            .set_access_token(access_token, policy.access_ttl);
        if let Some(refresh_token) = refresh_token {
            self.inner
                .credentials
                .set_refresh_token(refresh_token, policy.refresh_ttl);
        }
    }

    /// Clear credentials and tell the host the user must log in again.
    pub(crate) fn end_session(&self, return_path: Option<&str>) {
        self.inner.credentials.clear();
        warn!(return_path = ?return_path, "Session ended, re-authentication required");
        self.emit(AuthEvent::reauthentication_required(return_path));
    }

    pub(crate) fn emit(&self, event: AuthEvent) {
        // No subscribers is not an error
        let _ = self.inner.events.send(event);
    }

    async fn dispatch(&self, request: &ApiRequest) -> Result<HttpResponse, ApiError> {
        match self.inner.transport.send(request).await {
            Ok(response) => {
                debug!(
                    method = %request.method,
                    path = %request.path,
                    status = response.status,
                    retried = request.is_retried(),
                    "Response received"
                );
                Ok(response)
            }
            Err(e) => {
                warn!(method = %request.method, path = %request.path, error = %e, "Request failed without a response");
                Err(ApiError::transport(request.fallback_message()))
            }
        }
    }

    async fn resend_with_fresh_token(
        &self,
        mut request: ApiRequest,
        attached: Option<String>,
        rejected: HttpResponse,
    ) -> Result<HttpResponse, ApiError> {
        let token = self
            .fresh_access_token(&request, attached.as_deref(), &rejected)
            .await?;
        request.set_bearer(Some(token));

        let response = self.dispatch(&request).await?;
        if response.is_success() {
            Ok(response)
        } else {
            Err(ApiError::from_status(
                response.status,
                &response.body,
                request.fallback_message(),
            ))
        }
    }

    async fn fresh_access_token(
        &self,
        request: &ApiRequest,
        attached: Option<&str>,
        rejected: &HttpResponse,
    ) -> Result<String, ApiError> {
        let _gate = self.inner.refresh_gate.lock().await;

        // Another request replaced the token while this one waited at the gate
        if let Some(current) = self.inner.credentials.access_token() {
            if Some(current.as_str()) != attached {
                debug!(path = %request.path, "Reusing token refreshed by a concurrent request");
                return Ok(current);
            }
        }

        let Some(refresh_token) = self.inner.credentials.refresh_token() else {
            // A concurrent request already ended this session and signalled it
            let ended_elsewhere =
                attached.is_some() && self.inner.credentials.credentials().is_empty();
            if !ended_elsewhere {
                self.end_session(Some(&request.path));
            }
            return Err(ApiError::from_status(
                rejected.status,
                &rejected.body,
                request.fallback_message(),
            ));
        };

        match self.refresh_access_token(&refresh_token).await {
            Ok(tokens) => Ok(tokens.access_token),
            Err(e) => {
                warn!(error = %e, "Token refresh failed");
                self.end_session(Some(&request.path));
                Err(e)
            }
        }
    }
}
