/// Route hosts navigate to when the session can no longer be used
const LOGIN_ROUTE: &str = "/login";

/// Notifications the client publishes to its host application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    /// Credentials were cleared (or never present) and the user must log in
    /// again. `return_path` is where to send them afterwards.
    ReauthenticationRequired { return_path: Option<String> },
}

impl AuthEvent {
    pub fn reauthentication_required(return_path: Option<&str>) -> Self {
        AuthEvent::ReauthenticationRequired {
            return_path: return_path.map(str::to_string),
        }
    }

    /// Login route for hosts that navigate, e.g. `/login?returnUrl=%2Fadmin%2Fusers`.
    pub fn login_route(&self) -> String {
        match self {
            AuthEvent::ReauthenticationRequired {
                return_path: Some(path),
            } if !path.is_empty() => {
                format!("{}?returnUrl={}", LOGIN_ROUTE, urlencoding::encode(path))
            }
            AuthEvent::ReauthenticationRequired { .. } => LOGIN_ROUTE.to_string(),
        }
    }
}
