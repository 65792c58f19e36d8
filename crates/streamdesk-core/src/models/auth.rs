use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct RefreshRequest<'a> {
    #[serde(rename = "refreshToken")]
    pub refresh_token: &'a str,
}

/// The `data` object of a successful login response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginData {
    #[serde(rename = "accessToken", default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(rename = "refreshToken", default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Everything else the server returned (user profile, permissions, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginEnvelope {
    #[serde(default)]
    pub data: Option<LoginData>,
}

/// Tokens issued by the refresh endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshedTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
}

/// Field names the refresh endpoint has been seen to use, in order of preference.
const ACCESS_TOKEN_FIELDS: [&str; 2] = ["token", "access_token"];
const REFRESH_TOKEN_FIELDS: [&str; 2] = ["refreshToken", "refresh_token"];

/// First non-empty string among `fields`; values of any other type are skipped.
fn first_string(object: &Map<String, Value>, fields: &[&str]) -> Option<String> {
    fields
        .iter()
        .filter_map(|field| object.get(*field).and_then(Value::as_str))
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

impl RefreshedTokens {
    /// Extract tokens from a refresh response body.
    ///
    /// The access token is read from `token`, then `access_token`; the refresh
    /// token from `refreshToken`, then `refresh_token`. Top-level fields win
    /// over the same fields nested under `data` (consulted only when it is an
    /// object). Fields of unexpected types are ignored. Returns `None` when no
    /// access token is present.
    pub fn from_body(body: &Value) -> Option<Self> {
        let top = body.as_object()?;
        let nested = top.get("data").and_then(Value::as_object);
        let lookup = |fields: &[&str]| {
            first_string(top, fields).or_else(|| nested.and_then(|data| first_string(data, fields)))
        };

        Some(Self {
            access_token: lookup(&ACCESS_TOKEN_FIELDS)?,
            refresh_token: lookup(&REFRESH_TOKEN_FIELDS),
        })
    }
}
