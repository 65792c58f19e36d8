use std::io::{self, BufRead, Write};

use anyhow::{bail, Context as _, Result};
use serde_json::{json, Value};
use tracing::warn;

use streamdesk_core::auth::{Keychain, StoredToken};
use streamdesk_core::{ApiClient, ApiError};

use super::Context;
use crate::output::print_json;

pub async fn login(ctx: &mut Context, email: Option<String>, remember: bool) -> Result<()> {
    let email = match email.or_else(|| ctx.config.last_email.clone()) {
        Some(email) => email,
        None => prompt("Email: ")?,
    };
    if email.is_empty() {
        bail!("Email is required");
    }

    // A remembered password is only used when not asked to store a new one
    let remembered = if remember {
        None
    } else {
        Keychain::get_password(&email).ok()
    };
    let had_remembered = remembered.is_some();

    let (password, typed) = sign_in(&ctx.client, &email, remembered, || {
        rpassword::prompt_password("Password: ").context("Failed to read password")
    })
    .await?;

    // Replace a stale remembered password with the one that worked
    if remember || (typed && had_remembered) {
        if let Err(e) = Keychain::store(&email, &password) {
            warn!(error = %e, "Could not remember password");
        }
    }
    ctx.config.last_email = Some(email.clone());
    if let Err(e) = ctx.config.save() {
        warn!(error = %e, "Failed to save config");
    }

    println!("Signed in as {}", email);
    Ok(())
}

/// Log in with the remembered password if there is one, prompting when there
/// is none or the server rejects it. Returns the password that worked and
/// whether it was typed.
async fn sign_in(
    client: &ApiClient,
    email: &str,
    remembered: Option<String>,
    prompt_password: impl Fn() -> Result<String>,
) -> Result<(String, bool)> {
    if let Some(password) = remembered {
        match client.login(email, &password).await {
            Ok(_) => return Ok((password, false)),
            Err(e) if e.is_unauthorized() => {
                warn!("Remembered password was rejected");
                eprintln!("The remembered password was rejected.");
            }
            Err(e) => return Err(e.into()),
        }
    }

    let password = prompt_password()?;
    client.login(email, &password).await?;
    Ok((password, true))
}

pub fn logout(ctx: &Context, forget: bool) -> Result<()> {
    ctx.client.logout();
    println!("Signed out");

    if forget {
        match &ctx.config.last_email {
            Some(email) if Keychain::has_password(email) => {
                Keychain::delete(email)?;
                println!("Forgot the remembered password for {}", email);
            }
            _ => println!("No remembered password to forget"),
        }
    }
    Ok(())
}

pub fn status(ctx: &Context) -> Result<()> {
    let credentials = ctx.client.credentials().credentials();
    let access = credentials.access.as_ref().filter(|t| !t.is_expired());
    let refresh = credentials.refresh.as_ref().filter(|t| !t.is_expired());

    match (access, refresh) {
        (None, None) => println!("Not signed in"),
        (access, refresh) => {
            println!("Signed in");
            println!("  Access token:  {}", describe(access));
            println!("  Refresh token: {}", describe(refresh));
        }
    }
    if let Some(email) = &ctx.config.last_email {
        println!("  Last email:    {}", email);
        if Keychain::has_password(email) {
            println!("  Password:      remembered");
        }
    }
    Ok(())
}

fn describe(token: Option<&StoredToken>) -> String {
    match token {
        Some(token) => format!("expires in {} minutes", token.minutes_until_expiry()),
        None => "none".to_string(),
    }
}

pub async fn profile(ctx: &Context) -> Result<()> {
    ctx.ensure_session("/profile")?;
    print_json(&ctx.client.profile().await?)
}

/// Fetch the dashboard headline numbers concurrently. A failing section is
/// shown as its error rather than failing the whole overview.
pub async fn overview(ctx: &Context) -> Result<()> {
    ctx.ensure_session("/")?;
    let client = &ctx.client;
    let (dashboard, support, moderation) = futures::join!(
        client.dashboard_stats(),
        client.support_stats(),
        client.moderation_stats()
    );

    print_json(&json!({
        "dashboard": section(dashboard),
        "support": section(support),
        "moderation": section(moderation),
    }))
}

fn section(result: Result<Value, ApiError>) -> Value {
    match result {
        Ok(value) => value,
        Err(e) => json!({ "error": e.message, "status": e.status }),
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use serde_json::json;
    use streamdesk_core::api::{ApiRequest, HttpResponse, Transport, TransportError};
    use streamdesk_core::{MemoryCredentialStore, TokenPolicy};

    use super::*;

    /// Login endpoint that accepts a single password and records attempts.
    struct LoginServer {
        password: &'static str,
        attempts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Transport for LoginServer {
        async fn send(&self, request: &ApiRequest) -> Result<HttpResponse, TransportError> {
            let body = request.body.clone().unwrap_or_default();
            let password = body["password"].as_str().unwrap_or_default().to_string();
            self.attempts.lock().unwrap().push(password.clone());

            let reply = if password == self.password {
                json!({"data": {"accessToken": "access-1", "refreshToken": "refresh-1"}})
            } else {
                json!({"message": "Invalid email or password"})
            };
            let status = if password == self.password { 200 } else { 401 };
            Ok(HttpResponse::new(status, reply.to_string()))
        }
    }

    fn client_for(password: &'static str) -> (ApiClient, Arc<LoginServer>) {
        let server = Arc::new(LoginServer {
            password,
            attempts: Mutex::new(Vec::new()),
        });
        let client = ApiClient::with_transport(
            server.clone(),
            TokenPolicy::default(),
            Arc::new(MemoryCredentialStore::new()),
        );
        (client, server)
    }

    #[tokio::test]
    async fn test_remembered_password_used_without_prompt() {
        let (client, server) = client_for("hunter2");

        let (password, typed) = sign_in(&client, "admin@example.com", Some("hunter2".into()), || {
            panic!("should not prompt")
        })
        .await
        .unwrap();

        assert_eq!(password, "hunter2");
        assert!(!typed);
        assert_eq!(server.attempts.lock().unwrap().len(), 1);
        assert!(client.is_authenticated());
    }

    #[tokio::test]
    async fn test_stale_remembered_password_falls_back_to_prompt() {
        let (client, server) = client_for("new-password");

        let (password, typed) = sign_in(&client, "admin@example.com", Some("old-password".into()), || {
            Ok("new-password".to_string())
        })
        .await
        .unwrap();

        assert_eq!(password, "new-password");
        assert!(typed);
        assert_eq!(
            *server.attempts.lock().unwrap(),
            vec!["old-password".to_string(), "new-password".to_string()]
        );
        assert!(client.is_authenticated());
    }

    #[tokio::test]
    async fn test_wrong_typed_password_is_an_error() {
        let (client, _server) = client_for("hunter2");

        let err = sign_in(&client, "admin@example.com", None, || Ok("nope".to_string()))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Invalid email or password"));
        assert!(!client.is_authenticated());
    }
}
