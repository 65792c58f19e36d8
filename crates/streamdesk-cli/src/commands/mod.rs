//! Command execution.
//!
//! `run` builds the client from config and the session file, dispatches the
//! parsed command, then reports any re-authentication signal the client
//! published while the command ran.

mod areas;
mod session;

use std::sync::Arc;

use anyhow::{bail, Result};
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, warn};

use streamdesk_core::{ApiClient, AuthEvent, Config, FileCredentialStore};

use crate::cli::{Cli, Command};

/// Everything a command needs: the loaded config and an authenticated client.
pub struct Context {
    pub config: Config,
    pub client: ApiClient,
}

impl Context {
    pub fn new(cli: &Cli) -> Result<Self> {
        let config = Config::load().unwrap_or_else(|e| {
            warn!(error = %e, "Ignoring unreadable config file");
            Config::default()
        });

        let store = match &cli.session_file {
            Some(path) => FileCredentialStore::at_path(path.clone()),
            None => FileCredentialStore::open(&config.cache_dir()?),
        };
        debug!(path = %store.path().display(), "Using session file");

        let settings = config.client_settings(cli.api_url.as_deref());
        let client = ApiClient::new(&settings, Arc::new(store))?;
        Ok(Self { config, client })
    }

    /// Fail early when there is nothing to authenticate with. An expired
    /// access token is fine while a refresh token remains.
    pub fn ensure_session(&self, route: &str) -> Result<()> {
        if self.client.refresh_token().is_some() || self.client.require_auth(route) {
            return Ok(());
        }
        bail!("Not signed in")
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    let mut ctx = Context::new(&cli)?;
    let mut events = ctx.client.subscribe();

    let result = dispatch(&mut ctx, cli.command).await;
    report_auth_events(&mut events);
    result
}

async fn dispatch(ctx: &mut Context, command: Command) -> Result<()> {
    match command {
        Command::Login { email, remember } => session::login(ctx, email, remember).await,
        Command::Logout { forget } => session::logout(ctx, forget),
        Command::Status => session::status(ctx),
        Command::Profile => session::profile(ctx).await,
        Command::Overview => session::overview(ctx).await,
        Command::Users(cmd) => areas::users(ctx, cmd).await,
        Command::Gifts(cmd) => areas::gifts(ctx, cmd).await,
        Command::Wallet(cmd) => areas::wallet(ctx, cmd).await,
        Command::Admin(cmd) => areas::admin(ctx, cmd).await,
        Command::Streams(cmd) => areas::streams(ctx, cmd).await,
        Command::Notifications(cmd) => areas::notifications(ctx, cmd).await,
        Command::Support(cmd) => areas::support(ctx, cmd).await,
        Command::Moderation(cmd) => areas::moderation(ctx, cmd).await,
        Command::Analytics(cmd) => areas::analytics(ctx, cmd).await,
        Command::Tools(cmd) => areas::tools(ctx, cmd).await,
        Command::Transactions(cmd) => areas::transactions(ctx, cmd).await,
    }
}

/// Tell the user once if the command needed a session it did not have.
fn report_auth_events(events: &mut broadcast::Receiver<AuthEvent>) {
    let mut last = None;
    loop {
        match events.try_recv() {
            Ok(event) => last = Some(event),
            Err(TryRecvError::Lagged(_)) => continue,
            Err(_) => break,
        }
    }

    if let Some(event) = last {
        debug!(route = %event.login_route(), "Re-authentication required");
        eprintln!("Sign-in required. Run `streamdesk login` to continue.");
    }
}
