//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use streamdesk_core::models::{AdminNote, Query};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
/// Admin console for the livestream gifting platform
pub struct Cli {
    /// Session file holding the access and refresh tokens
    #[arg(long, global = true, value_name = "PATH", env = "STREAMDESK_SESSION_FILE")]
    pub session_file: Option<PathBuf>,

    /// Admin API base URL
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Write logs to a daily-rotated file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in with email and password
    Login {
        #[arg(long)]
        email: Option<String>,
        /// Remember the password in the OS keychain
        #[arg(long)]
        remember: bool,
    },
    /// Forget the stored tokens
    Logout {
        /// Also delete the remembered password for the last email
        #[arg(long)]
        forget: bool,
    },
    /// Show whether a session is active
    Status,
    /// Show the signed-in admin's profile
    Profile,
    /// Dashboard, support and moderation stats at a glance
    Overview,
    /// Manage user accounts
    #[command(subcommand)]
    Users(UsersCommand),
    /// Manage the gift catalog
    #[command(subcommand)]
    Gifts(GiftsCommand),
    /// Review top-up and withdraw requests
    #[command(subcommand)]
    Wallet(WalletCommand),
    /// Platform configuration and health
    #[command(subcommand)]
    Admin(AdminCommand),
    /// Monitor and moderate live streams
    #[command(subcommand)]
    Streams(StreamsCommand),
    /// Send and manage notifications
    #[command(subcommand)]
    Notifications(NotificationsCommand),
    /// Answer support chats
    #[command(subcommand)]
    Support(SupportCommand),
    /// Reports, bans and warnings
    #[command(subcommand)]
    Moderation(ModerationCommand),
    /// Platform analytics and exports
    #[command(subcommand)]
    Analytics(AnalyticsCommand),
    /// System maintenance tools
    #[command(subcommand)]
    Tools(ToolsCommand),
    /// Wallet transactions
    #[command(subcommand)]
    Transactions(TransactionsCommand),
}

// ===== Shared arguments =====

#[derive(Args, Debug, Clone, Default)]
pub struct QueryArgs {
    /// Query parameter, repeatable (e.g. --param page=2 --param status=pending)
    #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,
}

impl QueryArgs {
    pub fn to_query(&self) -> Query {
        self.params.iter().cloned().collect()
    }
}

#[derive(Args, Debug, Clone)]
pub struct BodyArgs {
    /// Request body as JSON
    #[arg(long, value_name = "JSON")]
    pub data: String,
}

#[derive(Args, Debug, Clone, Default)]
pub struct NoteArgs {
    #[arg(long)]
    pub reason: Option<String>,
    /// Internal note recorded with the action
    #[arg(long = "note")]
    pub admin_note: Option<String>,
}

impl NoteArgs {
    pub fn to_note(&self) -> AdminNote {
        AdminNote {
            reason: self.reason.clone(),
            admin_note: self.admin_note.clone(),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub query: QueryArgs,
    /// File to write the export to
    #[arg(long, short, value_name = "PATH")]
    pub output: PathBuf,
}

/// Parse a `key=value` pair.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid KEY=VALUE: no `=` found in `{}`", s))?;
    if key.is_empty() {
        return Err(format!("invalid KEY=VALUE: empty key in `{}`", s));
    }
    Ok((key.to_string(), value.to_string()))
}

// ===== Feature areas =====

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    List(QueryArgs),
    Show { user_id: String },
    /// Change a user's role (user, streamer, moderator, admin)
    SetRole { user_id: String, role: String },
    /// Change a user's status (active, inactive, banned)
    SetStatus { user_id: String, status: String },
}

#[derive(Subcommand, Debug)]
pub enum GiftsCommand {
    List(QueryArgs),
    Show { gift_id: String },
    Create(BodyArgs),
    Update {
        gift_id: String,
        #[command(flatten)]
        body: BodyArgs,
    },
    Delete { gift_id: String },
}

#[derive(Subcommand, Debug)]
pub enum WalletCommand {
    Topups(QueryArgs),
    Topup { request_id: String },
    /// Approve or reject a top-up request
    ReviewTopup {
        request_id: String,
        status: String,
        #[arg(long = "note")]
        admin_note: Option<String>,
    },
    Withdrawals(QueryArgs),
    Withdrawal { request_id: String },
    /// Approve or reject a withdraw request
    ReviewWithdrawal {
        request_id: String,
        status: String,
        #[arg(long = "note")]
        admin_note: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    Config,
    UpdateConfig(BodyArgs),
    Dashboard,
    Stats,
    Health,
    Logs(QueryArgs),
}

#[derive(Subcommand, Debug)]
pub enum StreamsCommand {
    List(QueryArgs),
    Show { stream_id: String },
    /// Force-end a live stream
    End {
        stream_id: String,
        #[command(flatten)]
        note: NoteArgs,
    },
    Analytics(QueryArgs),
    SetStatus {
        stream_id: String,
        status: String,
        #[command(flatten)]
        note: NoteArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum NotificationsCommand {
    List(QueryArgs),
    Create(BodyArgs),
    Broadcast(BodyArgs),
    Stats,
    Delete { notification_id: String },
    MarkRead { notification_id: String },
}

#[derive(Subcommand, Debug)]
pub enum SupportCommand {
    Rooms(QueryArgs),
    Chat {
        user_id: String,
        #[command(flatten)]
        query: QueryArgs,
    },
    /// Send an admin reply into a support room
    Reply { room_id: String, message: String },
    Close {
        room_id: String,
        #[command(flatten)]
        note: NoteArgs,
    },
    Stats,
    Assign {
        room_id: String,
        staff_id: String,
        #[arg(long)]
        priority: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ModerationCommand {
    Reports(QueryArgs),
    HandleReport {
        report_id: String,
        #[command(flatten)]
        body: BodyArgs,
    },
    Banned(QueryArgs),
    Ban {
        user_id: String,
        #[arg(long)]
        reason: String,
        /// Ban length in days, 0 for permanent
        #[arg(long, default_value_t = 0)]
        duration: u32,
        #[arg(long = "note")]
        admin_note: Option<String>,
    },
    Unban {
        user_id: String,
        #[command(flatten)]
        note: NoteArgs,
    },
    Warn {
        user_id: String,
        #[arg(long)]
        reason: String,
        #[arg(long)]
        message: Option<String>,
        #[arg(long = "note")]
        admin_note: Option<String>,
    },
    Stats,
    History {
        user_id: String,
        #[command(flatten)]
        query: QueryArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum AnalyticsCommand {
    Revenue(QueryArgs),
    Users(QueryArgs),
    Gifts(QueryArgs),
    Streams(QueryArgs),
    Financial(QueryArgs),
    Performance(QueryArgs),
    Export(ExportArgs),
}

#[derive(Subcommand, Debug)]
pub enum ToolsCommand {
    ClearCache {
        #[arg(long = "cache-type")]
        cache_types: Vec<String>,
    },
    Health,
    DbStats,
    OptimizeDb {
        #[arg(long = "collection")]
        collections: Vec<String>,
    },
    Logs(QueryArgs),
    ExportLogs(ExportArgs),
    RedisStats,
    ClearRedis {
        #[arg(long = "key")]
        keys: Vec<String>,
        #[arg(long)]
        pattern: Option<String>,
    },
    Performance(QueryArgs),
    Backup {
        #[arg(long = "collection")]
        collections: Vec<String>,
        #[arg(long)]
        format: Option<String>,
    },
    Restore { backup_id: String },
    AuditLogs(QueryArgs),
}

#[derive(Subcommand, Debug)]
pub enum TransactionsCommand {
    List(QueryArgs),
    Show { transaction_id: String },
    SetStatus {
        transaction_id: String,
        status: String,
        #[command(flatten)]
        note: NoteArgs,
    },
    Stats(QueryArgs),
    Export(ExportArgs),
    Suspicious(QueryArgs),
    Flag {
        transaction_id: String,
        #[arg(long)]
        reason: String,
        /// low, medium or high
        #[arg(long)]
        severity: Option<String>,
        #[arg(long = "note")]
        admin_note: Option<String>,
    },
    Unflag {
        transaction_id: String,
        #[command(flatten)]
        note: NoteArgs,
    },
    ForUser {
        user_id: String,
        #[command(flatten)]
        query: QueryArgs,
    },
    /// Record a manual transaction from a JSON body
    Create(BodyArgs),
    Reverse {
        transaction_id: String,
        #[command(flatten)]
        note: NoteArgs,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_key_val() {
        assert_eq!(
            parse_key_val("status=pending").unwrap(),
            ("status".to_string(), "pending".to_string())
        );
        assert_eq!(
            parse_key_val("search=a=b").unwrap(),
            ("search".to_string(), "a=b".to_string())
        );
        assert!(parse_key_val("status").is_err());
        assert!(parse_key_val("=x").is_err());
    }

    #[test]
    fn test_query_args_keep_order() {
        let cli = Cli::parse_from([
            "streamdesk",
            "wallet",
            "topups",
            "--param",
            "status=pending",
            "--param",
            "page=2",
        ]);
        let Command::Wallet(WalletCommand::Topups(args)) = cli.command else {
            panic!("unexpected command");
        };
        assert_eq!(
            args.to_query().pairs(),
            &[
                ("status".to_string(), "pending".to_string()),
                ("page".to_string(), "2".to_string()),
            ]
        );
    }
}
