//! Typed inputs for the admin API.
//!
//! - `Query`: ordered query-string parameters for list/stats/export endpoints
//! - Auth types: `LoginData`, `RefreshedTokens`
//! - Action bodies: `WalletReview`, `BanRequest`, `StatusChange`, etc.
//!
//! Response payloads are returned as `serde_json::Value`; their shape belongs
//! to the server.

pub mod actions;
pub mod auth;
pub mod query;

pub use actions::{
    AdminNote, BackupRequest, BanRequest, BroadcastInput, CacheClear, ConfigUpdate,
    DatabaseOptimize, FlagRequest, GiftInput, ManualTransaction, NotificationInput, RedisClear,
    ReportAction, RestoreRequest, RoleUpdate, RoomAssignment, StatusChange, StatusUpdate,
    SupportMessage, WalletReview, WarnRequest,
};
pub use auth::{LoginData, LoginRequest, RefreshRequest, RefreshedTokens};
pub use query::Query;
