//! One handler per admin area, mapping subcommands onto client calls.

use anyhow::Result;
use serde_json::Value;

use streamdesk_core::models::{
    BackupRequest, BanRequest, BroadcastInput, CacheClear, ConfigUpdate, DatabaseOptimize,
    FlagRequest, GiftInput, ManualTransaction, NotificationInput, RedisClear, ReportAction,
    RestoreRequest, RoomAssignment, StatusChange, SupportMessage, WalletReview, WarnRequest,
};
use streamdesk_core::ApiError;

use super::Context;
use crate::cli::{
    AdminCommand, AnalyticsCommand, ExportArgs, GiftsCommand, ModerationCommand,
    NotificationsCommand, StreamsCommand, SupportCommand, ToolsCommand, TransactionsCommand,
    UsersCommand, WalletCommand,
};
use crate::output::{parse_body, print_json, write_export};

fn show(result: Result<Value, ApiError>) -> Result<()> {
    print_json(&result?)
}

fn save(result: Result<Vec<u8>, ApiError>, export: &ExportArgs) -> Result<()> {
    write_export(&export.output, &result?)
}

pub async fn users(ctx: &Context, cmd: UsersCommand) -> Result<()> {
    ctx.ensure_session("/users")?;
    let client = &ctx.client;
    match cmd {
        UsersCommand::List(args) => show(client.users(&args.to_query()).await),
        UsersCommand::Show { user_id } => show(client.user(&user_id).await),
        UsersCommand::SetRole { user_id, role } => {
            show(client.update_user_role(&user_id, &role).await)
        }
        UsersCommand::SetStatus { user_id, status } => {
            show(client.update_user_status(&user_id, &status).await)
        }
    }
}

pub async fn gifts(ctx: &Context, cmd: GiftsCommand) -> Result<()> {
    ctx.ensure_session("/gifts")?;
    let client = &ctx.client;
    match cmd {
        GiftsCommand::List(args) => show(client.gifts(&args.to_query()).await),
        GiftsCommand::Show { gift_id } => show(client.gift(&gift_id).await),
        GiftsCommand::Create(body) => {
            let gift: GiftInput = parse_body(&body.data)?;
            show(client.create_gift(&gift).await)
        }
        GiftsCommand::Update { gift_id, body } => {
            let gift: GiftInput = parse_body(&body.data)?;
            show(client.update_gift(&gift_id, &gift).await)
        }
        GiftsCommand::Delete { gift_id } => show(client.delete_gift(&gift_id).await),
    }
}

pub async fn wallet(ctx: &Context, cmd: WalletCommand) -> Result<()> {
    ctx.ensure_session("/topup-requests")?;
    let client = &ctx.client;
    match cmd {
        WalletCommand::Topups(args) => show(client.topup_requests(&args.to_query()).await),
        WalletCommand::Topup { request_id } => show(client.topup_request(&request_id).await),
        WalletCommand::ReviewTopup {
            request_id,
            status,
            admin_note,
        } => {
            let review = WalletReview { status, admin_note };
            show(client.review_topup_request(&request_id, &review).await)
        }
        WalletCommand::Withdrawals(args) => show(client.withdraw_requests(&args.to_query()).await),
        WalletCommand::Withdrawal { request_id } => {
            show(client.withdraw_request(&request_id).await)
        }
        WalletCommand::ReviewWithdrawal {
            request_id,
            status,
            admin_note,
        } => {
            let review = WalletReview { status, admin_note };
            show(client.review_withdraw_request(&request_id, &review).await)
        }
    }
}

pub async fn admin(ctx: &Context, cmd: AdminCommand) -> Result<()> {
    ctx.ensure_session("/settings")?;
    let client = &ctx.client;
    match cmd {
        AdminCommand::Config => show(client.config().await),
        AdminCommand::UpdateConfig(body) => {
            let update: ConfigUpdate = parse_body(&body.data)?;
            show(client.update_config(&update).await)
        }
        AdminCommand::Dashboard => show(client.dashboard_stats().await),
        AdminCommand::Stats => show(client.stats().await),
        AdminCommand::Health => show(client.system_health().await),
        AdminCommand::Logs(args) => show(client.admin_logs(&args.to_query()).await),
    }
}

pub async fn streams(ctx: &Context, cmd: StreamsCommand) -> Result<()> {
    ctx.ensure_session("/streams")?;
    let client = &ctx.client;
    match cmd {
        StreamsCommand::List(args) => show(client.streams(&args.to_query()).await),
        StreamsCommand::Show { stream_id } => show(client.stream(&stream_id).await),
        StreamsCommand::End { stream_id, note } => {
            show(client.end_stream(&stream_id, &note.to_note()).await)
        }
        StreamsCommand::Analytics(args) => show(client.stream_analytics(&args.to_query()).await),
        StreamsCommand::SetStatus {
            stream_id,
            status,
            note,
        } => {
            let change = StatusChange {
                status,
                reason: note.reason,
                admin_note: note.admin_note,
            };
            show(client.update_stream_status(&stream_id, &change).await)
        }
    }
}

pub async fn notifications(ctx: &Context, cmd: NotificationsCommand) -> Result<()> {
    ctx.ensure_session("/notifications")?;
    let client = &ctx.client;
    match cmd {
        NotificationsCommand::List(args) => show(client.notifications(&args.to_query()).await),
        NotificationsCommand::Create(body) => {
            let notification: NotificationInput = parse_body(&body.data)?;
            show(client.create_notification(&notification).await)
        }
        NotificationsCommand::Broadcast(body) => {
            let broadcast: BroadcastInput = parse_body(&body.data)?;
            show(client.broadcast_notification(&broadcast).await)
        }
        NotificationsCommand::Stats => show(client.notification_stats().await),
        NotificationsCommand::Delete { notification_id } => {
            show(client.delete_notification(&notification_id).await)
        }
        NotificationsCommand::MarkRead { notification_id } => {
            show(client.mark_notification_read(&notification_id).await)
        }
    }
}

pub async fn support(ctx: &Context, cmd: SupportCommand) -> Result<()> {
    ctx.ensure_session("/support")?;
    let client = &ctx.client;
    match cmd {
        SupportCommand::Rooms(args) => show(client.support_rooms(&args.to_query()).await),
        SupportCommand::Chat { user_id, query } => {
            show(client.support_chat(&user_id, &query.to_query()).await)
        }
        SupportCommand::Reply { room_id, message } => {
            let reply = SupportMessage::admin_reply(&room_id, &message);
            show(client.send_support_message(&reply).await)
        }
        SupportCommand::Close { room_id, note } => {
            show(client.close_support_room(&room_id, &note.to_note()).await)
        }
        SupportCommand::Stats => show(client.support_stats().await),
        SupportCommand::Assign {
            room_id,
            staff_id,
            priority,
        } => {
            let assignment = RoomAssignment { staff_id, priority };
            show(client.assign_support_room(&room_id, &assignment).await)
        }
    }
}

pub async fn moderation(ctx: &Context, cmd: ModerationCommand) -> Result<()> {
    ctx.ensure_session("/moderation")?;
    let client = &ctx.client;
    match cmd {
        ModerationCommand::Reports(args) => show(client.reports(&args.to_query()).await),
        ModerationCommand::HandleReport { report_id, body } => {
            let action: ReportAction = parse_body(&body.data)?;
            show(client.handle_report(&report_id, &action).await)
        }
        ModerationCommand::Banned(args) => show(client.banned_users(&args.to_query()).await),
        ModerationCommand::Ban {
            user_id,
            reason,
            duration,
            admin_note,
        } => {
            let ban = BanRequest {
                reason,
                duration,
                admin_note,
            };
            show(client.ban_user(&user_id, &ban).await)
        }
        ModerationCommand::Unban { user_id, note } => {
            show(client.unban_user(&user_id, &note.to_note()).await)
        }
        ModerationCommand::Warn {
            user_id,
            reason,
            message,
            admin_note,
        } => {
            let warning = WarnRequest {
                reason,
                message,
                admin_note,
            };
            show(client.warn_user(&user_id, &warning).await)
        }
        ModerationCommand::Stats => show(client.moderation_stats().await),
        ModerationCommand::History { user_id, query } => {
            show(client.moderation_history(&user_id, &query.to_query()).await)
        }
    }
}

pub async fn analytics(ctx: &Context, cmd: AnalyticsCommand) -> Result<()> {
    ctx.ensure_session("/analytics")?;
    let client = &ctx.client;
    match cmd {
        AnalyticsCommand::Revenue(args) => show(client.revenue_analytics(&args.to_query()).await),
        AnalyticsCommand::Users(args) => show(client.user_analytics(&args.to_query()).await),
        AnalyticsCommand::Gifts(args) => show(client.gift_analytics(&args.to_query()).await),
        AnalyticsCommand::Streams(args) => {
            show(client.stream_analytics_detail(&args.to_query()).await)
        }
        AnalyticsCommand::Financial(args) => {
            show(client.financial_analytics(&args.to_query()).await)
        }
        AnalyticsCommand::Performance(args) => {
            show(client.platform_performance(&args.to_query()).await)
        }
        AnalyticsCommand::Export(export) => save(
            client.export_analytics(&export.query.to_query()).await,
            &export,
        ),
    }
}

pub async fn tools(ctx: &Context, cmd: ToolsCommand) -> Result<()> {
    ctx.ensure_session("/tools")?;
    let client = &ctx.client;
    match cmd {
        ToolsCommand::ClearCache { cache_types } => {
            show(client.clear_system_cache(&CacheClear { cache_types }).await)
        }
        ToolsCommand::Health => show(client.tools_health().await),
        ToolsCommand::DbStats => show(client.database_stats().await),
        ToolsCommand::OptimizeDb { collections } => {
            show(client.optimize_database(&DatabaseOptimize { collections }).await)
        }
        ToolsCommand::Logs(args) => show(client.system_logs(&args.to_query()).await),
        ToolsCommand::ExportLogs(export) => save(
            client.export_system_logs(&export.query.to_query()).await,
            &export,
        ),
        ToolsCommand::RedisStats => show(client.redis_stats().await),
        ToolsCommand::ClearRedis { keys, pattern } => {
            show(client.clear_redis(&RedisClear { keys, pattern }).await)
        }
        ToolsCommand::Performance(args) => show(client.server_performance(&args.to_query()).await),
        ToolsCommand::Backup {
            collections,
            format,
        } => show(
            client
                .backup_database(&BackupRequest {
                    collections,
                    format,
                })
                .await,
        ),
        ToolsCommand::Restore { backup_id } => {
            show(client.restore_database(&RestoreRequest { backup_id }).await)
        }
        ToolsCommand::AuditLogs(args) => show(client.audit_logs(&args.to_query()).await),
    }
}

pub async fn transactions(ctx: &Context, cmd: TransactionsCommand) -> Result<()> {
    ctx.ensure_session("/transactions")?;
    let client = &ctx.client;
    match cmd {
        TransactionsCommand::List(args) => show(client.transactions(&args.to_query()).await),
        TransactionsCommand::Show { transaction_id } => {
            show(client.transaction(&transaction_id).await)
        }
        TransactionsCommand::SetStatus {
            transaction_id,
            status,
            note,
        } => {
            let change = StatusChange {
                status,
                reason: note.reason,
                admin_note: note.admin_note,
            };
            show(client.update_transaction_status(&transaction_id, &change).await)
        }
        TransactionsCommand::Stats(args) => show(client.transaction_stats(&args.to_query()).await),
        TransactionsCommand::Export(export) => save(
            client.export_transactions(&export.query.to_query()).await,
            &export,
        ),
        TransactionsCommand::Suspicious(args) => {
            show(client.suspicious_transactions(&args.to_query()).await)
        }
        TransactionsCommand::Flag {
            transaction_id,
            reason,
            severity,
            admin_note,
        } => {
            let flag = FlagRequest {
                reason,
                admin_note,
                severity,
            };
            show(client.flag_transaction(&transaction_id, &flag).await)
        }
        TransactionsCommand::Unflag {
            transaction_id,
            note,
        } => show(client.unflag_transaction(&transaction_id, &note.to_note()).await),
        TransactionsCommand::ForUser { user_id, query } => {
            show(client.user_transactions(&user_id, &query.to_query()).await)
        }
        TransactionsCommand::Create(body) => {
            let transaction: ManualTransaction = parse_body(&body.data)?;
            show(client.create_manual_transaction(&transaction).await)
        }
        TransactionsCommand::Reverse {
            transaction_id,
            note,
        } => show(client.reverse_transaction(&transaction_id, &note.to_note()).await),
    }
}
