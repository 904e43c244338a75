//! Pure request/response handlers for the subscription commands.
//!
//! Each handler validates the interaction context before touching storage and
//! always produces a user-facing message. Storage failures are reported as a
//! generic apology; the underlying error is logged, never shown.

use log::error;

use crate::service::voice_subscription_service::VoiceSubscriptionService;

pub const MSG_GUILD_ONLY: &str = "This command needs to be ran inside a Discord Server.";
pub const MSG_MISSING_USER: &str = "This command needs to be called by a user with an id.";
pub const MSG_SUBSCRIBED: &str = "Successfully subscribed to notifications for this guild.";
pub const MSG_UNSUBSCRIBED: &str = "Successfully unsubscribed from notifications for this guild.";
pub const MSG_UNSUBSCRIBED_ALL: &str = "Successfully unsubscribed from all guilds notifications.";
pub const MSG_GENERIC_ERROR: &str = "An error occurred while processing your request.";

/// Interaction context as supplied by the command dispatcher. Both fields are
/// optional; handlers validate them before any storage access.
#[derive(Debug, Clone, Default)]
pub struct CommandRequest {
    pub guild_id: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResponse {
    pub content: String,
}

impl CommandResponse {
    fn new(content: &str) -> Self {
        Self {
            content: content.to_string(),
        }
    }
}

pub async fn subscribe(
    service: &VoiceSubscriptionService,
    request: &CommandRequest,
) -> CommandResponse {
    let Some(guild_id) = &request.guild_id else {
        return CommandResponse::new(MSG_GUILD_ONLY);
    };
    let Some(user_id) = &request.user_id else {
        return CommandResponse::new(MSG_MISSING_USER);
    };

    match service.subscribe(guild_id, user_id).await {
        Ok(()) => CommandResponse::new(MSG_SUBSCRIBED),
        Err(e) => {
            error!("Subscribe failed for user {user_id} in guild {guild_id}: {e}");
            CommandResponse::new(MSG_GENERIC_ERROR)
        }
    }
}

pub async fn unsubscribe(
    service: &VoiceSubscriptionService,
    request: &CommandRequest,
) -> CommandResponse {
    let Some(guild_id) = &request.guild_id else {
        return CommandResponse::new(MSG_GUILD_ONLY);
    };
    let Some(user_id) = &request.user_id else {
        return CommandResponse::new(MSG_MISSING_USER);
    };

    match service.unsubscribe(guild_id, user_id).await {
        Ok(()) => CommandResponse::new(MSG_UNSUBSCRIBED),
        Err(e) => {
            error!("Unsubscribe failed for user {user_id} in guild {guild_id}: {e}");
            CommandResponse::new(MSG_GENERIC_ERROR)
        }
    }
}

/// Works from anywhere, so no guild check.
pub async fn unsubscribe_all(
    service: &VoiceSubscriptionService,
    request: &CommandRequest,
) -> CommandResponse {
    let Some(user_id) = &request.user_id else {
        return CommandResponse::new(MSG_MISSING_USER);
    };

    match service.unsubscribe_all(user_id).await {
        Ok(()) => CommandResponse::new(MSG_UNSUBSCRIBED_ALL),
        Err(e) => {
            error!("Unsubscribe-all failed for user {user_id}: {e}");
            CommandResponse::new(MSG_GENERIC_ERROR)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::database::Database;
    use crate::database::table::Table;

    async fn create_mock_service() -> (Arc<Database>, VoiceSubscriptionService) {
        let t = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let db_path = format!("/tmp/whos-there-handler-test-{t}.sqlite");
        let db_url = format!("sqlite://{db_path}");

        let db = Arc::new(Database::new(&db_url, &db_path).await.unwrap());
        db.run_migrations().await.unwrap();
        (db.clone(), VoiceSubscriptionService::new(db))
    }

    fn request(guild_id: Option<&str>, user_id: Option<&str>) -> CommandRequest {
        CommandRequest {
            guild_id: guild_id.map(String::from),
            user_id: user_id.map(String::from),
        }
    }

    #[tokio::test]
    async fn test_subscribe_without_guild_returns_guild_only_and_skips_storage() {
        let (db, service) = create_mock_service().await;

        let response = subscribe(&service, &request(None, Some("u1"))).await;

        assert_eq!(response.content, MSG_GUILD_ONLY);
        let all = db.voice_subscription_table.select_all().await.unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn test_subscribe_without_user_returns_missing_user() {
        let (db, service) = create_mock_service().await;

        let response = subscribe(&service, &request(Some("g1"), None)).await;

        assert_eq!(response.content, MSG_MISSING_USER);
        let all = db.voice_subscription_table.select_all().await.unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn test_subscribe_success() {
        let (db, service) = create_mock_service().await;

        let response = subscribe(&service, &request(Some("g1"), Some("u1"))).await;

        assert_eq!(response.content, MSG_SUBSCRIBED);
        assert!(db.voice_subscription_table.exists("g1", "u1").await.unwrap());
    }

    #[tokio::test]
    async fn test_subscribe_twice_reports_success_both_times() {
        let (db, service) = create_mock_service().await;
        let req = request(Some("g1"), Some("u1"));

        assert_eq!(subscribe(&service, &req).await.content, MSG_SUBSCRIBED);
        assert_eq!(subscribe(&service, &req).await.content, MSG_SUBSCRIBED);

        let all = db.voice_subscription_table.select_all().await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_unsubscribe_without_guild_returns_guild_only() {
        let (_db, service) = create_mock_service().await;

        let response = unsubscribe(&service, &request(None, Some("u1"))).await;

        assert_eq!(response.content, MSG_GUILD_ONLY);
    }

    #[tokio::test]
    async fn test_unsubscribe_nonexistent_reports_success() {
        let (_db, service) = create_mock_service().await;

        let response = unsubscribe(&service, &request(Some("g1"), Some("u1"))).await;

        assert_eq!(response.content, MSG_UNSUBSCRIBED);
    }

    #[tokio::test]
    async fn test_unsubscribe_all_does_not_require_guild() {
        let (db, service) = create_mock_service().await;
        service.subscribe("g1", "u1").await.unwrap();
        service.subscribe("g2", "u1").await.unwrap();

        let response = unsubscribe_all(&service, &request(None, Some("u1"))).await;

        assert_eq!(response.content, MSG_UNSUBSCRIBED_ALL);
        let all = db.voice_subscription_table.select_all().await.unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn test_subscribe_storage_failure_returns_generic_apology() {
        let (db, service) = create_mock_service().await;
        db.pool.close().await;

        let response = subscribe(&service, &request(Some("g1"), Some("u1"))).await;

        assert_eq!(response.content, MSG_GENERIC_ERROR);
    }
}
