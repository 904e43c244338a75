use std::sync::Arc;

use log::debug;
use log::warn;

use crate::database::Database;
use crate::database::model::VoiceSubscriptionModel;
use crate::service::error::ServiceError;

/// Owns all access to persisted voice subscriptions.
///
/// Mutations surface storage failures to the caller; the guild read path
/// degrades to an empty result instead, so the long-lived presence listener
/// never dies on a transient backend outage.
pub struct VoiceSubscriptionService {
    db: Arc<Database>,
}

impl VoiceSubscriptionService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Opts `user_id` in to voice notifications for `guild_id`. Subscribing
    /// twice is a successful no-op.
    pub async fn subscribe(&self, guild_id: &str, user_id: &str) -> Result<(), ServiceError> {
        let model = VoiceSubscriptionModel::new(guild_id, user_id);
        self.db.voice_subscription_table.insert(&model).await?;
        debug!("User {user_id} subscribed to guild {guild_id}");
        Ok(())
    }

    /// Opts `user_id` out for `guild_id`. Unsubscribing without a prior
    /// subscription is a successful no-op.
    pub async fn unsubscribe(&self, guild_id: &str, user_id: &str) -> Result<(), ServiceError> {
        self.db
            .voice_subscription_table
            .delete(guild_id, user_id)
            .await?;
        debug!("User {user_id} unsubscribed from guild {guild_id}");
        Ok(())
    }

    /// Removes every subscription owned by `user_id` across all guilds.
    ///
    /// The delete fan-out is best-effort: a failed delete is logged and the
    /// remaining rows are still attempted. Only a failed lookup is an error.
    pub async fn unsubscribe_all(&self, user_id: &str) -> Result<(), ServiceError> {
        let subscriptions = self
            .db
            .voice_subscription_table
            .select_all_by_user_id(user_id)
            .await?;

        for sub in subscriptions {
            if let Err(e) = self
                .db
                .voice_subscription_table
                .delete(&sub.guild_id, &sub.user_id)
                .await
            {
                warn!(
                    "Failed to delete subscription ({}, {}), continuing: {}",
                    sub.guild_id, sub.user_id, e
                );
            }
        }
        Ok(())
    }

    /// Returns the user ids subscribed to `guild_id`, in no particular order.
    ///
    /// A backend failure degrades to an empty list so the presence watcher
    /// skips the event instead of crashing. Dropped notifications during an
    /// outage are acceptable; notification is best-effort.
    pub async fn subscribers_for_guild(&self, guild_id: &str) -> Vec<String> {
        match self
            .db
            .voice_subscription_table
            .select_all_by_guild_id(guild_id)
            .await
        {
            Ok(models) => models.into_iter().map(|m| m.user_id).collect(),
            Err(e) => {
                warn!("Subscriber lookup for guild {guild_id} failed, notifying no one: {e}");
                Vec::new()
            }
        }
    }
}
