use poise::serenity_prelude as serenity;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DeliveryError {
    #[error("Could not deliver DM to user {user_id}: {source}")]
    SendRejected {
        user_id: serenity::UserId,
        #[source]
        source: serenity::Error,
    },
}

/// Delivers one text notification to one user. Implementations own DM channel
/// resolution; a failure for one recipient must never affect another.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, user_id: serenity::UserId, text: &str) -> Result<(), DeliveryError>;
}
