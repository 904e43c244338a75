use std::sync::Arc;

use log::info;
use poise::serenity_prelude as serenity;
use serenity::CreateMessage;

use crate::subscriber::notifier::DeliveryError;
use crate::subscriber::notifier::Notifier;

/// Sends notifications over Discord direct messages.
///
/// DM channel creation is handled by the platform; a send fails if the user
/// shares no server with the bot anymore or has DMs blocked.
pub struct DiscordDmNotifier {
    http: Arc<serenity::Http>,
}

impl DiscordDmNotifier {
    pub fn new(http: Arc<serenity::Http>) -> Self {
        info!("Initializing DiscordDmNotifier.");
        Self { http }
    }
}

#[async_trait::async_trait]
impl Notifier for DiscordDmNotifier {
    async fn notify(&self, user_id: serenity::UserId, text: &str) -> Result<(), DeliveryError> {
        let message = CreateMessage::new().content(text.to_string());
        user_id
            .dm(&self.http, message)
            .await
            .map_err(|source| DeliveryError::SendRejected { user_id, source })?;
        Ok(())
    }
}
