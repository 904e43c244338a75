use std::sync::Arc;

use poise::serenity_prelude as serenity;
use serenity::ChannelId;
use serenity::GuildId;
use serenity::Permissions;
use serenity::UserId;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DirectoryError {
    #[error("Platform lookup failed: {0}")]
    Platform(#[from] serenity::Error),

    #[error("Channel {channel_id} is not a guild channel")]
    NotAGuildChannel { channel_id: ChannelId },
}

/// Narrow read-only view of the chat platform, covering exactly what the
/// presence watcher needs. Keeping this behind a trait keeps the fan-out and
/// visibility logic testable without a live gateway connection.
#[async_trait::async_trait]
pub trait GuildDirectory: Send + Sync {
    async fn guild_name(&self, guild_id: GuildId) -> Result<String, DirectoryError>;

    async fn channel_name(&self, channel_id: ChannelId) -> Result<String, DirectoryError>;

    async fn member_display_name(
        &self,
        guild_id: GuildId,
        user_id: UserId,
    ) -> Result<String, DirectoryError>;

    /// Whether `user_id`'s membership in `guild_id` grants the "view channel"
    /// permission on `channel_id`.
    async fn can_view_channel(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
        user_id: UserId,
    ) -> Result<bool, DirectoryError>;
}

/// `GuildDirectory` over the Discord REST API.
pub struct DiscordDirectory {
    http: Arc<serenity::Http>,
}

impl DiscordDirectory {
    pub fn new(http: Arc<serenity::Http>) -> Self {
        Self { http }
    }

    async fn get_guild_channel(
        &self,
        channel_id: ChannelId,
    ) -> Result<serenity::GuildChannel, DirectoryError> {
        match self.http.get_channel(channel_id).await? {
            serenity::Channel::Guild(channel) => Ok(channel),
            _ => Err(DirectoryError::NotAGuildChannel { channel_id }),
        }
    }
}

#[async_trait::async_trait]
impl GuildDirectory for DiscordDirectory {
    async fn guild_name(&self, guild_id: GuildId) -> Result<String, DirectoryError> {
        Ok(self.http.get_guild(guild_id).await?.name.to_string())
    }

    async fn channel_name(&self, channel_id: ChannelId) -> Result<String, DirectoryError> {
        Ok(self.get_guild_channel(channel_id).await?.name.to_string())
    }

    async fn member_display_name(
        &self,
        guild_id: GuildId,
        user_id: UserId,
    ) -> Result<String, DirectoryError> {
        let member = self.http.get_member(guild_id, user_id).await?;
        Ok(member.display_name().to_string())
    }

    async fn can_view_channel(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
        user_id: UserId,
    ) -> Result<bool, DirectoryError> {
        let guild = self.http.get_guild(guild_id).await?;
        let member = match self.http.get_member(guild_id, user_id).await {
            Ok(member) => member,
            // Not a member of this guild anymore, so nothing is visible.
            Err(_) => return Ok(false),
        };
        let channel = self.get_guild_channel(channel_id).await?;

        let permissions = guild.user_permissions_in(&channel, &member);
        Ok(permissions.contains(Permissions::VIEW_CHANNEL))
    }
}
