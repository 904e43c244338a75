use anyhow::Result;

pub mod directory;
pub mod discord_dm_notifier;
pub mod notifier;
pub mod voice_presence_subscriber;

pub use directory::DiscordDirectory;
pub use directory::GuildDirectory;
pub use discord_dm_notifier::DiscordDmNotifier;
pub use notifier::Notifier;
pub use voice_presence_subscriber::VoicePresenceSubscriber;

#[async_trait::async_trait]
pub trait Subscriber<E> {
    async fn callback(&self, event: E) -> Result<()>;
}
