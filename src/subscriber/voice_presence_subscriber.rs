use std::sync::Arc;

use anyhow::Result;
use log::debug;
use log::warn;
use poise::serenity_prelude as serenity;
use serenity::ChannelId;
use serenity::GuildId;
use serenity::UserId;
use serenity::VoiceState;

use crate::event::VoiceStateEvent;
use crate::service::voice_subscription_service::VoiceSubscriptionService;
use crate::subscriber::Subscriber;
use crate::subscriber::directory::DirectoryError;
use crate::subscriber::directory::GuildDirectory;
use crate::subscriber::notifier::Notifier;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionKind {
    Joined,
    Left,
}

/// A notifiable voice transition, keyed to the guild snapshot it happened in:
/// the new channel's guild for a join, the old channel's guild for a leave.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoiceTransition {
    pub kind: TransitionKind,
    pub guild_id: GuildId,
    pub channel_id: ChannelId,
    pub user_id: UserId,
}

/// Classifies a raw voice-state update.
///
/// Only none-to-channel (join) and channel-to-none (leave) transitions are
/// notifiable. Channel-to-channel moves and in-place changes (mute, deafen)
/// return `None`.
pub fn classify(event: &VoiceStateEvent) -> Option<VoiceTransition> {
    let old_channel = event.old.as_ref().and_then(|v| v.channel_id);

    match (old_channel, event.new.channel_id) {
        (None, Some(channel_id)) => Some(VoiceTransition {
            kind: TransitionKind::Joined,
            guild_id: event.new.guild_id?,
            channel_id,
            user_id: event.new.user_id,
        }),
        (Some(channel_id), None) => {
            let old = event.old.as_ref()?;
            Some(VoiceTransition {
                kind: TransitionKind::Left,
                guild_id: old.guild_id?,
                channel_id,
                user_id: old.user_id,
            })
        }
        _ => None,
    }
}

/// Display name carried on the relevant voice state, if the gateway included
/// the member payload.
fn display_name_from_event(event: &VoiceStateEvent, kind: TransitionKind) -> Option<String> {
    let state: &VoiceState = match kind {
        TransitionKind::Joined => &event.new,
        TransitionKind::Left => event.old.as_ref()?,
    };
    state
        .member
        .as_ref()
        .map(|member| member.display_name().to_string())
}

/// Watches voice-state transitions and DMs every subscriber of the guild who
/// is allowed to see the channel in question.
///
/// All per-subscriber failures are logged and skipped; nothing on this path
/// may take down the listener.
pub struct VoicePresenceSubscriber<D, N> {
    service: Arc<VoiceSubscriptionService>,
    directory: D,
    notifier: N,
}

impl<D, N> VoicePresenceSubscriber<D, N>
where
    D: GuildDirectory,
    N: Notifier,
{
    pub fn new(service: Arc<VoiceSubscriptionService>, directory: D, notifier: N) -> Self {
        Self {
            service,
            directory,
            notifier,
        }
    }

    async fn render_message(
        &self,
        event: &VoiceStateEvent,
        transition: &VoiceTransition,
    ) -> Result<String, DirectoryError> {
        let display_name = match display_name_from_event(event, transition.kind) {
            Some(name) => name,
            None => {
                self.directory
                    .member_display_name(transition.guild_id, transition.user_id)
                    .await?
            }
        };
        let channel_name = self.directory.channel_name(transition.channel_id).await?;
        let guild_name = self.directory.guild_name(transition.guild_id).await?;

        let verb = match transition.kind {
            TransitionKind::Joined => "joined",
            TransitionKind::Left => "left",
        };
        Ok(format!(
            "User **{display_name}** has {verb} **{channel_name}** in **{guild_name}**"
        ))
    }

    async fn notify_subscriber(&self, user_id: &str, transition: &VoiceTransition, text: &str) {
        let subscriber_id = match user_id.parse::<u64>() {
            Ok(id) => UserId::new(id),
            Err(_) => {
                warn!("Skipping subscriber with malformed user id {user_id}");
                return;
            }
        };

        match self
            .directory
            .can_view_channel(transition.guild_id, transition.channel_id, subscriber_id)
            .await
        {
            Ok(true) => {
                if let Err(e) = self.notifier.notify(subscriber_id, text).await {
                    warn!("Failed to notify subscriber {subscriber_id}: {e}");
                }
            }
            Ok(false) => {
                debug!(
                    "Subscriber {subscriber_id} cannot view channel {}, skipping",
                    transition.channel_id
                );
            }
            Err(e) => {
                warn!("Permission check for subscriber {subscriber_id} failed, skipping: {e}");
            }
        }
    }
}

#[async_trait::async_trait]
impl<D, N> Subscriber<VoiceStateEvent> for VoicePresenceSubscriber<D, N>
where
    D: GuildDirectory,
    N: Notifier,
{
    async fn callback(&self, event: VoiceStateEvent) -> Result<()> {
        let Some(transition) = classify(&event) else {
            return Ok(());
        };
        debug!(
            "User {} {:?} voice channel {} in guild {}",
            transition.user_id, transition.kind, transition.channel_id, transition.guild_id
        );

        let subscribers = self
            .service
            .subscribers_for_guild(&transition.guild_id.to_string())
            .await;

        // A user is never notified about their own movement.
        let actor_id = transition.user_id.to_string();
        let recipients: Vec<String> = subscribers
            .into_iter()
            .filter(|user_id| *user_id != actor_id)
            .collect();
        if recipients.is_empty() {
            return Ok(());
        }

        let text = match self.render_message(&event, &transition).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Could not resolve event context, notifying no one: {e}");
                return Ok(());
            }
        };

        let sends = recipients
            .iter()
            .map(|user_id| self.notify_subscriber(user_id, &transition, &text));
        futures::future::join_all(sends).await;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voice_state(guild_id: Option<u64>, channel_id: Option<u64>, user_id: u64) -> VoiceState {
        let json = serde_json::json!({
            "user_id": user_id.to_string(),
            "guild_id": guild_id.map(|id| id.to_string()),
            "channel_id": channel_id.map(|id| id.to_string()),
            "session_id": "session1",
            "deaf": false,
            "mute": false,
            "self_deaf": false,
            "self_mute": false,
            "suppress": false,
            "self_video": false,
        });
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_classify_join() {
        let event = VoiceStateEvent {
            old: None,
            new: voice_state(Some(456), Some(789), 123),
        };

        let transition = classify(&event).unwrap();
        assert_eq!(transition.kind, TransitionKind::Joined);
        assert_eq!(transition.guild_id, GuildId::new(456));
        assert_eq!(transition.channel_id, ChannelId::new(789));
        assert_eq!(transition.user_id, UserId::new(123));
    }

    #[test]
    fn test_classify_join_with_channelless_old_state() {
        // The gateway may deliver an old state with no channel; still a join.
        let event = VoiceStateEvent {
            old: Some(voice_state(Some(456), None, 123)),
            new: voice_state(Some(456), Some(789), 123),
        };

        let transition = classify(&event).unwrap();
        assert_eq!(transition.kind, TransitionKind::Joined);
    }

    #[test]
    fn test_classify_leave_uses_old_state() {
        let event = VoiceStateEvent {
            old: Some(voice_state(Some(456), Some(789), 123)),
            new: voice_state(Some(456), None, 123),
        };

        let transition = classify(&event).unwrap();
        assert_eq!(transition.kind, TransitionKind::Left);
        assert_eq!(transition.guild_id, GuildId::new(456));
        assert_eq!(transition.channel_id, ChannelId::new(789));
    }

    #[test]
    fn test_classify_ignores_moves() {
        let event = VoiceStateEvent {
            old: Some(voice_state(Some(456), Some(781), 123)),
            new: voice_state(Some(456), Some(782), 123),
        };

        assert_eq!(classify(&event), None);
    }

    #[test]
    fn test_classify_ignores_in_place_changes() {
        // Same channel before and after, e.g. a mute or deafen toggle.
        let event = VoiceStateEvent {
            old: Some(voice_state(Some(456), Some(789), 123)),
            new: voice_state(Some(456), Some(789), 123),
        };

        assert_eq!(classify(&event), None);
    }

    #[test]
    fn test_classify_ignores_join_without_guild() {
        let event = VoiceStateEvent {
            old: None,
            new: voice_state(None, Some(789), 123),
        };

        assert_eq!(classify(&event), None);
    }
}
