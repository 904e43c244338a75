use poise::serenity_prelude::VoiceState;

pub mod event_bus;

pub use event_bus::EventBus;

/// Gateway voice-state transition as delivered by Discord.
///
/// From https://discord.com/developers/docs/events/gateway-events#voice-state-update:
/// > Sent when someone joins/leaves/moves voice channels.
///
/// - `old` is `None` if and only if the user joined a voice channel
/// - `new.channel_id` is `None` if and only if the user left a voice channel
#[derive(Clone, Debug)]
pub struct VoiceStateEvent {
    pub old: Option<VoiceState>,
    pub new: VoiceState,
}
