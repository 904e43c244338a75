use serde::Serialize;
use sqlx::FromRow;

/// One opted-in (guild, user) pair. The pair is the identity; there are no
/// secondary attributes.
#[derive(FromRow, Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct VoiceSubscriptionModel {
    pub guild_id: String,
    pub user_id: String,
}

impl VoiceSubscriptionModel {
    pub fn new(guild_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            guild_id: guild_id.into(),
            user_id: user_id.into(),
        }
    }
}
