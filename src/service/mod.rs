use std::sync::Arc;

use crate::database::Database;
use crate::service::voice_subscription_service::VoiceSubscriptionService;

pub mod error;
pub mod voice_subscription_service;

pub struct Services {
    pub voice_subscription: Arc<VoiceSubscriptionService>,
}

impl Services {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            voice_subscription: Arc::new(VoiceSubscriptionService::new(db)),
        }
    }
}
