pub mod commands;
pub mod error_handler;

use std::str::FromStr;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use futures::lock::Mutex;
use log::info;
use poise::Framework;
use poise::FrameworkOptions;
use poise::serenity_prelude as serenity;
use serenity::Client;
use serenity::ClientBuilder;
use serenity::FullEvent;
use serenity::GatewayIntents;
use serenity::Http;
use serenity::Token;

type Error = Box<dyn std::error::Error + Send + Sync>;

use crate::bot::commands::Cog;
use crate::bot::commands::Cogs;
use crate::bot::error_handler::ErrorHandler;
use crate::config::Config;
use crate::database::Database;
use crate::event::EventBus;
use crate::event::VoiceStateEvent;
use crate::service::Services;

pub struct Data {
    pub config: Arc<Config>,
    pub db: Arc<Database>,
    pub service: Arc<Services>,
}

pub struct Bot {
    pub http: Arc<Http>,
    client_builder: Option<ClientBuilder>,
    client: Arc<Mutex<Option<Client>>>,
}

impl Bot {
    pub async fn new(
        config: Arc<Config>,
        db: Arc<Database>,
        event_bus: Arc<EventBus<VoiceStateEvent>>,
        service: Arc<Services>,
    ) -> Result<Self> {
        info!("Initializing bot...");

        let framework = Self::create_framework();
        let data = Arc::new(Data {
            config: config.clone(),
            db,
            service,
        });
        let (token, intents) = Self::create_client_config(&config)?;
        let event_handler = Arc::new(BotEventHandler::new(event_bus));

        let client_builder = ClientBuilder::new(token.clone(), intents)
            .event_handler(event_handler)
            .framework(framework)
            .data(data);

        Ok(Self {
            http: Arc::new(Http::new(token)),
            client_builder: Some(client_builder),
            client: Arc::new(Mutex::new(None)),
        })
    }

    pub fn start(&mut self) {
        info!("Starting bot client...");
        let client_builder = self.client_builder.take().expect("start() called twice");
        let client = self.client.clone();

        tokio::spawn(async move {
            info!("Connecting bot to Discord...");
            let built_client = client_builder.await.expect("Failed to build Discord client");

            *client.lock().await = Some(built_client);
            info!("Bot connected to Discord.");

            client
                .lock()
                .await
                .as_mut()
                .unwrap()
                .start()
                .await
                .expect("Bot client crashed");
        });

        info!("Bot client start initiated.");
    }

    fn create_framework() -> Box<Framework<Data, Error>> {
        let options = FrameworkOptions::<Data, Error> {
            commands: Cogs.commands(),
            on_error: |error| Box::pin(Self::on_error(error)),
            ..Default::default()
        };

        Box::new(poise::Framework::builder().options(options).build())
    }

    fn create_client_config(config: &Config) -> Result<(Token, GatewayIntents)> {
        let token = Token::from_str(&config.discord_token)?;
        // non_privileged() includes GUILD_VOICE_STATES.
        let intents = GatewayIntents::non_privileged();
        Ok((token, intents))
    }

    async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
        ErrorHandler::handle(error).await;
    }
}

pub struct BotEventHandler {
    event_bus: Arc<EventBus<VoiceStateEvent>>,
}

impl BotEventHandler {
    pub fn new(event_bus: Arc<EventBus<VoiceStateEvent>>) -> Self {
        Self { event_bus }
    }
}

#[async_trait]
impl serenity::EventHandler for BotEventHandler {
    async fn dispatch(&self, _context: &serenity::Context, event: &FullEvent) {
        #[allow(clippy::single_match)]
        match event {
            FullEvent::VoiceStateUpdate { old, new, .. } => {
                self.event_bus.publish(VoiceStateEvent {
                    old: old.clone(),
                    new: new.clone(),
                });
            }
            _ => {}
        };
    }
}
