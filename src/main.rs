//! Application entry point for whos-there-bot.
//!
//! Initializes all components and starts the Discord bot.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use dotenv::dotenv;
use log::debug;
use log::info;

use whos_there_bot::bot::Bot;
use whos_there_bot::config::Config;
use whos_there_bot::database::Database;
use whos_there_bot::event::EventBus;
use whos_there_bot::event::VoiceStateEvent;
use whos_there_bot::logging::setup_logging;
use whos_there_bot::service::Services;
use whos_there_bot::subscriber::DiscordDirectory;
use whos_there_bot::subscriber::DiscordDmNotifier;
use whos_there_bot::subscriber::VoicePresenceSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let init_start = Instant::now();
    let config = load_config()?;
    let event_bus = Arc::new(EventBus::<VoiceStateEvent>::new());

    let db = setup_database(&config, init_start).await?;
    let services = Arc::new(Services::new(db.clone()));

    let bot = setup_bot(&config, db, event_bus.clone(), services.clone(), init_start).await?;
    setup_subscribers(event_bus, &bot, &services);

    run(init_start).await
}

fn load_config() -> Result<Arc<Config>> {
    let config = Arc::new(Config::load()?);
    setup_logging(&config)?;
    info!("Starting whos-there-bot...");
    Ok(config)
}

async fn setup_database(config: &Config, init_start: Instant) -> Result<Arc<Database>> {
    debug!("Setting up Database...");
    let db = Arc::new(Database::new(&config.db_url, &config.db_path).await?);

    info!("Running database migrations...");
    db.run_migrations().await?;
    info!(
        "Database setup complete ({:.2}s).",
        init_start.elapsed().as_secs_f64()
    );

    Ok(db)
}

async fn setup_bot(
    config: &Arc<Config>,
    db: Arc<Database>,
    event_bus: Arc<EventBus<VoiceStateEvent>>,
    services: Arc<Services>,
    init_start: Instant,
) -> Result<Arc<Bot>> {
    info!("Starting bot...");
    let mut bot = Bot::new(config.clone(), db, event_bus, services).await?;

    bot.start();
    let bot = Arc::new(bot);
    info!(
        "Bot setup complete ({:.2}s).",
        init_start.elapsed().as_secs_f64()
    );

    Ok(bot)
}

fn setup_subscribers(
    event_bus: Arc<EventBus<VoiceStateEvent>>,
    bot: &Bot,
    services: &Services,
) {
    debug!("Setting up Subscribers...");

    let directory = DiscordDirectory::new(bot.http.clone());
    let notifier = DiscordDmNotifier::new(bot.http.clone());
    let presence_subscriber = Arc::new(VoicePresenceSubscriber::new(
        services.voice_subscription.clone(),
        directory,
        notifier,
    ));

    event_bus.register_subscriber(presence_subscriber);
}

async fn run(init_start: Instant) -> Result<()> {
    info!(
        "whos-there-bot is up in {:.2}s. Press Ctrl+C to stop.",
        init_start.elapsed().as_secs_f64()
    );

    tokio::signal::ctrl_c().await?;
    info!("Ctrl+C received, shutting down.");

    Ok(())
}
