//! LessonRelay Telegram Bot
//!
//! Main application entry point

use std::sync::Arc;
use anyhow::Context;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::{error, info, warn};

use LessonRelay::{
    config::Settings,
    handlers::{self, Command},
    middleware::{AuthGuard, LoggingMiddleware},
    services::{health, ServiceFactory, TelegramTransport},
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("failed to load configuration")?;
    settings.validate().context("invalid configuration")?;

    // Initialize logging; the guard flushes the log file on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", LessonRelay::info());
    info!(
        admins = settings.bot.admin_ids.len(),
        destinations = settings.destinations.len(),
        "Configuration loaded"
    );

    if settings.health.enabled {
        let health_config = settings.health.clone();
        tokio::spawn(async move {
            if let Err(e) = health::run(&health_config).await {
                error!(error = %e, "Liveness endpoint stopped");
            }
        });
    }

    let bot = Bot::new(&settings.bot.token);

    info!("Initializing services...");
    let guard = AuthGuard::new(&settings.bot);
    let transport = Arc::new(TelegramTransport::new(bot.clone()));
    let services = ServiceFactory::new(settings, transport)?;

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!(error = %e, "Failed to register bot commands");
    }

    let mut dispatcher = Dispatcher::builder(bot, handlers::schema())
        .dependencies(dptree::deps![services, guard, LoggingMiddleware::default()])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd);
        })
        .enable_ctrlc_handler()
        .build();

    info!("Starting bot with polling mode...");
    dispatcher.dispatch().await;

    info!("LessonRelay bot has been shut down.");

    Ok(())
}
