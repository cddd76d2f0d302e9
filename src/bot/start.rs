use serenity::{
    all::{Client, GatewayIntents},
    http::Http,
};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

use crate::{
    bot::handler::Handler, config::Config, error::AppError, scheduler::queue::SyncJob,
};

/// Builds the Discord client without connecting it.
///
/// The returned HTTP client can be used before the gateway connection is up.
///
/// # Arguments
/// - `config` - Application configuration with the bot token
/// - `jobs` - Sync queue the event handlers feed
///
/// # Returns
/// - `Ok((Client, Arc<Http>))` - Client to start and its shared HTTP client
/// - `Err(AppError::DiscordErr)` - Client could not be built (e.g. malformed token)
pub async fn init_bot(
    config: &Config,
    jobs: UnboundedSender<SyncJob>,
) -> Result<(Client, Arc<Http>), AppError> {
    // MESSAGE_CONTENT is a privileged intent - must be enabled in Discord Developer Portal
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let handler = Handler::new(jobs);

    let client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(handler)
        .await?;

    let http = client.http.clone();

    Ok((client, http))
}

/// Connects the bot and processes gateway events until shutdown.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
