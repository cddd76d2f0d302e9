mod bot;
mod config;
mod error;
mod model;
mod router;
mod scheduler;
mod service;
mod startup;
mod util;

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::{
    config::Config,
    error::AppError,
    scheduler::queue::SyncWorker,
    service::{discord::SerenityGateway, github::GitHubClient, sync::IssueSyncService},
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;

    tracing::info!(
        "Starting issue board for {} in #{}",
        config.sync.repository(),
        config.sync.channel_name
    );
    if config.github_token.is_none() {
        tracing::warn!("GITHUB_TOKEN not set, using unauthenticated GitHub requests");
    }

    let http_client = startup::setup_reqwest_client()?;
    let github = Arc::new(GitHubClient::new(http_client, &config));

    let (jobs, receiver) = mpsc::unbounded_channel();

    // Initialize Discord bot and extract HTTP client
    let (bot_client, discord_http) = bot::start::init_bot(&config, jobs.clone()).await?;
    let discord = Arc::new(SerenityGateway::new(discord_http));

    let service = IssueSyncService::new(github, discord, Arc::new(config.sync.clone()));
    let worker = SyncWorker::new(service, receiver, jobs, config.update_interval());
    tokio::spawn(worker.run());

    let port = config.port;
    tokio::spawn(async move {
        if let Err(e) = startup::serve_health(port).await {
            tracing::error!("Health endpoint error: {}", e);
        }
    });

    bot::start::start_bot(bot_client).await
}
