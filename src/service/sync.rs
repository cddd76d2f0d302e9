//! Issue sync orchestration.
//!
//! `IssueSyncService` drives the pipeline for one guild at a time: find the issues
//! channel, resolve labels, rebuild the message map from history, then fetch,
//! bucket and publish. Sweeps over several guilds walk an explicit queue one
//! guild after another so that GitHub and Discord only ever see one guild's burst
//! of requests at once. A failing guild is logged and skipped; it never stops the
//! sweep.

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::Utc;
use serenity::all::{ChannelId, GuildId, UserId};

use crate::{
    config::SyncSettings,
    error::AppError,
    model::{
        command::{BotCommand, CommandOutcome, StatusReport},
        guild::{GuildPhase, GuildState},
    },
    service::{
        bucket::Bucketizer,
        discord::DiscordGateway,
        embed::{builder::build_issue_embed, publish::EmbedPublisher},
        github::IssueTracker,
        issue::IssueFetcher,
        label::LabelResolver,
        locator::MessageLocator,
        registry::GuildRegistry,
    },
};

pub struct IssueSyncService {
    github: Arc<dyn IssueTracker>,
    discord: Arc<dyn DiscordGateway>,
    settings: Arc<SyncSettings>,
}

impl IssueSyncService {
    pub fn new(
        github: Arc<dyn IssueTracker>,
        discord: Arc<dyn DiscordGateway>,
        settings: Arc<SyncSettings>,
    ) -> Self {
        Self {
            github,
            discord,
            settings,
        }
    }

    /// Initializes every guild the bot was already in when it connected.
    ///
    /// Guilds are processed strictly one after another. Completing the sweep
    /// counts as a global update for the status report.
    ///
    /// # Arguments
    /// - `registry` - Guild registry, receives one entry per guild
    /// - `guild_ids` - Guilds listed in the gateway's ready event
    pub async fn startup(&self, registry: &mut GuildRegistry, guild_ids: Vec<GuildId>) {
        let mut queue: VecDeque<GuildId> = guild_ids.into_iter().collect();

        tracing::info!("Initializing {} guilds", queue.len());

        while let Some(guild_id) = queue.pop_front() {
            if let Err(e) = self.initialize_guild(registry, guild_id).await {
                tracing::error!("Failed to initialize guild {}: {}", guild_id, e);
            }
        }

        registry.mark_updated(Utc::now());
    }

    /// Brings one guild to Ready and publishes its summaries.
    ///
    /// Already Ready guilds are left untouched. If the channel lookup or the
    /// history scan fails the guild is put back to Uninitialized so a later tick
    /// retries it.
    ///
    /// # Returns
    /// - `Ok(())` - Guild is Ready and its summaries were published
    /// - `Err(AppError::NotFound)` - The guild has no channel with the configured name
    /// - `Err(AppError)` - Discord or GitHub failure during setup or the first refresh
    pub async fn initialize_guild(
        &self,
        registry: &mut GuildRegistry,
        guild_id: GuildId,
    ) -> Result<(), AppError> {
        let bot_user_id = registry.bot_user_id();
        let state = registry.entry(guild_id);

        if state.is_ready() {
            tracing::debug!("Guild {} already initialized, skipping", guild_id);
            return Ok(());
        }

        state.phase = GuildPhase::Initializing;
        if let Err(e) = self.prepare_guild(state, bot_user_id).await {
            state.phase = GuildPhase::Uninitialized;
            return Err(e);
        }
        state.phase = GuildPhase::Ready;

        tracing::info!(
            "Guild {} ready with {} tracked labels and {} existing messages",
            guild_id,
            state.labels.len(),
            state.message_count()
        );

        self.refresh_guild(state).await?;

        Ok(())
    }

    async fn prepare_guild(
        &self,
        state: &mut GuildState,
        bot_user_id: Option<UserId>,
    ) -> Result<(), AppError> {
        let channel_id = self
            .discord
            .find_text_channel(state.guild_id, &self.settings.channel_name)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Channel #{} not found in guild {}",
                    self.settings.channel_name, state.guild_id
                ))
            })?;
        state.channel_id = Some(channel_id);

        state.labels = LabelResolver::new(self.github.as_ref(), &self.settings)
            .resolve()
            .await;

        self.rescan_messages(state, channel_id, bot_user_id).await
    }

    async fn rescan_messages(
        &self,
        state: &mut GuildState,
        channel_id: ChannelId,
        bot_user_id: Option<UserId>,
    ) -> Result<(), AppError> {
        let Some(bot_user_id) = bot_user_id else {
            tracing::warn!(
                "Bot user unknown, skipping history scan for guild {}",
                state.guild_id
            );
            return Ok(());
        };

        let messages = MessageLocator::new(self.discord.as_ref())
            .locate(channel_id, bot_user_id, &state.labels)
            .await?;
        state.merge_messages(messages);

        Ok(())
    }

    /// Fetches issues and publishes one summary per tracked label.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of summaries published (edited or created)
    /// - `Err(AppError)` - GitHub or Discord failure; summaries already
    ///   published in this pass stay published
    pub async fn refresh_guild(&self, state: &mut GuildState) -> Result<usize, AppError> {
        let channel_id = state.channel_id.ok_or_else(|| {
            AppError::NotFound(format!("No issues channel known for guild {}", state.guild_id))
        })?;

        let issues = IssueFetcher::new(self.github.as_ref())
            .fetch_open_issues()
            .await?;

        let labels = state.labels.clone();
        let buckets = Bucketizer::new(&labels, self.settings.max_issues_per_label).assign(&issues);

        let now = Utc::now();
        let publisher = EmbedPublisher::new(self.discord.as_ref());
        let mut published = 0;

        for label in labels.iter() {
            let embed = build_issue_embed(&self.settings, label, buckets.issues_for(label), now);
            publisher.publish(state, channel_id, label, &embed).await?;
            published += 1;
        }

        tracing::info!(
            "Refreshed {} labels ({} issues placed) for guild {}",
            published,
            buckets.total(),
            state.guild_id
        );

        Ok(published)
    }

    /// Re-resolves the label set, rescans the channel and refreshes.
    ///
    /// Static configuration is not re-read; only the repository's labels are.
    pub async fn reload_labels(
        &self,
        state: &mut GuildState,
        bot_user_id: Option<UserId>,
    ) -> Result<usize, AppError> {
        let channel_id = state.channel_id.ok_or_else(|| {
            AppError::NotFound(format!("No issues channel known for guild {}", state.guild_id))
        })?;

        state.labels = LabelResolver::new(self.github.as_ref(), &self.settings)
            .resolve()
            .await;
        self.rescan_messages(state, channel_id, bot_user_id).await?;

        self.refresh_guild(state).await
    }

    /// Periodic sweep across all known guilds.
    ///
    /// Ready guilds are refreshed; guilds whose initialization failed earlier are
    /// initialized again.
    pub async fn refresh_all(&self, registry: &mut GuildRegistry) {
        let mut queue: VecDeque<GuildId> = registry.guild_ids().into();

        tracing::debug!("Refreshing {} guilds", queue.len());

        while let Some(guild_id) = queue.pop_front() {
            let ready = registry.get(guild_id).map(GuildState::is_ready);
            let result = match ready {
                Some(true) => match registry.get_mut(guild_id) {
                    Some(state) => self.refresh_guild(state).await.map(|_| ()),
                    None => continue,
                },
                Some(false) => self.initialize_guild(registry, guild_id).await,
                None => continue,
            };

            if let Err(e) = result {
                tracing::error!("Failed to refresh guild {}: {}", guild_id, e);
            }
        }

        registry.mark_updated(Utc::now());
    }

    /// Runs a chat command for a guild.
    ///
    /// # Arguments
    /// - `registry` - Guild registry
    /// - `guild_id` - Guild the command was sent in
    /// - `channel_id` - Channel the command was sent in
    /// - `command` - Parsed command
    ///
    /// # Returns
    /// - `Ok(CommandOutcome::Ignored)` - Not the designated channel, or guild not Ready
    /// - `Ok(CommandOutcome::Refreshed)` - Summaries published
    /// - `Ok(CommandOutcome::Status)` - Status report for the guild
    /// - `Err(AppError)` - The refresh failed
    pub async fn handle_command(
        &self,
        registry: &mut GuildRegistry,
        guild_id: GuildId,
        channel_id: ChannelId,
        command: BotCommand,
    ) -> Result<CommandOutcome, AppError> {
        let bot_user_id = registry.bot_user_id();
        let last_update = registry.last_update();

        let Some(state) = registry.get_mut(guild_id) else {
            return Ok(CommandOutcome::Ignored);
        };
        if !state.is_ready() || state.channel_id != Some(channel_id) {
            return Ok(CommandOutcome::Ignored);
        }

        match command {
            BotCommand::RefreshIssues => {
                let published = self.refresh_guild(state).await?;
                Ok(CommandOutcome::Refreshed { published })
            }
            BotCommand::RefreshLabels => {
                let published = self.reload_labels(state, bot_user_id).await?;
                Ok(CommandOutcome::Refreshed { published })
            }
            BotCommand::Status => Ok(CommandOutcome::Status(StatusReport {
                repository: self.settings.repository(),
                label_count: state.labels.len(),
                last_update,
            })),
        }
    }
}
