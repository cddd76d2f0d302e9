use std::time::Duration;

use serenity::all::{ChannelId, GuildId, UserId};
use tokio::sync::{
    mpsc::{UnboundedReceiver, UnboundedSender},
    oneshot,
};
use tokio_cron_scheduler::JobScheduler;

use crate::{
    error::{internal::InternalError, AppError},
    model::command::{BotCommand, CommandOutcome},
    scheduler::issue_refresh,
    service::{registry::GuildRegistry, sync::IssueSyncService},
};

/// One unit of guild work.
#[derive(Debug)]
pub enum SyncJob {
    /// Gateway connected; initialize every guild the bot is already in.
    Startup {
        bot_user_id: UserId,
        guild_ids: Vec<GuildId>,
    },
    /// Bot was added to a guild.
    Join(GuildId),
    /// Bot was removed from a guild.
    Leave(GuildId),
    /// Timer tick.
    RefreshAll,
    /// Chat command; the outcome is sent back to the waiting event handler.
    Command {
        guild_id: GuildId,
        channel_id: ChannelId,
        command: BotCommand,
        reply: oneshot::Sender<Result<CommandOutcome, AppError>>,
    },
}

pub struct SyncWorker {
    service: IssueSyncService,
    registry: GuildRegistry,
    receiver: UnboundedReceiver<SyncJob>,
    /// Handed to the refresh scheduler once the startup sweep is done
    sender: UnboundedSender<SyncJob>,
    refresh_interval: Duration,
    scheduler: Option<JobScheduler>,
}

impl SyncWorker {
    pub fn new(
        service: IssueSyncService,
        receiver: UnboundedReceiver<SyncJob>,
        sender: UnboundedSender<SyncJob>,
        refresh_interval: Duration,
    ) -> Self {
        Self {
            service,
            registry: GuildRegistry::new(),
            receiver,
            sender,
            refresh_interval,
            scheduler: None,
        }
    }

    /// Drains the queue until every sender is gone.
    pub async fn run(mut self) {
        tracing::info!("Sync worker started");

        while let Some(job) = self.receiver.recv().await {
            self.handle(job).await;
        }

        tracing::info!("Sync queue closed, sync worker stopping");
    }

    async fn handle(&mut self, job: SyncJob) {
        match job {
            SyncJob::Startup {
                bot_user_id,
                guild_ids,
            } => {
                self.registry.set_bot_user_id(bot_user_id);
                self.service.startup(&mut self.registry, guild_ids).await;
                self.ensure_scheduler().await;
            }
            SyncJob::Join(guild_id) => {
                tracing::info!("Joined guild {}", guild_id);
                if let Err(e) = self
                    .service
                    .initialize_guild(&mut self.registry, guild_id)
                    .await
                {
                    tracing::error!("Failed to initialize guild {}: {}", guild_id, e);
                }
            }
            SyncJob::Leave(guild_id) => {
                if self.registry.remove(guild_id).is_some() {
                    tracing::info!("Left guild {}, state dropped", guild_id);
                }
            }
            SyncJob::RefreshAll => {
                self.service.refresh_all(&mut self.registry).await;
            }
            SyncJob::Command {
                guild_id,
                channel_id,
                command,
                reply,
            } => {
                let outcome = self
                    .service
                    .handle_command(&mut self.registry, guild_id, channel_id, command)
                    .await;

                if reply.send(outcome).is_err() {
                    tracing::debug!(
                        "Command {:?} in guild {} finished after its handler gave up",
                        command,
                        guild_id
                    );
                }
            }
        }
    }

    /// Starts the refresh timer after the first startup sweep.
    ///
    /// Later ready events (gateway reconnects) reuse the running timer.
    async fn ensure_scheduler(&mut self) {
        if self.scheduler.is_some() {
            return;
        }

        match issue_refresh::start_scheduler(self.sender.clone(), self.refresh_interval).await {
            Ok(scheduler) => self.scheduler = Some(scheduler),
            Err(e) => tracing::error!("Failed to start issue refresh scheduler: {}", e),
        }
    }
}

/// Queues a chat command and waits for its outcome.
///
/// # Returns
/// - `Ok(CommandOutcome)` - Command handled by the worker
/// - `Err(AppError)` - Command failed, or the worker is gone
pub async fn submit_command(
    jobs: &UnboundedSender<SyncJob>,
    guild_id: GuildId,
    channel_id: ChannelId,
    command: BotCommand,
) -> Result<CommandOutcome, AppError> {
    let (reply, outcome) = oneshot::channel();

    jobs.send(SyncJob::Command {
        guild_id,
        channel_id,
        command,
        reply,
    })
    .map_err(|_| InternalError::WorkerUnavailable)?;

    outcome
        .await
        .map_err(|_| InternalError::WorkerUnavailable)?
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::sync::mpsc;

    use super::*;
    use crate::service::test::{issue, settings, FakeDiscord, FakeTracker};

    fn spawn_worker() -> (UnboundedSender<SyncJob>, Arc<FakeDiscord>) {
        let tracker = Arc::new(FakeTracker::new(&["bug"], vec![issue(1, &["bug"])]));
        let discord = Arc::new(FakeDiscord::new().with_channel(1, 100));
        let service = IssueSyncService::new(
            tracker,
            discord.clone(),
            Arc::new(settings(&[], &[], false)),
        );

        let (sender, receiver) = mpsc::unbounded_channel();
        let worker = SyncWorker::new(
            service,
            receiver,
            sender.clone(),
            Duration::from_secs(3600),
        );
        tokio::spawn(worker.run());

        (sender, discord)
    }

    /// Tests that jobs are processed in queue order.
    ///
    /// Verifies that a command queued after a join sees the initialized guild,
    /// and that a command queued after a leave is ignored.
    ///
    /// Expected: Status report, then Ignored
    #[tokio::test]
    async fn processes_jobs_in_order() {
        let (jobs, discord) = spawn_worker();
        let guild_id = GuildId::new(1);
        let channel_id = ChannelId::new(100);

        jobs.send(SyncJob::Join(guild_id)).unwrap();
        let status = submit_command(&jobs, guild_id, channel_id, BotCommand::Status)
            .await
            .unwrap();

        let CommandOutcome::Status(report) = status else {
            panic!("expected a status report, got {:?}", status);
        };
        assert_eq!(report.label_count, 1);
        assert_eq!(report.last_update, None);
        assert_eq!(discord.sent().len(), 1);

        jobs.send(SyncJob::Leave(guild_id)).unwrap();
        let after_leave = submit_command(&jobs, guild_id, channel_id, BotCommand::Status)
            .await
            .unwrap();

        assert_eq!(after_leave, CommandOutcome::Ignored);
    }

    /// Tests a periodic refresh job.
    ///
    /// Expected: the joined guild's summary edited in place
    #[tokio::test]
    async fn refresh_job_updates_guilds() {
        let (jobs, discord) = spawn_worker();
        let guild_id = GuildId::new(1);

        jobs.send(SyncJob::Join(guild_id)).unwrap();
        jobs.send(SyncJob::RefreshAll).unwrap();
        // Round-trip through the queue so both jobs above are done
        submit_command(&jobs, guild_id, ChannelId::new(100), BotCommand::Status)
            .await
            .unwrap();

        assert_eq!(discord.sent().len(), 1);
        assert_eq!(discord.edited().len(), 1);
    }

    /// Tests submitting a command without a running worker.
    ///
    /// Expected: Err(InternalError::WorkerUnavailable)
    #[tokio::test]
    async fn submit_fails_without_worker() {
        let (jobs, receiver) = mpsc::unbounded_channel::<SyncJob>();
        drop(receiver);

        let result = submit_command(
            &jobs,
            GuildId::new(1),
            ChannelId::new(100),
            BotCommand::Status,
        )
        .await;

        assert!(matches!(
            result,
            Err(AppError::InternalErr(InternalError::WorkerUnavailable))
        ));
    }
}
