//! Shared fixtures for pipeline tests.
//!
//! `FakeTracker` and `FakeDiscord` stand in for GitHub and Discord. The Discord
//! fake keeps a set of live message ids so tests can delete a published message
//! and watch the publisher recover.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use serenity::all::{ChannelId, GuildId, Message, MessageId};
use serenity::async_trait;
use test_utils::serenity::{create_test_embed_message, create_test_message};

use crate::{
    config::SyncSettings,
    error::{github::GitHubError, AppError},
    model::{
        embed::IssueEmbed,
        issue::{Issue, RepositoryLabel},
    },
    service::{
        discord::{DiscordGateway, EditOutcome},
        github::IssueTracker,
    },
};

mod locator;

pub const BOT_USER_ID: u64 = 42;

pub fn settings(included: &[&str], excluded: &[&str], track_unlabeled: bool) -> SyncSettings {
    SyncSettings {
        owner: "octo".to_string(),
        repo: "widgets".to_string(),
        channel_name: "github-issues".to_string(),
        included_labels: included.iter().map(|s| s.to_string()).collect(),
        excluded_labels: excluded.iter().map(|s| s.to_string()).collect(),
        track_unlabeled,
        max_issues_per_label: 20,
    }
}

pub fn issue(number: u64, labels: &[&str]) -> Issue {
    Issue {
        number,
        title: format!("Issue {}", number),
        html_url: format!("https://github.com/octo/widgets/issues/{}", number),
        state: "open".to_string(),
        labels: labels.iter().map(|s| s.to_string()).collect(),
        is_pull_request: false,
    }
}

pub fn pull_request(number: u64, labels: &[&str]) -> Issue {
    Issue {
        html_url: format!("https://github.com/octo/widgets/pull/{}", number),
        is_pull_request: true,
        ..issue(number, labels)
    }
}

fn github_failure(path: &str) -> AppError {
    GitHubError::UnexpectedStatus {
        status: 502,
        path: path.to_string(),
        body: "Bad Gateway".to_string(),
    }
    .into()
}

/// In-memory issue tracker. `None` makes the corresponding call fail.
pub struct FakeTracker {
    labels: Mutex<Option<Vec<RepositoryLabel>>>,
    issues: Mutex<Option<Vec<Issue>>>,
}

impl FakeTracker {
    pub fn new(labels: &[&str], issues: Vec<Issue>) -> Self {
        let tracker = Self {
            labels: Mutex::new(None),
            issues: Mutex::new(Some(issues)),
        };
        tracker.set_labels(labels);
        tracker
    }

    pub fn set_labels(&self, labels: &[&str]) {
        *self.labels.lock().unwrap() = Some(
            labels
                .iter()
                .map(|name| RepositoryLabel {
                    name: name.to_string(),
                })
                .collect(),
        );
    }

    pub fn fail_labels(&self) {
        *self.labels.lock().unwrap() = None;
    }

    pub fn fail_issues(&self) {
        *self.issues.lock().unwrap() = None;
    }
}

#[async_trait]
impl IssueTracker for FakeTracker {
    async fn list_labels(&self) -> Result<Vec<RepositoryLabel>, AppError> {
        self.labels
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| github_failure("/repos/octo/widgets/labels"))
    }

    async fn list_open_issues(&self) -> Result<Vec<Issue>, AppError> {
        self.issues
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| github_failure("/repos/octo/widgets/issues"))
    }
}

/// In-memory Discord with one issues channel per registered guild.
///
/// Messages the bot sends are added to the front of the channel history, as a
/// real channel would show them.
pub struct FakeDiscord {
    channels: Mutex<HashMap<GuildId, ChannelId>>,
    history: Mutex<HashMap<ChannelId, Vec<Message>>>,
    live: Mutex<HashSet<MessageId>>,
    sent: Mutex<Vec<(ChannelId, MessageId, IssueEmbed)>>,
    edited: Mutex<Vec<(ChannelId, MessageId, IssueEmbed)>>,
    next_message_id: AtomicU64,
    fail_edits: AtomicBool,
}

impl FakeDiscord {
    pub fn new() -> Self {
        Self {
            channels: Mutex::new(HashMap::new()),
            history: Mutex::new(HashMap::new()),
            live: Mutex::new(HashSet::new()),
            sent: Mutex::new(Vec::new()),
            edited: Mutex::new(Vec::new()),
            next_message_id: AtomicU64::new(9000),
            fail_edits: AtomicBool::new(false),
        }
    }

    pub fn with_channel(self, guild_id: u64, channel_id: u64) -> Self {
        self.add_channel(guild_id, channel_id);
        self
    }

    pub fn add_channel(&self, guild_id: u64, channel_id: u64) {
        self.channels
            .lock()
            .unwrap()
            .insert(GuildId::new(guild_id), ChannelId::new(channel_id));
    }

    /// Seeds a channel's history (newest first) and marks the messages live.
    pub fn with_history(self, channel_id: u64, messages: Vec<Message>) -> Self {
        {
            let mut live = self.live.lock().unwrap();
            live.extend(messages.iter().map(|message| message.id));
        }
        self.history
            .lock()
            .unwrap()
            .insert(ChannelId::new(channel_id), messages);
        self
    }

    /// Posts `count` user messages, pushing older ones further back in history.
    pub fn post_chatter(&self, channel_id: u64, count: u64) {
        let mut history = self.history.lock().unwrap();
        let messages = history.entry(ChannelId::new(channel_id)).or_default();
        let first_id = 100_000 + messages.len() as u64;
        for n in 0..count {
            messages.insert(0, create_test_message(first_id + n, 7, "chatter"));
        }
    }

    /// Simulates a moderator deleting a message.
    pub fn delete_message(&self, message_id: MessageId) {
        self.live.lock().unwrap().remove(&message_id);
        for messages in self.history.lock().unwrap().values_mut() {
            messages.retain(|message| message.id != message_id);
        }
    }

    pub fn fail_edits(&self) {
        self.fail_edits.store(true, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<(ChannelId, MessageId, IssueEmbed)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn edited(&self) -> Vec<(ChannelId, MessageId, IssueEmbed)> {
        self.edited.lock().unwrap().clone()
    }

    pub fn sent_titles(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .map(|(_, _, embed)| embed.title)
            .collect()
    }
}

#[async_trait]
impl DiscordGateway for FakeDiscord {
    async fn find_text_channel(
        &self,
        guild_id: GuildId,
        name: &str,
    ) -> Result<Option<ChannelId>, AppError> {
        if name != "github-issues" {
            return Ok(None);
        }
        Ok(self.channels.lock().unwrap().get(&guild_id).copied())
    }

    async fn recent_messages(
        &self,
        channel_id: ChannelId,
        limit: u8,
    ) -> Result<Vec<Message>, AppError> {
        let history = self.history.lock().unwrap();
        Ok(history
            .get(&channel_id)
            .map(|messages| messages.iter().take(limit as usize).cloned().collect())
            .unwrap_or_default())
    }

    async fn send_embed(
        &self,
        channel_id: ChannelId,
        embed: &IssueEmbed,
    ) -> Result<MessageId, AppError> {
        let message_id = MessageId::new(self.next_message_id.fetch_add(1, Ordering::SeqCst));
        self.live.lock().unwrap().insert(message_id);
        self.history
            .lock()
            .unwrap()
            .entry(channel_id)
            .or_default()
            .insert(
                0,
                create_test_embed_message(message_id.get(), BOT_USER_ID, &embed.title),
            );
        self.sent
            .lock()
            .unwrap()
            .push((channel_id, message_id, embed.clone()));
        Ok(message_id)
    }

    async fn edit_embed(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        embed: &IssueEmbed,
    ) -> Result<EditOutcome, AppError> {
        if self.fail_edits.load(Ordering::SeqCst) {
            return Err(std::io::Error::other("Missing Permissions").into());
        }
        if !self.live.lock().unwrap().contains(&message_id) {
            return Ok(EditOutcome::Missing);
        }
        self.edited
            .lock()
            .unwrap()
            .push((channel_id, message_id, embed.clone()));
        Ok(EditOutcome::Edited)
    }
}
