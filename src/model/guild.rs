//! Per-guild state.
//!
//! A guild moves through `Uninitialized -> Initializing -> Ready`. Only Ready
//! guilds are refreshed or answer commands; a failed initialization drops the
//! guild back to `Uninitialized` so the next tick can try again. Leaving a guild
//! removes its entry outright.

use std::collections::HashMap;

use serenity::all::{ChannelId, GuildId, MessageId};

use crate::model::label::{LabelKey, LabelPriority, TrackedLabel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuildPhase {
    Uninitialized,
    Initializing,
    Ready,
}

/// Everything the bot remembers about one guild.
///
/// Nothing here is persisted; after a restart the message map is rebuilt by
/// scanning the channel history.
#[derive(Debug, Clone)]
pub struct GuildState {
    pub guild_id: GuildId,
    pub phase: GuildPhase,
    /// The designated issues channel, once found
    pub channel_id: Option<ChannelId>,
    /// Tracked labels in priority order
    pub labels: LabelPriority,
    /// Published message per tracked label
    messages: HashMap<LabelKey, MessageId>,
}

impl GuildState {
    pub fn new(guild_id: GuildId) -> Self {
        Self {
            guild_id,
            phase: GuildPhase::Uninitialized,
            channel_id: None,
            labels: LabelPriority::new(),
            messages: HashMap::new(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.phase == GuildPhase::Ready
    }

    /// Returns the recorded message for a label, if one was published or found.
    pub fn message_for(&self, label: &TrackedLabel) -> Option<MessageId> {
        self.messages.get(label.key()).copied()
    }

    /// Records the message now representing `label`, replacing any previous id.
    pub fn record_message(&mut self, label: &TrackedLabel, message_id: MessageId) {
        self.messages.insert(label.key().clone(), message_id);
    }

    /// Folds the result of a channel rescan into the recorded messages.
    ///
    /// Recorded ids of labels that are no longer tracked are dropped. Ids of
    /// tracked labels survive even when their message has scrolled out of the
    /// scanned window; ids found by the scan take precedence.
    pub fn merge_messages(&mut self, found: HashMap<LabelKey, MessageId>) {
        let labels = &self.labels;
        self.messages.retain(|key, _| labels.get_by_key(key).is_some());
        self.messages.extend(found);
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}
