//! Message location.
//!
//! Rebuilds the label to message mapping of a guild from the channel history, so
//! a restarted bot edits its previous summaries instead of posting duplicates.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serenity::all::{ChannelId, Message, MessageId, UserId};

use crate::{
    error::AppError,
    model::label::{LabelKey, LabelPriority},
    service::discord::DiscordGateway,
};

/// Number of recent messages scanned per channel.
pub const HISTORY_SCAN_LIMIT: u8 = 100;

/// Matches titles rendered by the embed builder: "🏷️ {LABEL} Issues".
static TITLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^🏷\x{FE0F}?\s*(.+?)\s+issues$").expect("title pattern is valid")
});

pub struct MessageLocator<'a> {
    discord: &'a dyn DiscordGateway,
}

impl<'a> MessageLocator<'a> {
    pub fn new(discord: &'a dyn DiscordGateway) -> Self {
        Self { discord }
    }

    /// Scans the channel for summaries previously published by the bot.
    ///
    /// # Arguments
    /// - `channel_id` - The guild's issues channel
    /// - `bot_user_id` - The bot's own user, the only author considered
    /// - `labels` - Currently tracked labels; titles for other labels are ignored
    ///
    /// # Returns
    /// - `Ok(HashMap)` - Message per tracked label found in the history window
    /// - `Err(AppError)` - Channel history could not be fetched
    pub async fn locate(
        &self,
        channel_id: ChannelId,
        bot_user_id: UserId,
        labels: &LabelPriority,
    ) -> Result<HashMap<LabelKey, MessageId>, AppError> {
        let messages = self
            .discord
            .recent_messages(channel_id, HISTORY_SCAN_LIMIT)
            .await?;

        let found = match_messages(&messages, bot_user_id, labels);

        tracing::debug!(
            "Found {} existing label messages among {} recent messages in channel {}",
            found.len(),
            messages.len(),
            channel_id
        );

        Ok(found)
    }
}

/// Maps bot-authored label summaries in `messages` back to their labels.
///
/// When several messages carry the same label the one seen last wins. Discord
/// returns history newest first, so that is the oldest copy in the window.
pub fn match_messages(
    messages: &[Message],
    bot_user_id: UserId,
    labels: &LabelPriority,
) -> HashMap<LabelKey, MessageId> {
    let mut found = HashMap::new();

    for message in messages {
        if message.author.id != bot_user_id {
            continue;
        }

        let Some(title) = message.embeds.first().and_then(|embed| embed.title.as_deref()) else {
            continue;
        };

        let Some(displayed) = parse_label_title(title) else {
            continue;
        };

        // Stale titles from an earlier label configuration are left alone
        if let Some(label) = labels.get_displayed(displayed) {
            found.insert(label.key().clone(), message.id);
        }
    }

    found
}

/// Extracts the displayed label from an embed title.
///
/// # Returns
/// - `Some(&str)` - The label part of "🏷️ {LABEL} Issues"
/// - `None` - The title was not produced by the embed builder
pub fn parse_label_title(title: &str) -> Option<&str> {
    TITLE_PATTERN
        .captures(title.trim())
        .and_then(|captures| captures.get(1))
        .map(|label| label.as_str())
}
