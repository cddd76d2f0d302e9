//! Chat commands and their outcomes.

use chrono::{DateTime, Utc};

/// A command typed in the designated issues channel.
///
/// Commands are matched literally and case-sensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommand {
    /// `!refresh-issues` - re-publish every label of this guild
    RefreshIssues,
    /// `!refresh-labels` - re-resolve labels, rescan the channel, then refresh
    RefreshLabels,
    /// `!status` - report the label count and the last global update
    Status,
}

impl BotCommand {
    pub fn parse(content: &str) -> Option<Self> {
        match content.trim() {
            "!refresh-issues" => Some(Self::RefreshIssues),
            "!refresh-labels" => Some(Self::RefreshLabels),
            "!status" => Some(Self::Status),
            _ => None,
        }
    }
}

/// What a handled command produced.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// Command was not issued in the guild's designated channel, or the guild
    /// is not Ready yet. The handler stays silent.
    Ignored,
    /// Labels were published; carries the number of messages edited or created.
    Refreshed { published: usize },
    Status(StatusReport),
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusReport {
    pub repository: String,
    pub label_count: usize,
    pub last_update: Option<DateTime<Utc>>,
}

impl StatusReport {
    /// Renders the report as a chat message.
    ///
    /// The last update is rendered as a Discord relative timestamp.
    pub fn render(&self) -> String {
        let last_update = match self.last_update {
            Some(at) => format!("<t:{}:R>", at.timestamp()),
            None => "never".to_string(),
        };

        format!(
            "**Issue board status**\nRepository: `{}`\nTracked labels: {}\nLast update: {}",
            self.repository, self.label_count, last_update
        )
    }
}
