use chrono::{DateTime, Utc};
use serenity::all::{CreateEmbed, CreateEmbedFooter, Timestamp};

use crate::error::{internal::InternalError, AppError};

/// A rendered bucket summary, independent of the chat client.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueEmbed {
    pub title: String,
    pub description: String,
    /// GitHub search URL for the label
    pub url: String,
    pub color: u32,
    pub footer: String,
    pub timestamp: DateTime<Utc>,
}

impl IssueEmbed {
    /// Converts into a Serenity embed builder.
    ///
    /// # Returns
    /// - `Ok(CreateEmbed)` - Embed ready to send or edit
    /// - `Err(AppError::InternalErr)` - Timestamp out of Discord's range
    pub fn to_create_embed(&self) -> Result<CreateEmbed, AppError> {
        let timestamp = Timestamp::from_unix_timestamp(self.timestamp.timestamp()).map_err(|e| {
            InternalError::InvalidDiscordTimestamp {
                timestamp: self.timestamp.timestamp(),
                reason: e.to_string(),
            }
        })?;

        Ok(CreateEmbed::new()
            .title(&self.title)
            .url(&self.url)
            .description(&self.description)
            .color(self.color)
            .footer(CreateEmbedFooter::new(&self.footer))
            .timestamp(timestamp))
    }
}
