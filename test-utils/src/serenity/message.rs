//! Test factory for creating Serenity Message objects.
//!
//! Channel history scans only look at the author and the first embed's title, so
//! the factories expose exactly those and fill everything else with defaults.

use serenity::all::Message;

/// Channel all factory messages belong to.
pub const TEST_CHANNEL_ID: u64 = 500000000000000000;

/// Creates a test Serenity Message with arbitrary embeds.
///
/// # Arguments
/// - `message_id` - Discord message ID (snowflake)
/// - `author_id` - Discord user ID of the author
/// - `author_is_bot` - Whether the author is a bot account
/// - `content` - Text content
/// - `embeds` - Raw embed JSON objects
///
/// # Returns
/// - `Message` - A valid Serenity Message struct for testing
///
/// # Panics
/// - If the JSON cannot be deserialized into a Message (indicates invalid test data)
pub fn build_message(
    message_id: u64,
    author_id: u64,
    author_is_bot: bool,
    content: &str,
    embeds: Vec<serde_json::Value>,
) -> Message {
    serde_json::from_value(serde_json::json!({
        "id": message_id.to_string(),
        "channel_id": TEST_CHANNEL_ID.to_string(),
        "author": {
            "id": author_id.to_string(),
            "username": format!("user-{}", author_id),
            "discriminator": "0",
            "global_name": null,
            "avatar": null,
            "bot": author_is_bot,
        },
        "content": content,
        "timestamp": "2024-01-01T00:00:00.000000+00:00",
        "edited_timestamp": null,
        "tts": false,
        "mention_everyone": false,
        "mentions": [],
        "mention_roles": [],
        "mention_channels": [],
        "attachments": [],
        "embeds": embeds,
        "reactions": [],
        "pinned": false,
        "type": 0,
        "components": [],
        "sticker_items": [],
    }))
    .expect("Failed to create test message - invalid JSON structure")
}

/// Creates a plain text message without embeds.
///
/// # Examples
///
/// ```rust,ignore
/// use test_utils::serenity::create_test_message;
///
/// let message = create_test_message(1, 42, "!status");
/// assert!(message.embeds.is_empty());
/// ```
pub fn create_test_message(message_id: u64, author_id: u64, content: &str) -> Message {
    build_message(message_id, author_id, false, content, vec![])
}

/// Creates a bot-authored message carrying a single embed with the given title.
///
/// # Examples
///
/// ```rust,ignore
/// use test_utils::serenity::create_test_embed_message;
///
/// let message = create_test_embed_message(1, 42, "🏷️ BUG Issues");
/// assert_eq!(message.embeds[0].title.as_deref(), Some("🏷️ BUG Issues"));
/// ```
pub fn create_test_embed_message(message_id: u64, author_id: u64, title: &str) -> Message {
    build_message(
        message_id,
        author_id,
        true,
        "",
        vec![serde_json::json!({
            "type": "rich",
            "title": title,
            "description": "No open issues with this label.",
        })],
    )
}
