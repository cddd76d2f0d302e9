use serenity::all::UserId;
use test_utils::serenity::{build_message, create_test_embed_message, create_test_message};

use super::*;
use crate::{
    model::label::{LabelKey, LabelPriority, TrackedLabel},
    service::locator::{match_messages, parse_label_title, MessageLocator},
};

fn tracked(names: &[&str]) -> LabelPriority {
    let mut priority = LabelPriority::new();
    for name in names {
        priority.push(TrackedLabel::new(*name));
    }
    priority.push(TrackedLabel::unlabeled());
    priority
}

/// Tests title parsing for rendered titles.
///
/// Expected: label part extracted, with or without the variation selector
#[test]
fn parses_rendered_titles() {
    assert_eq!(parse_label_title("🏷️ BUG Issues"), Some("BUG"));
    assert_eq!(parse_label_title("🏷 GOOD FIRST ISSUE Issues"), Some("GOOD FIRST ISSUE"));
    assert_eq!(parse_label_title("🏷️ UNLABELED issues"), Some("UNLABELED"));
}

/// Tests title parsing for foreign titles.
///
/// Expected: None
#[test]
fn rejects_foreign_titles() {
    assert_eq!(parse_label_title("Release notes"), None);
    assert_eq!(parse_label_title("BUG Issues"), None);
    assert_eq!(parse_label_title("🏷️ BUG Pull Requests"), None);
}

/// Tests that only the bot's own embeds are matched.
///
/// Verifies that embeds by other authors and plain messages are skipped.
///
/// Expected: only message 3 mapped to "bug"
#[test]
fn matches_only_bot_authored_embeds() {
    let messages = vec![
        create_test_embed_message(1, 7, "🏷️ BUG Issues"),
        create_test_message(2, BOT_USER_ID, "🏷️ BUG Issues"),
        create_test_embed_message(3, BOT_USER_ID, "🏷️ BUG Issues"),
    ];

    let found = match_messages(&messages, UserId::new(BOT_USER_ID), &tracked(&["bug"]));

    assert_eq!(found.len(), 1);
    assert_eq!(found.get(&LabelKey::new("bug")), Some(&MessageId::new(3)));
}

/// Tests that titles are matched case-insensitively against tracked labels.
///
/// Expected: "Good First Issue" and "unlabeled" both found
#[test]
fn maps_upper_cased_titles_back_to_labels() {
    let messages = vec![
        create_test_embed_message(10, BOT_USER_ID, "🏷️ GOOD FIRST ISSUE Issues"),
        create_test_embed_message(11, BOT_USER_ID, "🏷️ UNLABELED Issues"),
    ];

    let found = match_messages(
        &messages,
        UserId::new(BOT_USER_ID),
        &tracked(&["Good First Issue"]),
    );

    assert_eq!(
        found.get(&LabelKey::new("good first issue")),
        Some(&MessageId::new(10))
    );
    assert_eq!(found.get(&LabelKey::new("unlabeled")), Some(&MessageId::new(11)));
}

/// Tests labels whose upper-case form cannot be lower-cased back.
///
/// Expected: "🏷️ STRASSE Issues" mapped to the "Straße" label
#[test]
fn maps_titles_with_irreversible_upper_case() {
    let messages = vec![create_test_embed_message(12, BOT_USER_ID, "🏷️ STRASSE Issues")];

    let found = match_messages(&messages, UserId::new(BOT_USER_ID), &tracked(&["Straße"]));

    assert_eq!(found.get(&LabelKey::new("straße")), Some(&MessageId::new(12)));
}

/// Tests that summaries for labels no longer tracked are ignored.
///
/// Expected: empty map
#[test]
fn ignores_stale_labels() {
    let messages = vec![create_test_embed_message(1, BOT_USER_ID, "🏷️ WONTFIX Issues")];

    let found = match_messages(&messages, UserId::new(BOT_USER_ID), &tracked(&["bug"]));

    assert!(found.is_empty());
}

/// Tests duplicate summaries for the same label.
///
/// History is newest first; the last one seen (the oldest) wins.
///
/// Expected: message 5
#[test]
fn last_seen_duplicate_wins() {
    let messages = vec![
        create_test_embed_message(9, BOT_USER_ID, "🏷️ BUG Issues"),
        create_test_embed_message(5, BOT_USER_ID, "🏷️ BUG Issues"),
    ];

    let found = match_messages(&messages, UserId::new(BOT_USER_ID), &tracked(&["bug"]));

    assert_eq!(found.get(&LabelKey::new("bug")), Some(&MessageId::new(5)));
}

/// Tests that only the first embed of a message is considered.
///
/// Expected: mapped by the first embed's title
#[test]
fn uses_first_embed_title() {
    let message = build_message(
        4,
        BOT_USER_ID,
        true,
        "",
        vec![
            serde_json::json!({ "type": "rich", "title": "🏷️ BUG Issues" }),
            serde_json::json!({ "type": "rich", "title": "🏷️ DOCS Issues" }),
        ],
    );

    let found = match_messages(
        &[message],
        UserId::new(BOT_USER_ID),
        &tracked(&["bug", "docs"]),
    );

    assert_eq!(found.len(), 1);
    assert!(found.contains_key(&LabelKey::new("bug")));
}

/// Tests the locator against a channel history.
///
/// Expected: Ok with the bot's "bug" summary
#[tokio::test]
async fn locate_scans_channel_history() {
    let discord = FakeDiscord::new().with_history(100, vec![
        create_test_message(3, 7, "!status"),
        create_test_embed_message(2, BOT_USER_ID, "🏷️ BUG Issues"),
    ]);

    let found = MessageLocator::new(&discord)
        .locate(
            ChannelId::new(100),
            UserId::new(BOT_USER_ID),
            &tracked(&["bug"]),
        )
        .await
        .unwrap();

    assert_eq!(found.get(&LabelKey::new("bug")), Some(&MessageId::new(2)));
}
