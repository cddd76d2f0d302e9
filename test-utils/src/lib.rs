//! Issue Board Test Utils
//!
//! Provides shared testing utilities for the issue board bot: factories for the
//! Serenity objects the bot reads from Discord and JSON fixtures shaped like the
//! GitHub REST API responses it consumes.
//!
//! # Overview
//!
//! - **serenity**: Factories for `Message` objects as returned by channel history
//! - **github**: JSON fixtures for labels, issues and pull requests
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::serenity::create_test_embed_message;
//! use test_utils::github::issue_json;
//!
//! #[tokio::test]
//! async fn test_locate_messages() {
//!     let message = create_test_embed_message(1, 42, "🏷️ BUG Issues");
//!     let issue = issue_json(7, "Crash on start", &["bug"]);
//!     // Use in your tests...
//! }
//! ```

pub mod github;
pub mod serenity;
