//! Test factories for creating Serenity API objects.
//!
//! These factories create valid Serenity structs by deserializing JSON, simulating
//! what Discord's API would return, so tests never need a gateway connection.
//!
//! # Available Factories
//!
//! - `message::create_test_message` - Plain text message
//! - `message::create_test_embed_message` - Message carrying one titled embed

pub mod message;

// Re-export commonly used functions for convenience
pub use message::{build_message, create_test_embed_message, create_test_message};
