//! Rendering and publishing of label summaries.
//!
//! - `builder` - Renders one bucket into an `IssueEmbed`
//! - `publish` - Edits the label's recorded message or creates a new one

pub mod builder;
pub mod publish;
