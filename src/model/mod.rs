//! Domain models for the issue board.
//!
//! Plain data types shared by the services: tracked labels and their priority
//! order, GitHub issues, per-guild state, chat commands and the rendered embed.
//! None of these types perform I/O.

pub mod command;
pub mod embed;
pub mod guild;
pub mod issue;
pub mod label;
