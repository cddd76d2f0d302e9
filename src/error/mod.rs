//! Error types for the issue board.
//!
//! `AppError` is the top-level error returned by every fallible operation in the
//! crate. It wraps domain-specific errors (configuration, GitHub, internal) as well
//! as the errors of the external clients the bot talks through. Per-guild failures
//! are logged and dropped at the orchestration boundary, so an `AppError` only
//! reaches `main` during startup.

pub mod config;
pub mod github;
pub mod internal;

use thiserror::Error;

use crate::error::{config::ConfigError, github::GitHubError, internal::InternalError};

/// Top-level application error type.
///
/// Most variants use `#[from]` for automatic conversion so that `?` can be used
/// across service boundaries.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error while loading environment variables at startup.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// GitHub API returned an unexpected or rate-limited response.
    #[error(transparent)]
    GitHubErr(#[from] GitHubError),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// HTTP transport or decoding error from reqwest.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Repeating refresh job could not be registered or started.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Liveness listener failed to bind or serve.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Unexpected internal state indicating a bug or a torn-down worker.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// An expected Discord resource (e.g. the issues channel) does not exist.
    ///
    /// # Fields
    /// - Message describing what resource was not found
    #[error("{0}")]
    NotFound(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}
