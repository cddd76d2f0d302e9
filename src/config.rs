use std::time::Duration;

use crate::{
    error::{config::ConfigError, AppError},
    util::parse::{parse_bool, parse_list, parse_number},
};

const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
const DEFAULT_CHANNEL_NAME: &str = "github-issues";
const DEFAULT_UPDATE_INTERVAL_MINUTES: u64 = 5;
const DEFAULT_MAX_ISSUES_PER_LABEL: usize = 20;
const DEFAULT_PORT: u16 = 3000;

/// Static configuration, loaded once at startup.
pub struct Config {
    pub discord_bot_token: String,
    pub github_token: Option<String>,
    pub github_api_url: String,

    pub update_interval_minutes: u64,
    pub port: u16,

    pub sync: SyncSettings,
}

/// The part of the configuration the sync pipeline reads on every cycle.
///
/// Cloned into the sync service so that tests can build it without any tokens.
#[derive(Debug, Clone)]
pub struct SyncSettings {
    pub owner: String,
    pub repo: String,
    /// Literal name of the text channel the bot manages in every guild
    pub channel_name: String,
    /// Labels to track, in priority order. Empty means "all labels".
    pub included_labels: Vec<String>,
    /// Labels to skip when `included_labels` is empty.
    pub excluded_labels: Vec<String>,
    pub track_unlabeled: bool,
    pub max_issues_per_label: usize,
}

impl SyncSettings {
    /// Repository in `owner/repo` form.
    pub fn repository(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    ///
    /// # Arguments
    /// - `lookup` - Returns the raw value for a variable name, if set
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and all values valid
    /// - `Err(AppError::ConfigErr)` - Missing required variable or invalid value
    pub fn from_vars<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let required = |key: &str| {
            optional(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
        };

        let update_interval_minutes = match optional("UPDATE_INTERVAL") {
            Some(value) => parse_number::<u64>("UPDATE_INTERVAL", &value)?,
            None => DEFAULT_UPDATE_INTERVAL_MINUTES,
        };
        if update_interval_minutes == 0 {
            return Err(ConfigError::InvalidValue {
                key: "UPDATE_INTERVAL".to_string(),
                value: "0".to_string(),
                reason: "interval must be at least one minute".to_string(),
            }
            .into());
        }

        let max_issues_per_label = match optional("MAX_ISSUES_PER_LABEL") {
            Some(value) => parse_number::<usize>("MAX_ISSUES_PER_LABEL", &value)?,
            None => DEFAULT_MAX_ISSUES_PER_LABEL,
        };
        if max_issues_per_label == 0 {
            return Err(ConfigError::InvalidValue {
                key: "MAX_ISSUES_PER_LABEL".to_string(),
                value: "0".to_string(),
                reason: "cap must be at least one issue".to_string(),
            }
            .into());
        }

        let track_unlabeled = match optional("TRACK_UNLABELED") {
            Some(value) => parse_bool("TRACK_UNLABELED", &value)?,
            None => false,
        };

        let port = match optional("PORT") {
            Some(value) => parse_number::<u16>("PORT", &value)?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            discord_bot_token: required("DISCORD_TOKEN")?,
            github_token: optional("GITHUB_TOKEN"),
            github_api_url: optional("GITHUB_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string()),
            update_interval_minutes,
            port,
            sync: SyncSettings {
                owner: required("GITHUB_OWNER")?,
                repo: required("GITHUB_REPO")?,
                channel_name: optional("CHANNEL_NAME")
                    .unwrap_or_else(|| DEFAULT_CHANNEL_NAME.to_string()),
                included_labels: optional("INCLUDED_LABELS")
                    .map(|value| parse_list(&value))
                    .unwrap_or_default(),
                excluded_labels: optional("EXCLUDED_LABELS")
                    .map(|value| parse_list(&value))
                    .unwrap_or_default(),
                track_unlabeled,
                max_issues_per_label,
            },
        })
    }

    pub fn update_interval(&self) -> Duration {
        Duration::from_secs(self.update_interval_minutes * 60)
    }
}
