//! Registry of per-guild state.
//!
//! Owned by the sync worker and only ever touched from its single task, so it
//! needs no locking.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serenity::all::{GuildId, UserId};

use crate::model::guild::GuildState;

#[derive(Debug, Default)]
pub struct GuildRegistry {
    guilds: HashMap<GuildId, GuildState>,
    /// The bot's own user, learned from the gateway's ready event
    bot_user_id: Option<UserId>,
    /// Completion time of the last sweep across all guilds
    last_update: Option<DateTime<Utc>>,
}

impl GuildRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bot_user_id(&self) -> Option<UserId> {
        self.bot_user_id
    }

    pub fn set_bot_user_id(&mut self, user_id: UserId) {
        self.bot_user_id = Some(user_id);
    }

    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.last_update
    }

    pub fn mark_updated(&mut self, at: DateTime<Utc>) {
        self.last_update = Some(at);
    }

    pub fn get(&self, guild_id: GuildId) -> Option<&GuildState> {
        self.guilds.get(&guild_id)
    }

    pub fn get_mut(&mut self, guild_id: GuildId) -> Option<&mut GuildState> {
        self.guilds.get_mut(&guild_id)
    }

    /// Returns the guild's state, inserting an uninitialized entry if absent.
    pub fn entry(&mut self, guild_id: GuildId) -> &mut GuildState {
        self.guilds
            .entry(guild_id)
            .or_insert_with(|| GuildState::new(guild_id))
    }

    pub fn remove(&mut self, guild_id: GuildId) -> Option<GuildState> {
        self.guilds.remove(&guild_id)
    }

    /// Known guild ids in ascending order, so sweeps are deterministic.
    pub fn guild_ids(&self) -> Vec<GuildId> {
        let mut ids: Vec<GuildId> = self.guilds.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.guilds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guilds.is_empty()
    }
}
