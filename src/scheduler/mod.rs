//! Work queue and periodic refresh.
//!
//! Every piece of guild work (startup sweep, joins, leaves, timer ticks, chat
//! commands) becomes a `SyncJob` on a single queue. One `SyncWorker` task drains
//! it and owns the guild registry, so jobs run strictly one at a time no matter
//! how many gateway events arrive concurrently. The refresh timer only enqueues.

pub mod issue_refresh;
pub mod queue;
