//! Sync pipeline services.
//!
//! The pipeline for one guild runs leaf-first through these modules:
//!
//! - **Label resolution** (`label`) - repository labels + config -> priority order
//! - **Message location** (`locator`) - channel history -> label to message map
//! - **Issue fetching** (`issue`) - open issues, pull requests filtered out
//! - **Bucketing** (`bucket`) - each issue into at most one capped label bucket
//! - **Publishing** (`embed`) - render a bucket and edit or create its message
//! - **Orchestration** (`sync`, `registry`) - per-guild lifecycle and refresh sweeps
//!
//! External I/O is confined to the `github` and `discord` modules, each behind a
//! trait so the pipeline can be exercised without network access.

pub mod bucket;
pub mod discord;
pub mod embed;
pub mod github;
pub mod issue;
pub mod label;
pub mod locator;
pub mod registry;
pub mod sync;

#[cfg(test)]
pub(crate) mod test;
