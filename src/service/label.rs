//! Label resolution.
//!
//! Turns the repository's label list and the static label configuration into the
//! priority order a guild tracks. Resolution never fails: when GitHub cannot be
//! reached the configured include-list is used verbatim.

use std::collections::HashSet;

use crate::{
    config::SyncSettings,
    model::{
        issue::RepositoryLabel,
        label::{LabelKey, LabelPriority, TrackedLabel, UNLABELED},
    },
    service::github::IssueTracker,
};

pub struct LabelResolver<'a> {
    github: &'a dyn IssueTracker,
    settings: &'a SyncSettings,
}

impl<'a> LabelResolver<'a> {
    pub fn new(github: &'a dyn IssueTracker, settings: &'a SyncSettings) -> Self {
        Self { github, settings }
    }

    /// Fetches the repository labels and derives the priority order.
    ///
    /// A GitHub failure is logged and answered with [`fallback_priority`], so the
    /// guild always ends up with a usable (possibly empty) label set.
    ///
    /// # Returns
    /// - `LabelPriority` - Tracked labels, "unlabeled" last when enabled
    pub async fn resolve(&self) -> LabelPriority {
        match self.github.list_labels().await {
            Ok(repo_labels) => resolve_priority(&repo_labels, self.settings),
            Err(e) => {
                tracing::error!(
                    "Failed to fetch labels for {}, falling back to configured labels: {}",
                    self.settings.repository(),
                    e
                );
                fallback_priority(self.settings)
            }
        }
    }
}

/// Derives the priority order from the repository's labels.
///
/// With a non-empty include-list, its order is the priority and only entries that
/// exist on GitHub are kept, using GitHub's casing. Otherwise every repository
/// label is tracked in GitHub's order minus the exclude-list. Either way the
/// "unlabeled" bucket is appended when enabled.
///
/// # Arguments
/// - `repo_labels` - Labels as returned by GitHub, in GitHub's order
/// - `settings` - Include/exclude lists and the unlabeled flag
///
/// # Returns
/// - `LabelPriority` - Resolved priority order
pub fn resolve_priority(repo_labels: &[RepositoryLabel], settings: &SyncSettings) -> LabelPriority {
    let mut priority = LabelPriority::new();

    if !settings.included_labels.is_empty() {
        for wanted in &settings.included_labels {
            let wanted_key = LabelKey::new(wanted);
            match repo_labels
                .iter()
                .find(|label| LabelKey::new(&label.name) == wanted_key)
            {
                Some(label) => push_repository_label(&mut priority, &label.name, settings),
                None => tracing::debug!(
                    "Included label '{}' does not exist in {}, skipping",
                    wanted,
                    settings.repository()
                ),
            }
        }
    } else {
        let excluded: HashSet<LabelKey> = settings
            .excluded_labels
            .iter()
            .map(|name| LabelKey::new(name))
            .collect();

        for label in repo_labels {
            if !excluded.contains(&LabelKey::new(&label.name)) {
                push_repository_label(&mut priority, &label.name, settings);
            }
        }
    }

    if settings.track_unlabeled {
        priority.push(TrackedLabel::unlabeled());
    }

    priority
}

/// Priority order used when the repository labels cannot be fetched.
///
/// The include-list is taken as-is, without checking that the labels exist.
pub fn fallback_priority(settings: &SyncSettings) -> LabelPriority {
    let mut priority = LabelPriority::new();

    for name in &settings.included_labels {
        push_repository_label(&mut priority, name, settings);
    }

    if settings.track_unlabeled {
        priority.push(TrackedLabel::unlabeled());
    }

    priority
}

/// Adds a real label to the priority order.
///
/// With unlabeled tracking enabled a label named "unlabeled" would render the
/// same title as the synthetic bucket, so it is left out in favour of the bucket.
fn push_repository_label(priority: &mut LabelPriority, name: &str, settings: &SyncSettings) {
    let label = TrackedLabel::new(name);

    if settings.track_unlabeled && label.key().as_str() == UNLABELED {
        tracing::debug!(
            "Label '{}' in {} collides with the unlabeled bucket, skipping",
            name,
            settings.repository()
        );
        return;
    }

    priority.push(label);
}
