//! Issue bucketing.
//!
//! Every issue lands in at most one bucket: the first tracked label in priority
//! order that it carries, or "unlabeled" when it carries no labels and that bucket
//! is tracked. Buckets are capped; a full bucket simply drops further issues and
//! nothing is moved to a lower-priority label.

use std::collections::HashMap;

use crate::model::{
    issue::Issue,
    label::{LabelKey, LabelPriority, TrackedLabel},
};

/// Issues per tracked label, in fetch order.
#[derive(Debug, Default)]
pub struct IssueBuckets {
    buckets: HashMap<LabelKey, Vec<Issue>>,
}

impl IssueBuckets {
    pub fn issues_for(&self, label: &TrackedLabel) -> &[Issue] {
        self.buckets
            .get(label.key())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of issues placed across all buckets.
    pub fn total(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }
}

pub struct Bucketizer<'a> {
    labels: &'a LabelPriority,
    max_per_label: usize,
}

impl<'a> Bucketizer<'a> {
    pub fn new(labels: &'a LabelPriority, max_per_label: usize) -> Self {
        Self {
            labels,
            max_per_label,
        }
    }

    /// Assigns issues to buckets.
    ///
    /// # Arguments
    /// - `issues` - Open issues in fetch order (most recently updated first)
    ///
    /// # Returns
    /// - `IssueBuckets` - One entry per tracked label, possibly empty
    pub fn assign(&self, issues: &[Issue]) -> IssueBuckets {
        let mut buckets: HashMap<LabelKey, Vec<Issue>> = self
            .labels
            .iter()
            .map(|label| (label.key().clone(), Vec::new()))
            .collect();

        for issue in issues {
            let target = if issue.is_unlabeled() {
                self.labels
                    .iter()
                    .find(|label| label.is_unlabeled())
            } else {
                self.labels.first_match(&issue.label_keys())
            };

            let Some(label) = target else {
                continue;
            };

            if let Some(bucket) = buckets.get_mut(label.key()) {
                if bucket.len() < self.max_per_label {
                    bucket.push(issue.clone());
                }
            }
        }

        IssueBuckets { buckets }
    }
}
