//! Tracked labels and their priority order.
//!
//! Label names are unique case-insensitively but GitHub's casing is kept for
//! display and for building search URLs. All case-insensitive lookups go through
//! [`LabelKey`], which is computed once per name.

use std::collections::HashMap;

/// Name of the synthetic bucket for issues that carry no labels at all.
pub const UNLABELED: &str = "unlabeled";

/// Normalized lookup key for a label name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LabelKey(String);

impl LabelKey {
    pub fn new(name: &str) -> Self {
        Self(name.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A label the bot maintains a published summary for.
///
/// A repository label that happens to be called "unlabeled" is an ordinary
/// label; only [`TrackedLabel::unlabeled`] creates the synthetic bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedLabel {
    name: String,
    key: LabelKey,
    synthetic: bool,
}

impl TrackedLabel {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let key = LabelKey::new(&name);
        Self {
            name,
            key,
            synthetic: false,
        }
    }

    /// The synthetic "unlabeled" bucket.
    pub fn unlabeled() -> Self {
        Self {
            synthetic: true,
            ..Self::new(UNLABELED)
        }
    }

    /// Label name with its original casing.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key(&self) -> &LabelKey {
        &self.key
    }

    /// Whether this is the synthetic bucket for issues without labels.
    pub fn is_unlabeled(&self) -> bool {
        self.synthetic
    }
}

/// Ordered, case-insensitively unique set of tracked labels.
///
/// Earlier labels win when an issue carries more than one tracked label. The
/// "unlabeled" bucket, when present, is always last because label resolution
/// appends it after every real label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelPriority {
    labels: Vec<TrackedLabel>,
    positions: HashMap<LabelKey, usize>,
}

impl LabelPriority {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a label unless one with the same case-insensitive name exists.
    ///
    /// # Returns
    /// - `true` - Label was added
    /// - `false` - A label with the same key was already tracked; the first casing wins
    pub fn push(&mut self, label: TrackedLabel) -> bool {
        if self.positions.contains_key(label.key()) {
            return false;
        }
        self.positions.insert(label.key().clone(), self.labels.len());
        self.labels.push(label);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrackedLabel> {
        self.labels.iter()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Case-insensitive lookup.
    pub fn get(&self, name: &str) -> Option<&TrackedLabel> {
        self.get_by_key(&LabelKey::new(name))
    }

    pub fn get_by_key(&self, key: &LabelKey) -> Option<&TrackedLabel> {
        self.positions.get(key).map(|&index| &self.labels[index])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn tracks_unlabeled(&self) -> bool {
        self.labels.iter().any(TrackedLabel::is_unlabeled)
    }

    /// Finds the label behind a displayed (upper-cased) title label.
    ///
    /// Upper-casing is not always reversible by lower-casing ("ß" becomes
    /// "SS"), so labels are also compared in their displayed form.
    pub fn get_displayed(&self, displayed: &str) -> Option<&TrackedLabel> {
        self.get(displayed).or_else(|| {
            let displayed = displayed.to_uppercase();
            self.labels
                .iter()
                .find(|label| label.name().to_uppercase() == displayed)
        })
    }

    /// Returns the highest-priority tracked label among `keys`.
    ///
    /// # Arguments
    /// - `keys` - Normalized keys of the labels an issue carries
    ///
    /// # Returns
    /// - `Some(&TrackedLabel)` - First label in priority order present in `keys`
    /// - `None` - The issue carries no tracked label
    pub fn first_match(&self, keys: &[LabelKey]) -> Option<&TrackedLabel> {
        self.labels.iter().find(|label| keys.contains(label.key()))
    }

    /// Display names in priority order.
    pub fn names(&self) -> Vec<&str> {
        self.labels.iter().map(TrackedLabel::name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_deduplicates_case_insensitively() {
        let mut priority = LabelPriority::new();

        assert!(priority.push(TrackedLabel::new("Bug")));
        assert!(!priority.push(TrackedLabel::new("bug")));
        assert!(priority.push(TrackedLabel::new("enhancement")));

        assert_eq!(priority.names(), vec!["Bug", "enhancement"]);
    }

    #[test]
    fn test_lookup_preserves_original_casing() {
        let mut priority = LabelPriority::new();
        priority.push(TrackedLabel::new("Good First Issue"));

        let label = priority.get("GOOD FIRST ISSUE").unwrap();

        assert_eq!(label.name(), "Good First Issue");
        assert!(priority.contains("good first issue"));
        assert!(!priority.contains("good-first-issue"));
    }

    #[test]
    fn test_first_match_follows_priority_not_issue_order() {
        let mut priority = LabelPriority::new();
        priority.push(TrackedLabel::new("bug"));
        priority.push(TrackedLabel::new("enhancement"));

        let keys = vec![LabelKey::new("Enhancement"), LabelKey::new("BUG")];

        assert_eq!(priority.first_match(&keys).unwrap().name(), "bug");
        assert!(priority
            .first_match(&[LabelKey::new("question")])
            .is_none());
    }

    #[test]
    fn test_tracks_unlabeled() {
        let mut priority = LabelPriority::new();
        assert!(!priority.tracks_unlabeled());

        priority.push(TrackedLabel::unlabeled());

        assert!(priority.tracks_unlabeled());
        assert!(priority.get("Unlabeled").unwrap().is_unlabeled());
    }

    #[test]
    fn test_label_named_unlabeled_is_not_the_bucket() {
        let mut priority = LabelPriority::new();
        priority.push(TrackedLabel::new("Unlabeled"));

        assert!(!priority.tracks_unlabeled());
        assert!(!priority.get("unlabeled").unwrap().is_unlabeled());
    }

    #[test]
    fn test_get_displayed_handles_irreversible_upper_case() {
        let mut priority = LabelPriority::new();
        priority.push(TrackedLabel::new("Straße"));
        priority.push(TrackedLabel::new("bug"));

        assert_eq!(priority.get_displayed("STRASSE").unwrap().name(), "Straße");
        assert_eq!(priority.get_displayed("BUG").unwrap().name(), "bug");
        assert!(priority.get_displayed("DOCS").is_none());
    }
}
