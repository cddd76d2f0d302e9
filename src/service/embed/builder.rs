//! Label summary embed builder.
//!
//! Produces the title, body, footer and link for one label bucket. The title
//! format is also what the message locator parses, so the two must stay in step.

use chrono::{DateTime, Utc};
use url::Url;

use crate::{
    config::SyncSettings,
    model::{embed::IssueEmbed, issue::Issue, label::TrackedLabel},
};

/// Discord's limit on embed descriptions, in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 4096;

/// GitHub green.
const EMBED_COLOR: u32 = 0x2DA44E;

const TRUNCATION_MARKER: &str = "\n…";

/// Builds the summary embed for one label.
///
/// # Arguments
/// - `settings` - Repository owner and name for the search link
/// - `label` - The tracked label this summary represents
/// - `issues` - The label's bucket, already capped
/// - `now` - Freshness timestamp shown on the embed
///
/// # Returns
/// - `IssueEmbed` - Rendered summary
pub fn build_issue_embed(
    settings: &SyncSettings,
    label: &TrackedLabel,
    issues: &[Issue],
    now: DateTime<Utc>,
) -> IssueEmbed {
    let url = label_search_url(&settings.owner, &settings.repo, label);

    IssueEmbed {
        title: label_title(label),
        description: render_description(issues, &url),
        url,
        color: EMBED_COLOR,
        footer: format!("{} • Last updated", issue_count(issues.len())),
        timestamp: now,
    }
}

/// "🏷️ {LABEL} Issues" with the label upper-cased.
pub fn label_title(label: &TrackedLabel) -> String {
    format!("🏷️ {} Issues", label.name().to_uppercase())
}

/// GitHub issue search for open issues with the label.
///
/// The "unlabeled" bucket links to open issues without any label.
pub fn label_search_url(owner: &str, repo: &str, label: &TrackedLabel) -> String {
    let query = if label.is_unlabeled() {
        "is:issue is:open no:label".to_string()
    } else {
        format!("is:issue is:open label:\"{}\"", label.name())
    };

    let base = format!("https://github.com/{}/{}/issues", owner, repo);
    match Url::parse_with_params(&base, &[("q", query.as_str())]) {
        Ok(url) => url.to_string(),
        Err(e) => {
            tracing::warn!("Failed to build search URL for {}/{}: {}", owner, repo, e);
            base
        }
    }
}

/// "1 issue" / "N issues".
pub fn issue_count(count: usize) -> String {
    if count == 1 {
        "1 issue".to_string()
    } else {
        format!("{} issues", count)
    }
}

/// Renders the embed body.
///
/// One linked line per issue followed by the GitHub link. When the body would
/// exceed [`MAX_DESCRIPTION_LENGTH`] whole issue lines are dropped from the end
/// and an ellipsis line is added; the GitHub link is always kept intact.
pub fn render_description(issues: &[Issue], search_url: &str) -> String {
    if issues.is_empty() {
        return format!(
            "No open issues with this label.\n\n[View on GitHub]({})",
            search_url
        );
    }

    let link = format!("\n\n[View all on GitHub]({})", search_url);
    let lines: Vec<String> = issues.iter().map(issue_line).collect();
    let body = lines.join("\n");

    if char_len(&body) + char_len(&link) <= MAX_DESCRIPTION_LENGTH {
        return body + &link;
    }

    let budget = MAX_DESCRIPTION_LENGTH
        .saturating_sub(char_len(&link))
        .saturating_sub(char_len(TRUNCATION_MARKER));

    let mut truncated = String::new();
    let mut used = 0;
    for line in &lines {
        let separator = if truncated.is_empty() { 0 } else { 1 };
        let cost = separator + char_len(line);
        if used + cost > budget {
            break;
        }
        if separator == 1 {
            truncated.push('\n');
        }
        truncated.push_str(line);
        used += cost;
    }

    truncated + TRUNCATION_MARKER + &link
}

fn issue_line(issue: &Issue) -> String {
    let title = issue.title.replace('[', "\\[").replace(']', "\\]");
    format!("[#{} — {}]({})", issue.number, title, issue.html_url)
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}
