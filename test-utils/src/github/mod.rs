//! JSON fixtures shaped like GitHub REST API responses.
//!
//! Only the fields the bot reads are filled in, plus a few that real responses
//! always carry so that decoding is exercised against realistic payloads.

use serde_json::{json, Value};

/// Repository the fixtures point at.
pub const TEST_OWNER: &str = "octo";
pub const TEST_REPO: &str = "widgets";

/// A label as listed by `GET /repos/{owner}/{repo}/labels`.
pub fn label_json(id: u64, name: &str) -> Value {
    json!({
        "id": id,
        "node_id": format!("LA_{}", id),
        "url": format!("https://api.github.com/repos/{}/{}/labels/{}", TEST_OWNER, TEST_REPO, name),
        "name": name,
        "color": "ededed",
        "default": false,
        "description": null,
    })
}

/// An open issue as listed by `GET /repos/{owner}/{repo}/issues`.
pub fn issue_json(number: u64, title: &str, labels: &[&str]) -> Value {
    let labels: Vec<Value> = labels
        .iter()
        .enumerate()
        .map(|(index, name)| label_json(index as u64 + 1, name))
        .collect();

    json!({
        "id": 1000 + number,
        "number": number,
        "title": title,
        "html_url": format!("https://github.com/{}/{}/issues/{}", TEST_OWNER, TEST_REPO, number),
        "state": "open",
        "labels": labels,
        "comments": 0,
        "updated_at": "2024-01-01T00:00:00Z",
    })
}

/// An open pull request as it appears in the issues listing.
pub fn pull_request_json(number: u64, title: &str, labels: &[&str]) -> Value {
    let mut value = issue_json(number, title, labels);
    value["html_url"] = json!(format!(
        "https://github.com/{}/{}/pull/{}",
        TEST_OWNER, TEST_REPO, number
    ));
    value["pull_request"] = json!({
        "url": format!("https://api.github.com/repos/{}/{}/pulls/{}", TEST_OWNER, TEST_REPO, number),
        "html_url": format!("https://github.com/{}/{}/pull/{}", TEST_OWNER, TEST_REPO, number),
    });
    value
}
