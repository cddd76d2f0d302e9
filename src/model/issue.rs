use serde::Deserialize;

use crate::model::label::LabelKey;

/// An issue (or pull request) as listed by GitHub.
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    pub html_url: String,
    pub state: String,
    /// Label names with GitHub's casing
    pub labels: Vec<String>,
    /// The issues endpoint also lists pull requests; those carry this flag.
    pub is_pull_request: bool,
}

impl Issue {
    /// Normalized keys of this issue's labels, for priority matching.
    pub fn label_keys(&self) -> Vec<LabelKey> {
        self.labels.iter().map(|name| LabelKey::new(name)).collect()
    }

    pub fn is_unlabeled(&self) -> bool {
        self.labels.is_empty()
    }
}

/// A repository label as returned by `GET /repos/{owner}/{repo}/labels`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RepositoryLabel {
    pub name: String,
}

/// Wire format of one entry of `GET /repos/{owner}/{repo}/issues`.
#[derive(Debug, Deserialize)]
pub struct IssueDto {
    pub number: u64,
    pub title: String,
    pub html_url: String,
    pub state: String,
    #[serde(default)]
    pub labels: Vec<RepositoryLabel>,
    /// Present (with link metadata) only on pull requests
    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
}

impl IssueDto {
    pub fn into_issue(self) -> Issue {
        Issue {
            number: self.number,
            title: self.title,
            html_url: self.html_url,
            state: self.state,
            labels: self.labels.into_iter().map(|label| label.name).collect(),
            is_pull_request: self.pull_request.is_some(),
        }
    }
}
