use crate::{error::AppError, model::issue::Issue, service::github::IssueTracker};

pub struct IssueFetcher<'a> {
    github: &'a dyn IssueTracker,
}

impl<'a> IssueFetcher<'a> {
    pub fn new(github: &'a dyn IssueTracker) -> Self {
        Self { github }
    }

    /// Fetches open issues, most recently updated first, without pull requests.
    ///
    /// Only the first page (100 entries, pull requests included) is requested;
    /// anything beyond it is not shown.
    pub async fn fetch_open_issues(&self) -> Result<Vec<Issue>, AppError> {
        let listed = self.github.list_open_issues().await?;
        let listed_count = listed.len();

        let issues: Vec<Issue> = listed
            .into_iter()
            .filter(|issue| !issue.is_pull_request)
            .collect();

        tracing::debug!(
            "Fetched {} open issues ({} pull requests skipped)",
            issues.len(),
            listed_count - issues.len()
        );

        Ok(issues)
    }
}
