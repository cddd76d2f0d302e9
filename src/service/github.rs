//! GitHub REST client.
//!
//! Read-only access to a single repository's labels and open issues. Requests are
//! sent with a bearer token when one is configured and anonymously otherwise; the
//! token only changes the rate limit, never the behavior.

use reqwest::{header::ACCEPT, Client, StatusCode};
use serde::de::DeserializeOwned;
use serenity::async_trait;

use crate::{
    config::Config,
    error::{github::GitHubError, AppError},
    model::issue::{Issue, IssueDto, RepositoryLabel},
};

/// Page size for every list request; GitHub's maximum.
pub const PAGE_SIZE: usize = 100;

/// Upper bound on label pages followed, to keep a misbehaving API from looping.
const MAX_LABEL_PAGES: u32 = 10;

const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const GITHUB_API_VERSION: &str = "2022-11-28";

/// Read-only view of the issue tracker the bot mirrors.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// All labels of the repository, in GitHub's order.
    async fn list_labels(&self) -> Result<Vec<RepositoryLabel>, AppError>;

    /// First page of open issues, most recently updated first.
    ///
    /// Pull requests are included and flagged; callers filter them.
    async fn list_open_issues(&self) -> Result<Vec<Issue>, AppError>;
}

pub struct GitHubClient {
    http: Client,
    api_url: String,
    owner: String,
    repo: String,
    token: Option<String>,
}

impl GitHubClient {
    /// Creates a client for the repository named in the configuration.
    ///
    /// # Arguments
    /// - `http` - Shared reqwest client (carries the user agent)
    /// - `config` - Application configuration with API URL, repository and token
    pub fn new(http: Client, config: &Config) -> Self {
        Self {
            http,
            api_url: config.github_api_url.clone(),
            owner: config.sync.owner.clone(),
            repo: config.sync.repo.clone(),
            token: config.github_token.clone(),
        }
    }

    /// Performs a GET against a repository-scoped endpoint and decodes the body.
    ///
    /// # Arguments
    /// - `resource` - Path below `/repos/{owner}/{repo}/`, e.g. `labels`
    /// - `query` - Query parameters
    ///
    /// # Returns
    /// - `Ok(T)` - Decoded JSON body
    /// - `Err(AppError::GitHubErr(RateLimited))` - Request budget exhausted
    /// - `Err(AppError::GitHubErr(UnexpectedStatus))` - Any other non-success status
    /// - `Err(AppError::ReqwestErr)` - Transport or decoding failure
    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &str,
        query: &[(&str, String)],
    ) -> Result<T, AppError> {
        let path = format!("/repos/{}/{}/{}", self.owner, self.repo, resource);

        let mut request = self
            .http
            .get(format!("{}{}", self.api_url, path))
            .header(ACCEPT, GITHUB_ACCEPT)
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
            .query(query);

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let remaining = header_value(&response, "x-ratelimit-remaining");
        if matches!(status, StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS)
            && remaining == Some(0)
        {
            return Err(GitHubError::RateLimited {
                path,
                reset: header_value(&response, "x-ratelimit-reset"),
            }
            .into());
        }

        let body = response.text().await.unwrap_or_default();
        Err(GitHubError::UnexpectedStatus {
            status: status.as_u16(),
            path,
            body,
        }
        .into())
    }
}

fn header_value(response: &reqwest::Response, name: &str) -> Option<i64> {
    response
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
}

#[async_trait]
impl IssueTracker for GitHubClient {
    async fn list_labels(&self) -> Result<Vec<RepositoryLabel>, AppError> {
        let mut labels = Vec::new();

        for page in 1..=MAX_LABEL_PAGES {
            let batch: Vec<RepositoryLabel> = self
                .get_json(
                    "labels",
                    &[
                        ("per_page", PAGE_SIZE.to_string()),
                        ("page", page.to_string()),
                    ],
                )
                .await?;

            let fetched = batch.len();
            labels.extend(batch);

            if fetched < PAGE_SIZE {
                break;
            }
        }

        tracing::debug!(
            "Fetched {} labels for {}/{}",
            labels.len(),
            self.owner,
            self.repo
        );

        Ok(labels)
    }

    async fn list_open_issues(&self) -> Result<Vec<Issue>, AppError> {
        let issues: Vec<IssueDto> = self
            .get_json(
                "issues",
                &[
                    ("state", "open".to_string()),
                    ("sort", "updated".to_string()),
                    ("direction", "desc".to_string()),
                    ("per_page", PAGE_SIZE.to_string()),
                ],
            )
            .await?;

        Ok(issues.into_iter().map(IssueDto::into_issue).collect())
    }
}
