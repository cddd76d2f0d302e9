use thiserror::Error;

/// Failures reported by the GitHub REST API.
///
/// Transport-level failures (DNS, TLS, decoding) surface as `AppError::ReqwestErr`
/// instead; these variants cover responses that arrived but were not successful.
#[derive(Error, Debug)]
pub enum GitHubError {
    /// The API answered with a non-success status code.
    #[error("GitHub request to {path} failed with status {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status code returned by GitHub
        status: u16,
        /// Request path relative to the API base URL
        path: String,
        /// Response body, kept for logging
        body: String,
    },

    /// The request budget for the current window is exhausted.
    ///
    /// Nothing retries on this error; the next scheduled refresh tries again.
    #[error("GitHub rate limit exhausted for {path} (resets at unix {reset:?})")]
    RateLimited {
        /// Request path relative to the API base URL
        path: String,
        /// Value of the `x-ratelimit-reset` header, if present
        reset: Option<i64>,
    },
}
