use tracing_subscriber::EnvFilter;

use crate::{error::AppError, router};

/// Installs the global tracing subscriber.
///
/// The filter is read from `RUST_LOG` and defaults to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Builds the HTTP client used for GitHub requests.
///
/// GitHub rejects requests without a user agent, so one is set for every request.
///
/// # Returns
/// - `Ok(reqwest::Client)` - Configured client
/// - `Err(AppError::ReqwestErr)` - TLS backend could not be initialized
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?;

    Ok(client)
}

/// Serves the liveness endpoint until the process exits.
///
/// # Arguments
/// - `port` - Port to listen on, on all interfaces
///
/// # Returns
/// - `Err(AppError::IoErr)` - Port could not be bound or the server failed
pub async fn serve_health(port: u16) -> Result<(), AppError> {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;

    tracing::info!("Health endpoint listening on port {}", port);

    axum::serve(listener, router::router()).await?;

    Ok(())
}
