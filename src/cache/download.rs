use std::path::Path;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info};

use crate::error::NutsError;

/// Request timeout for the archive download.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Download a remote archive into `dest` with a single GET request.
///
/// Nothing is retried: a transport failure, timeout, or non-2xx status is
/// fatal for the invocation and surfaces the URL with the underlying cause.
pub async fn download_archive(url: &str, dest: &Path) -> Result<(), NutsError> {
    let client = Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(|err| fetch_error(url, err.to_string()))?;

    debug!("requesting {url}");
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|err| fetch_error(url, err.to_string()))?;

    if !response.status().is_success() {
        return Err(fetch_error(
            url,
            format!("HTTP request failed with status {}", response.status()),
        ));
    }

    info!("downloading data from {url}");
    let bytes = response
        .bytes()
        .await
        .map_err(|err| fetch_error(url, err.to_string()))?;
    tokio::fs::write(dest, &bytes).await?;
    debug!("wrote {} bytes to {}", bytes.len(), dest.display());

    Ok(())
}

fn fetch_error(url: &str, reason: String) -> NutsError {
    NutsError::Fetch {
        url: url.to_string(),
        reason,
    }
}
