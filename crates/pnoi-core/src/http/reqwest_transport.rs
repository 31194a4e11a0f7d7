use crate::{
    CoreError, CoreResult,
    http::{HttpResponse, HttpTransport},
};

use std::{
    ffi::OsString,
    panic::Location,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use error_location::ErrorLocation;
use futures_util::StreamExt;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument};

/// [`HttpTransport`] backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport with a default client.
    #[track_caller]
    pub fn new() -> CoreResult<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|source| CoreError::HttpClient {
                source,
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(Self { client })
    }

    /// Wrap an existing client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self))]
    async fn send_request(&self, url: &str) -> CoreResult<HttpResponse> {
        let http_error = |source| CoreError::Http {
            url: url.to_string(),
            source,
            location: ErrorLocation::from(Location::caller()),
        };

        let response = self.client.get(url).send().await.map_err(http_error)?;
        let status = response.status().as_u16();
        let data = response.text().await.map_err(http_error)?;

        debug!(status, body_len = data.len(), "Request completed");

        Ok(HttpResponse { status, data })
    }

    #[instrument(skip(self))]
    async fn download_file(&self, url: &str, destination: &Path) -> CoreResult<()> {
        let http_error = |source| CoreError::Http {
            url: url.to_string(),
            source,
            location: ErrorLocation::from(Location::caller()),
        };

        let response = self.client.get(url).send().await.map_err(http_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoreError::DownloadStatus {
                url: url.to_string(),
                status: status.as_u16(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if let Some(parent) = destination.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        // Stream into a sibling file, then rename so a failed transfer never
        // leaves a truncated recording in place of a good one.
        let partial = partial_path(destination);
        let written = match stream_to_file(response, url, &partial).await {
            Ok(written) => written,
            Err(e) => {
                if let Err(remove_error) = tokio::fs::remove_file(&partial).await {
                    debug!(partial = ?partial, error = %remove_error, "No partial file to remove");
                }
                return Err(e);
            }
        };

        tokio::fs::rename(&partial, destination).await?;

        info!(destination = ?destination, bytes = written, "Download complete");

        Ok(())
    }
}

pub(crate) fn partial_path(destination: &Path) -> PathBuf {
    let mut name = OsString::from(destination.as_os_str());
    name.push(".part");
    PathBuf::from(name)
}

/// Write the response body to `path`, returning the byte count.
async fn stream_to_file(response: reqwest::Response, url: &str, path: &Path) -> CoreResult<u64> {
    let mut file = tokio::fs::File::create(path).await?;
    let mut written: u64 = 0;

    let mut body = response.bytes_stream();
    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(|source| CoreError::Http {
            url: url.to_string(),
            source,
            location: ErrorLocation::from(Location::caller()),
        })?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }

    file.flush().await?;
    file.sync_all().await?;

    Ok(written)
}
