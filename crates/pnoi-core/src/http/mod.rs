mod reqwest_transport;

pub use reqwest_transport::ReqwestTransport;

use crate::CoreResult;

use std::path::Path;

use async_trait::async_trait;

/// Status line and body of a completed HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub data: String,
}

/// HTTP capability used by the Wi-Fi controller.
///
/// A request that reaches the server resolves to `Ok` whatever its status;
/// only transport failures resolve to `Err`.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Issue a GET request to `url`.
    async fn send_request(&self, url: &str) -> CoreResult<HttpResponse>;

    /// Download `url` to `destination`, replacing any existing file.
    async fn download_file(&self, url: &str, destination: &Path) -> CoreResult<()>;
}
