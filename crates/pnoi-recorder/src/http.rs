//! HTTP command server for the Wi-Fi variant.

use crate::{Recorder, RecorderResult};

use std::{convert::Infallible, sync::Arc};

use axum::{
    Router,
    body::Body,
    extract::{Request, State},
    response::Response,
    routing::get,
};
use tokio::{net::TcpListener, sync::Mutex};
use tower::ServiceExt;
use tower_http::{cors::CorsLayer, services::ServeFile};
use tracing::{debug, info, instrument};

/// Recorder shared between request handlers.
pub type SharedRecorder = Arc<Mutex<Recorder>>;

/// Routes answering the phone's Wi-Fi commands.
pub fn router(recorder: SharedRecorder) -> Router {
    Router::new()
        .route("/", get(ready))
        .route("/start", get(start))
        .route("/stop", get(stop))
        .route("/transfer", get(transfer))
        .layer(CorsLayer::permissive())
        .with_state(recorder)
}

/// Serve on `bind` until Ctrl-C, then stop any running recording.
#[instrument(skip(recorder))]
pub async fn serve(bind: &str, recorder: SharedRecorder) -> RecorderResult<()> {
    let listener = TcpListener::bind(bind).await?;
    info!(addr = ?listener.local_addr()?, "HTTP server listening");

    axum::serve(listener, router(recorder.clone()))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown requested");
        })
        .await?;

    recorder.lock().await.stop().await?;

    Ok(())
}

async fn ready() -> &'static str {
    "READY OK"
}

async fn start(State(recorder): State<SharedRecorder>) -> RecorderResult<&'static str> {
    let mut recorder = recorder.lock().await;
    recorder.start()?;
    debug!(session = ?recorder.session(), "Start handled");
    Ok("OK")
}

async fn stop(State(recorder): State<SharedRecorder>) -> RecorderResult<&'static str> {
    recorder.lock().await.stop().await?;
    Ok("OK")
}

/// The recording file, or 404 when nothing has been recorded.
async fn transfer(
    State(recorder): State<SharedRecorder>,
    request: Request,
) -> Result<Response, Infallible> {
    let path = recorder.lock().await.path().to_path_buf();
    info!(?path, "Serving recording");

    let response = ServeFile::new(path).oneshot(request).await?;
    Ok(response.map(Body::new))
}
