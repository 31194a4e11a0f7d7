use crate::{
    Recorder,
    http::{SharedRecorder, router},
};

use std::sync::Arc;

use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use tokio::sync::Mutex;
use tower::ServiceExt;

fn shared(recorder: Recorder) -> SharedRecorder {
    Arc::new(Mutex::new(recorder))
}

#[allow(clippy::unwrap_used)]
async fn get(recorder: &SharedRecorder, uri: &str) -> Response {
    router(recorder.clone())
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

#[allow(clippy::unwrap_used)]
async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// WHAT: The root answers READY OK
/// WHY: The phone probes it to confirm the server is reachable
#[tokio::test]
async fn given_server_when_probing_root_then_ready() {
    // Given: A router
    let recorder = shared(Recorder::new("sleep 30", "r.wav"));

    // When: Requesting the root
    let response = get(&recorder, "/").await;

    // Then: 200 READY OK
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "READY OK");
}

/// WHAT: Responses allow any origin
/// WHY: Browser-based front ends call the server cross-origin
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_origin_header_when_requesting_then_cors_allows_any_origin() {
    // Given: A request from a web page
    let recorder = shared(Recorder::new("sleep 30", "r.wav"));
    let request = Request::get("/")
        .header(header::ORIGIN, "http://localhost:8100")
        .body(Body::empty())
        .unwrap();

    // When: Sending it
    let response = router(recorder).oneshot(request).await.unwrap();

    // Then: Wildcard allow-origin
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

/// WHAT: Stop while idle still answers OK
/// WHY: The phone treats any 200 as a confirmed stop
#[tokio::test]
async fn given_idle_recorder_when_stopping_then_ok() {
    // Given: An idle recorder
    let recorder = shared(Recorder::new("sleep 30", "r.wav"));

    // When: Requesting stop
    let response = get(&recorder, "/stop").await;

    // Then: 200 OK
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "OK");
}

/// WHAT: A start that cannot spawn answers 500 with the reason
/// WHY: Only 200 may flip the phone's recording state
#[tokio::test]
async fn given_broken_record_command_when_starting_then_server_error() {
    // Given: A recorder whose program does not exist
    let recorder = shared(Recorder::new("pnoi-no-such-recorder", "r.wav"));

    // When: Requesting start
    let response = get(&recorder, "/start").await;

    // Then: 500 naming the command, recorder idle
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_text(response).await.contains("pnoi-no-such-recorder"));
    assert!(!recorder.lock().await.is_recording());
}

/// WHAT: Start and stop drive the record process
/// WHY: These are the Wi-Fi record toggle's two requests
#[cfg(unix)]
#[tokio::test]
async fn given_idle_recorder_when_starting_then_stopping_then_process_follows() {
    // Given: An idle recorder
    let recorder = shared(Recorder::new("sleep 30", "r.wav"));

    // When: Starting
    let started = get(&recorder, "/start").await;

    // Then: 200 and recording
    assert_eq!(started.status(), StatusCode::OK);
    assert!(recorder.lock().await.is_recording());

    // When: Stopping
    let stopped = get(&recorder, "/stop").await;

    // Then: 200 and idle
    assert_eq!(stopped.status(), StatusCode::OK);
    assert!(!recorder.lock().await.is_recording());
}

/// WHAT: Transfer serves the recording file
/// WHY: The phone downloads it as recording.wav
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_recording_when_transferring_then_file_served() {
    // Given: A recording on disk
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("recording.wav");
    std::fs::write(&path, b"RIFF0000WAVE").unwrap();
    let recorder = shared(Recorder::new("sleep 30", &path));

    // When: Requesting transfer
    let response = get(&recorder, "/transfer").await;

    // Then: The file contents
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "RIFF0000WAVE");
}

/// WHAT: Transfer without a recording is 404
/// WHY: The phone's download fails instead of saving an empty file
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_no_recording_when_transferring_then_not_found() {
    // Given: A recording path that does not exist
    let dir = tempfile::tempdir().unwrap();
    let recorder = shared(Recorder::new("sleep 30", dir.path().join("missing.wav")));

    // When: Requesting transfer
    let response = get(&recorder, "/transfer").await;

    // Then: 404
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
