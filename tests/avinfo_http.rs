//! End-to-end tests against a local HTTP server standing in for the
//! inspection service.

use axum::{
    extract::{Path, RawQuery},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use qiniu_video_analyzer::{AnalyzerConfig, Blob, QiniuVideoAnalyzer, VideoMetadata};
use serde_json::json;
use std::net::SocketAddr;
use std::time::Duration;

async fn avinfo_handler(Path(key): Path<String>, RawQuery(query): RawQuery) -> impl IntoResponse {
    if query.as_deref() != Some("avinfo") {
        return (StatusCode::BAD_REQUEST, "expected avinfo operation".to_string());
    }

    let body = match key.as_str() {
        "square.mp4" => json!({
            "streams": [{
                "codec_type": "video",
                "width": 240,
                "height": 240,
                "duration": "2.000000",
                "display_aspect_ratio": "1:1"
            }]
        }),
        "portrait.mov" => json!({
            "streams": [
                { "codec_type": "audio", "duration": "8.0" },
                {
                    "codec_type": "video",
                    "width": 1920,
                    "height": 1080,
                    "duration": "8.000000",
                    "tags": { "rotate": "-90", "creation_time": "2024-01-01T00:00:00Z" }
                }
            ]
        }),
        "audio-only.m4a" => json!({ "streams": [{ "codec_type": "audio" }] }),
        "no-streams.mp4" => json!({ "streams": [] }),
        "garbage.mp4" => return (StatusCode::OK, "<html>oops</html>".to_string()),
        _ => {
            return (
                StatusCode::NOT_FOUND,
                json!({ "error": "no such file or directory" }).to_string(),
            )
        }
    };
    (StatusCode::OK, body.to_string())
}

async fn slow_handler() -> impl IntoResponse {
    tokio::time::sleep(Duration::from_secs(3)).await;
    json!({ "streams": [{ "codec_type": "video", "width": 240, "height": 240 }] }).to_string()
}

async fn start_server() -> SocketAddr {
    let app = Router::new()
        .route("/media/{*key}", get(avinfo_handler))
        .route("/slow/{*key}", get(slow_handler));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn analyzer_for(domain: String) -> QiniuVideoAnalyzer {
    analyzer_with_timeout(domain, 5)
}

fn analyzer_with_timeout(domain: String, timeout_secs: u64) -> QiniuVideoAnalyzer {
    let mut config = AnalyzerConfig::default();
    config.service.domain = domain;
    config.service.protocol = "http".to_string();
    config.http.timeout_secs = timeout_secs;
    QiniuVideoAnalyzer::from_config(&config).unwrap()
}

fn video(key: &str) -> Blob {
    Blob::new(key).with_content_type("video/mp4")
}

#[tokio::test]
async fn test_square_video() {
    let addr = start_server().await;
    let analyzer = analyzer_for(format!("{}/media", addr));

    let meta = analyzer.metadata(&video("square.mp4")).await;
    assert_eq!(
        serde_json::to_value(&meta).unwrap(),
        json!({ "width": 240, "height": 240, "duration": "2.000000", "aspect_ratio": "1:1" })
    );
}

#[tokio::test]
async fn test_rotated_video() {
    let addr = start_server().await;
    let analyzer = analyzer_for(format!("{}/media", addr));

    let meta = analyzer.metadata(&video("portrait.mov")).await;
    assert_eq!(meta.width, Some(1080));
    assert_eq!(meta.height, Some(1920));
    assert_eq!(meta.aspect_ratio, None);
    assert_eq!(
        serde_json::to_value(&meta).unwrap(),
        json!({ "width": 1080, "height": 1920, "duration": "8.000000" })
    );
}

#[tokio::test]
async fn test_without_video_stream() {
    let addr = start_server().await;
    let analyzer = analyzer_for(format!("{}/media", addr));

    assert!(analyzer.metadata(&video("audio-only.m4a")).await.is_empty());
    assert!(analyzer.metadata(&video("no-streams.mp4")).await.is_empty());
}

#[tokio::test]
async fn test_failures_yield_empty_metadata() {
    let addr = start_server().await;
    let analyzer = analyzer_for(format!("{}/media", addr));

    assert_eq!(analyzer.metadata(&video("missing.mp4")).await, VideoMetadata::default());
    assert_eq!(analyzer.metadata(&video("garbage.mp4")).await, VideoMetadata::default());
}

#[tokio::test]
async fn test_unreachable_service() {
    // Bind and drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let analyzer = analyzer_for(addr.to_string());
    let meta = analyzer.metadata(&video("square.mp4")).await;
    assert!(meta.is_empty());
    assert_eq!(serde_json::to_string(&meta).unwrap(), "{}");
}

#[tokio::test]
async fn test_timeout_yields_empty_metadata() {
    let addr = start_server().await;
    let analyzer = analyzer_with_timeout(format!("{}/slow", addr), 1);

    let meta = analyzer.metadata(&video("square.mp4")).await;
    assert!(meta.is_empty());
    assert_eq!(serde_json::to_string(&meta).unwrap(), "{}");
}
