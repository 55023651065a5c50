mod common;

use axum::body::{Body, Bytes};
use axum::extract::{Multipart, Path as UrlPath};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use common::MockServer;
use deepword::{ApiError, Credentials, DeepWordSession, DomainError, TransportConfig};
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tempfile::TempDir;

/// /files/{name} は名前をそのまま本文として返す（"missing" だけ 404）
fn file_route() -> Router {
    Router::new().route(
        "/files/{name}",
        get(|UrlPath(name): UrlPath<String>| async move {
            if name == "missing" {
                (StatusCode::NOT_FOUND, "no such file".to_string())
            } else {
                (StatusCode::OK, format!("contents of {}", name))
            }
        }),
    )
}

#[tokio::test]
async fn connect_rejects_invalid_credentials() {
    let server = MockServer::start(|_| Router::new()).await;
    let credentials = Credentials::new("wrong", "keys").unwrap();

    let err = DeepWordSession::connect(credentials, server.transport())
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Authentication));
    assert_eq!(server.hits(), 1);
}

/// 正しいキーでも /check_apikey が status と body を返すだけのサーバー
async fn start_validation_server(status: StatusCode, body: &'static str) -> (String, Arc<AtomicUsize>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let app = Router::new().route(
        "/check_apikey",
        post(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            async move { (status, body) }
        }),
    );
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (base_url, calls)
}

fn valid_credentials() -> Credentials {
    Credentials::new(common::API_KEY, common::SECRET_KEY).unwrap()
}

#[tokio::test]
async fn connect_keeps_server_failure_as_remote() {
    let (base_url, calls) =
        start_validation_server(StatusCode::SERVICE_UNAVAILABLE, "<html>maintenance</html>").await;

    let err = DeepWordSession::connect(valid_credentials(), TransportConfig::new(base_url))
        .await
        .unwrap_err();

    match &err {
        ApiError::Remote { status_code, .. } => assert_eq!(*status_code, Some(503)),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.raw_body(), Some("<html>maintenance</html>"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn connect_keeps_unparsable_body_as_remote() {
    let (base_url, _) = start_validation_server(StatusCode::OK, "welcome").await;

    let err = DeepWordSession::connect(valid_credentials(), TransportConfig::new(base_url))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Remote { .. }));
    assert_eq!(err.raw_body(), Some("welcome"));
}

#[tokio::test]
async fn connect_treats_unauthorized_status_as_authentication_failure() {
    let (base_url, _) = start_validation_server(StatusCode::UNAUTHORIZED, "denied").await;

    let err = DeepWordSession::connect(valid_credentials(), TransportConfig::new(base_url))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Authentication));
}

#[tokio::test]
async fn connect_reports_unreachable_server_as_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let transport = TransportConfig::new(format!("http://{}", addr));
    let err = DeepWordSession::connect(valid_credentials(), transport).await.unwrap_err();
    assert!(matches!(err, ApiError::Network { .. } | ApiError::Timeout { .. }));
}

#[tokio::test]
async fn available_credits_parses_count() {
    let server = MockServer::start(|_| {
        Router::new().route(
            "/api_get_credits/",
            post(|| async { Json(json!({ "available_credits": 42 })) }),
        )
    })
    .await;
    let session = server.connect().await;

    assert_eq!(session.available_credits().await.unwrap(), 42);
}

#[tokio::test]
async fn unparsable_credits_keeps_raw_body() {
    let server = MockServer::start(|_| {
        Router::new().route("/api_get_credits/", post(|| async { "<html>maintenance</html>" }))
    })
    .await;
    let session = server.connect().await;

    let err = session.available_credits().await.unwrap_err();
    assert!(matches!(err, ApiError::Remote { .. }));
    assert_eq!(err.raw_body(), Some("<html>maintenance</html>"));
}

#[tokio::test]
async fn server_error_status_is_remote_with_status_code() {
    let server = MockServer::start(|_| {
        Router::new().route(
            "/api_get_credits/",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
    })
    .await;
    let session = server.connect().await;

    match session.available_credits().await.unwrap_err() {
        ApiError::Remote {
            body, status_code, ..
        } => {
            assert_eq!(body, "boom");
            assert_eq!(status_code, Some(500));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn list_videos_keeps_server_order() {
    let server = MockServer::start(|_| {
        Router::new().route(
            "/list_video_api/",
            post(|| async {
                Json(json!({
                    "data": [
                        { "id": 2, "title": "second", "status": false },
                        { "id": 1, "title": "first", "status": true, "video_url": "http://cdn/first.mp4" }
                    ]
                }))
            }),
        )
    })
    .await;
    let session = server.connect().await;

    let videos = session.list_videos().await.unwrap();
    let ids: Vec<_> = videos.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(ids, ["2", "1"]);
    assert_eq!(videos[1].ready_url(), Some("http://cdn/first.mp4"));
}

#[tokio::test]
async fn text_to_speech_unknown_language_makes_no_request() {
    let server = MockServer::start(|_| Router::new()).await;
    let session = server.connect().await;
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("speech.mp3");
    let before = server.hits();

    let err = session
        .text_to_speech("hola", "Klingon", "Worf Male", &output)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ApiError::InvalidArgument(DomainError::UnknownLanguage { .. })
    ));
    assert_eq!(server.hits(), before);
    assert!(!output.exists());
}

#[tokio::test]
async fn text_to_speech_unknown_speaker_makes_no_request() {
    let server = MockServer::start(|_| Router::new()).await;
    let session = server.connect().await;
    let temp_dir = TempDir::new().unwrap();
    let before = server.hits();

    let err = session
        .text_to_speech("hi", "English (US)", "Nobody Male", temp_dir.path().join("x.mp3"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ApiError::InvalidArgument(DomainError::UnknownSpeaker { .. })
    ));
    assert_eq!(server.hits(), before);
}

#[tokio::test]
async fn text_to_speech_writes_decoded_audio_over_existing_file() {
    let server = MockServer::start(|_| {
        Router::new().route(
            "/api_text_to_speech/",
            post(|Json(body): Json<Value>| async move {
                let expected = json!({
                    "text": "hello world",
                    "name": "Wavenet-A",
                    "gender": "Male",
                    "code": "en-US",
                });
                if body == expected {
                    (StatusCode::OK, "aGVsbG8=")
                } else {
                    (StatusCode::BAD_REQUEST, "unexpected request body")
                }
            }),
        )
    })
    .await;
    let session = server.connect().await;
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("speech.mp3");
    std::fs::write(&output, b"previous contents that are longer").unwrap();

    let path = session
        .text_to_speech("hello world", "English (US)", "Wavenet-A Male", &output)
        .await
        .unwrap();

    assert_eq!(path, output);
    assert_eq!(std::fs::read(&output).unwrap(), b"hello");
}

#[tokio::test]
async fn text_to_speech_error_payload_is_remote() {
    let server = MockServer::start(|_| {
        Router::new().route(
            "/api_text_to_speech/",
            post(|| async { Json(json!({ "error": "insufficient credits" })) }),
        )
    })
    .await;
    let session = server.connect().await;
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("speech.mp3");

    let err = session
        .text_to_speech("hello", "English (US)", "Wavenet-A Male", &output)
        .await
        .unwrap_err();

    assert!(err.raw_body().unwrap().contains("insufficient credits"));
    assert!(!output.exists());
}

#[tokio::test]
async fn download_video_not_ready_writes_nothing() {
    let server = MockServer::start(|_| {
        Router::new().route(
            "/api_download_video/{id}",
            get(|| async { Json(json!({ "status": false })) }),
        )
    })
    .await;
    let session = server.connect().await;
    let temp_dir = TempDir::new().unwrap();

    let err = session
        .download_video_to("77", temp_dir.path())
        .await
        .unwrap_err();

    match err {
        ApiError::NotReady { video_id } => assert_eq!(video_id, "77"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn download_video_streams_ready_video() {
    let server = MockServer::start(|base| {
        let base = base.to_string();
        Router::new()
            .route(
                "/api_download_video/{id}",
                get(move |UrlPath(id): UrlPath<String>| {
                    let base = base.clone();
                    async move {
                        Json(json!({
                            "status": true,
                            "video_url": format!("{}/files/{}", base, id),
                            "video_name": format!("video-{}.mp4", id),
                        }))
                    }
                }),
            )
            .merge(file_route())
    })
    .await;
    let session = server.connect().await;
    let temp_dir = TempDir::new().unwrap();

    let path = session
        .download_video_to("12", temp_dir.path())
        .await
        .unwrap();

    assert_eq!(path, temp_dir.path().join("video-12.mp4"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "contents of 12");
}

#[tokio::test]
async fn slow_download_outlasting_connect_timeout_completes() {
    const CHUNKS: usize = 6;
    const CHUNK_LEN: usize = 1024;

    let server = MockServer::start(|base| {
        let base = base.to_string();
        Router::new()
            .route(
                "/api_download_video/{id}",
                get(move || {
                    let base = base.clone();
                    async move {
                        Json(json!({
                            "status": true,
                            "video_url": format!("{}/slow", base),
                            "video_name": "slow.mp4",
                        }))
                    }
                }),
            )
            .route(
                "/slow",
                get(|| async {
                    let chunks = futures::stream::unfold(0usize, |sent| async move {
                        if sent == CHUNKS {
                            return None;
                        }
                        tokio::time::sleep(Duration::from_millis(400)).await;
                        Some((Ok::<_, std::io::Error>(Bytes::from(vec![b'x'; CHUNK_LEN])), sent + 1))
                    });
                    Body::from_stream(chunks)
                }),
            )
    })
    .await;
    let credentials = valid_credentials();
    let transport = server.transport().with_connect_timeout(Duration::from_secs(1));
    let session = DeepWordSession::connect(credentials, transport).await.unwrap();
    let temp_dir = TempDir::new().unwrap();

    let path = session
        .download_video_to("slow", temp_dir.path())
        .await
        .unwrap();

    assert_eq!(std::fs::metadata(&path).unwrap().len(), (CHUNKS * CHUNK_LEN) as u64);
}

fn video_list_routes(base: &str, second_file: &'static str) -> Router {
    let base = base.to_string();
    Router::new()
        .route(
            "/list_video_api/",
            post(move || {
                let base = base.clone();
                async move {
                    Json(json!({
                        "data": [
                            { "id": 1, "title": "a.mp4", "status": true, "video_url": format!("{}/files/a", base) },
                            { "id": 2, "title": "b", "status": true, "video_url": format!("{}/files/{}", base, second_file) },
                            { "id": 3, "title": "c", "status": false }
                        ]
                    }))
                }
            }),
        )
        .merge(file_route())
}

#[tokio::test]
async fn download_all_videos_writes_ready_and_skips_processing() {
    let server = MockServer::start(|base| video_list_routes(base, "b")).await;
    let session = server.connect().await;
    let temp_dir = TempDir::new().unwrap();
    let folder = temp_dir.path().join("videos");
    std::fs::create_dir_all(&folder).unwrap();
    std::fs::write(folder.join("a.mp4"), "stale contents from an earlier run").unwrap();

    let report = session.download_all_videos(&folder).await.unwrap();

    assert_eq!(report.folder, folder);
    assert_eq!(report.written, vec![folder.join("a.mp4"), folder.join("b.mp4")]);
    assert_eq!(report.skipped, vec!["3".to_string()]);
    assert_eq!(std::fs::read_to_string(folder.join("a.mp4")).unwrap(), "contents of a");
    assert_eq!(std::fs::read_to_string(folder.join("b.mp4")).unwrap(), "contents of b");
    assert!(!folder.join("c.mp4").exists());
}

#[tokio::test]
async fn download_all_videos_aborts_on_failed_item() {
    let server = MockServer::start(|base| video_list_routes(base, "missing")).await;
    let session = server.connect().await;
    let temp_dir = TempDir::new().unwrap();

    let err = session.download_all_videos(temp_dir.path()).await.unwrap_err();

    match err {
        ApiError::Remote { status_code, .. } => assert_eq!(status_code, Some(404)),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn download_all_videos_with_empty_list_creates_folder() {
    let server = MockServer::start(|_| {
        Router::new().route("/list_video_api/", post(|| async { Json(json!({ "data": [] })) }))
    })
    .await;
    let session = server.connect().await;
    let temp_dir = TempDir::new().unwrap();
    let folder = temp_dir.path().join("empty");

    let report = session.download_all_videos(&folder).await.unwrap();
    assert!(report.written.is_empty());
    assert!(folder.is_dir());
}

#[tokio::test]
async fn download_audio_samples_and_video_actors() {
    let server = MockServer::start(|base| {
        let samples_base = base.to_string();
        let actors_base = base.to_string();
        Router::new()
            .route(
                "/api_get_audio_sample",
                post(move || {
                    let base = samples_base.clone();
                    async move {
                        Json(json!({
                            "sample_audio_files": [
                                { "audio_url": format!("{}/files/s1", base), "title": "Matthew", "extension": ".mp3" }
                            ]
                        }))
                    }
                }),
            )
            .route(
                "/api_get_video_actors",
                post(move || {
                    let base = actors_base.clone();
                    async move {
                        Json(json!({
                            "sample_video_files": [
                                { "video_url": format!("{}/files/v1", base), "title": "Anna", "extension": ".mp4" },
                                { "video_url": format!("{}/files/v2", base), "title": "Ben", "extension": ".mp4" }
                            ]
                        }))
                    }
                }),
            )
            .merge(file_route())
    })
    .await;
    let session = server.connect().await;
    let temp_dir = TempDir::new().unwrap();

    let samples = session
        .download_audio_samples(temp_dir.path().join("audio"))
        .await
        .unwrap();
    assert_eq!(samples.written, vec![temp_dir.path().join("audio/Matthew.mp3")]);
    assert_eq!(
        std::fs::read_to_string(temp_dir.path().join("audio/Matthew.mp3")).unwrap(),
        "contents of s1"
    );

    let actors = session
        .download_video_actors(temp_dir.path().join("actors"))
        .await
        .unwrap();
    assert_eq!(actors.written.len(), 2);
    assert!(temp_dir.path().join("actors/Ben.mp4").exists());
}

#[tokio::test]
async fn generate_video_missing_file_fails_before_upload() {
    let server = MockServer::start(|_| Router::new()).await;
    let session = server.connect().await;
    let temp_dir = TempDir::new().unwrap();
    let audio = temp_dir.path().join("voice.mp3");
    std::fs::write(&audio, b"audio").unwrap();
    let before = server.hits();

    let err = session
        .generate_video(temp_dir.path().join("missing.mp4"), &audio, None)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ApiError::InvalidArgument(DomainError::FileNotFound { .. })
    ));
    assert_eq!(server.hits(), before);
}

#[tokio::test]
async fn generate_video_uploads_both_files() {
    let server = MockServer::start(|_| {
        Router::new().route(
            "/generate_video_api",
            post(|mut multipart: Multipart| async move {
                let mut fields = Vec::new();
                while let Ok(Some(field)) = multipart.next_field().await {
                    let name = field.name().unwrap_or_default().to_string();
                    let file_name = field.file_name().map(str::to_string);
                    let size = field.bytes().await.map(|b| b.len()).unwrap_or_default();
                    fields.push(json!({ "name": name, "file_name": file_name, "size": size }));
                }
                Json(json!({ "status": "queued", "fields": fields })).into_response()
            }),
        )
    })
    .await;
    let session = server.connect().await;
    let temp_dir = TempDir::new().unwrap();
    let video = temp_dir.path().join("actor.mp4");
    let audio = temp_dir.path().join("voice.mp3");
    std::fs::write(&video, b"video-bytes").unwrap();
    std::fs::write(&audio, b"audio").unwrap();

    let response = session
        .generate_video(&video, &audio, Some("demo"))
        .await
        .unwrap();

    assert_eq!(response["status"], "queued");
    let fields = response["fields"].as_array().unwrap();
    assert_eq!(fields[0]["name"], "video_file");
    assert_eq!(fields[0]["file_name"], "actor.mp4");
    assert_eq!(fields[0]["size"], 11);
    assert_eq!(fields[1]["name"], "audio_file");
    assert_eq!(fields[1]["size"], 5);
    assert_eq!(fields[2]["name"], "name");
}
