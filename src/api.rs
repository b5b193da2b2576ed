//! HTTP API.
//!
//! All routes live under `/api/v1/transcript`. Response bodies come straight
//! from [`TranscriptService`], and the HTTP status mirrors their `status`.

use crate::service::TranscriptService;
use axum::{
    extract::State,
    http::{HeaderValue, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{info, warn};

pub const API_PREFIX: &str = "/api/v1/transcript";

#[derive(Debug, Deserialize)]
pub struct UploadRequest {
    #[serde(rename = "videoId")]
    pub video_id: String,
}

#[derive(Debug, Deserialize)]
pub struct QuestionRequest {
    pub question: String,
}

/// Build the application router.
pub fn router(service: Arc<TranscriptService>, allowed_hosts: &[String]) -> Router {
    let routes = Router::new()
        .route("/", get(index))
        .route("/upload", post(upload))
        .route("/ask-question", post(ask_question))
        .with_state(service);

    Router::new()
        .nest(API_PREFIX, routes)
        .layer(cors_layer(allowed_hosts))
}

/// Bind and serve until the process is stopped.
pub async fn serve(
    service: Arc<TranscriptService>,
    allowed_hosts: &[String],
    addr: &str,
) -> std::io::Result<()> {
    let app = router(service, allowed_hosts);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}{}", addr, API_PREFIX);
    axum::serve(listener, app).await
}

fn cors_layer(allowed_hosts: &[String]) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if allowed_hosts.iter().any(|h| h == "*") {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_hosts
        .iter()
        .filter_map(|host| match HeaderValue::from_str(host) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid allowed host: {}", host);
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(origins))
}

fn status_code(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

async fn index() -> &'static str {
    "Server Is running"
}

async fn upload(
    State(service): State<Arc<TranscriptService>>,
    Json(req): Json<UploadRequest>,
) -> impl IntoResponse {
    let response = service.upload_transcript(&req.video_id).await;
    (status_code(response.status), Json(response))
}

async fn ask_question(
    State(service): State<Arc<TranscriptService>>,
    Json(req): Json<QuestionRequest>,
) -> impl IntoResponse {
    let response = service.ask_question(&req.question).await;
    (status_code(response.status), Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::tests::test_service;
    use crate::service::{QuestionResponse, TranscriptUploadResponse};
    use crate::testing::{FakeVideo, ScriptedGenerator, StaticTranscriptSource, WordEmbedder};
    use axum::{
        body::Body,
        http::{header, Method, Request},
    };
    use http_body_util::BodyExt; // for `collect`
    use tower::ServiceExt; // for `oneshot`

    fn app() -> Router {
        let source = StaticTranscriptSource::default()
            .with_video(
                "capital0001",
                FakeVideo::Captions(vec!["The capital of Test Country is Testville."]),
            )
            .with_video("disabled001", FakeVideo::Disabled);
        let service = test_service(
            source,
            Arc::new(WordEmbedder::default()),
            Arc::new(ScriptedGenerator::testville()),
        );
        router(Arc::new(service), &["*".to_string()])
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn index() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/transcript")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"Server Is running");
    }

    #[tokio::test]
    async fn upload_success() {
        let response = app()
            .oneshot(post_json(
                "/api/v1/transcript/upload",
                serde_json::json!({ "videoId": "capital0001" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body: TranscriptUploadResponse = body_json(response).await;
        assert!(body.success);
        assert_eq!(body.status, 201);
        assert_eq!(body.message, "Transcript Uploaded Successfully");
    }

    #[tokio::test]
    async fn upload_without_transcript() {
        let response = app()
            .oneshot(post_json(
                "/api/v1/transcript/upload",
                serde_json::json!({ "videoId": "disabled001" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: TranscriptUploadResponse = body_json(response).await;
        assert!(!body.success);
        assert_eq!(body.message, "NO CONTENT FOUND OR NO TRANSCRIPT FOUND");
    }

    #[tokio::test]
    async fn ask_question() {
        let response = app()
            .oneshot(post_json(
                "/api/v1/transcript/ask-question",
                serde_json::json!({ "question": "What is this about?" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: QuestionResponse = body_json(response).await;
        assert!(body.success);
        assert_eq!(body.message, "Response Generated Successfully");
        assert_eq!(body.data, "I do not have knowledge about this.");
    }

    #[tokio::test]
    async fn malformed_body_is_rejected() {
        let response = app()
            .oneshot(post_json(
                "/api/v1/transcript/upload",
                serde_json::json!({ "video": "capital0001" }),
            ))
            .await
            .unwrap();

        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn cors_allows_configured_origin() {
        let source = StaticTranscriptSource::default();
        let service = test_service(
            source,
            Arc::new(WordEmbedder::default()),
            Arc::new(ScriptedGenerator::testville()),
        );
        let app = router(Arc::new(service), &["http://localhost:5173".to_string()]);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/transcript")
                    .header(header::ORIGIN, "http://localhost:5173")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&HeaderValue::from_static("http://localhost:5173"))
        );
    }
}
