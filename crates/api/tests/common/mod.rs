#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use gongryak_api::config::{ServerConfig, SessionConfig, SheetsBackend, SheetsConfig};
use gongryak_api::router::build_app_router;
use gongryak_api::state::AppState;
use gongryak_api::store::build_submission_sink;
use gongryak_core::record::WallClock;
use gongryak_core::variant::SurveyVariant;
use gongryak_sheets::MemorySheetStore;
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Header row the test worksheet starts with.
pub const HEADER: [&str; 10] = [
    "user_id", "sex", "age", "mbti", "category", "style", "step1", "step2", "step3", "submitted_at",
];

/// Build a test `ServerConfig` for the given survey variant.
pub fn test_config(survey: SurveyVariant) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        static_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../static"),
        session: SessionConfig {
            cookie_name: "gongryak.sid".to_string(),
            cookie_secure: false,
        },
        survey,
        wall_clock: WallClock::default(),
        sheets: SheetsConfig {
            backend: SheetsBackend::Memory,
            spreadsheet_id: None,
            worksheet: "Sheet1".to_string(),
            identifier_header: "user_id".to_string(),
            credentials: None,
        },
    }
}

/// A router over `store` plus the store itself, for asserting on rows.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemorySheetStore>,
}

impl TestApp {
    pub fn new(survey: SurveyVariant) -> Self {
        Self::with_store(survey, Arc::new(MemorySheetStore::with_header(HEADER)))
    }

    pub fn with_store(survey: SurveyVariant, store: Arc<MemorySheetStore>) -> Self {
        let config = test_config(survey);
        let sink = build_submission_sink(store.clone(), &config);
        let state = AppState {
            config: Arc::new(config.clone()),
            sink: Arc::new(sink),
        };
        Self {
            router: build_app_router(state, &config),
            store,
        }
    }
}

/// Send a request with an optional session cookie.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    cookie: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };
    app.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

/// `name=value` of the session cookie set on `response`, if any.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

/// Open a session and return its cookie and identifier.
pub async fn open_session(app: &Router) -> (String, String) {
    let response = get(app, "/api/v1/session").await;
    let cookie = session_cookie(&response).expect("session cookie must be set");
    let json = body_json(response).await;
    let id = json["data"]["session_id"].as_str().unwrap().to_string();
    (cookie, id)
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
