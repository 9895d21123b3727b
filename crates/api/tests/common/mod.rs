#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use image::{Rgba, RgbaImage};
use sqlx::PgPool;
use tower::ServiceExt;

use v0mon_api::config::{ServerConfig, StorageConfig};
use v0mon_api::render::og::encode_png;
use v0mon_api::router::build_app_router;
use v0mon_api::state::AppState;
use v0mon_genai::{ContentPart, GenAiError};
use v0mon_pipeline::adapters::PgCreatureStore;
use v0mon_pipeline::ports::ImageGenerator;
use v0mon_pipeline::{CreatureOrchestrator, PipelineConfig};
use v0mon_storage::memory::MemoryStorage;

/// Shared secret configured for test apps.
pub const TEST_API_KEY: &str = "test-internal-key";

/// Public base URL configured for test apps.
pub const TEST_BASE_URL: &str = "http://localhost:3000";

/// Build a test `ServerConfig` with safe defaults and in-memory storage.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        public_base_url: TEST_BASE_URL.to_string(),
        internal_api_key: Some(TEST_API_KEY.to_string()),
        storage: StorageConfig::Memory,
        pipeline: PipelineConfig::default(),
    }
}

/// A small opaque PNG standing in for generated artwork.
pub fn artwork_png() -> Vec<u8> {
    encode_png(&RgbaImage::from_pixel(32, 32, Rgba([220, 80, 40, 255]))).unwrap()
}

/// Generator returning a fixed response and counting calls.
pub struct FakeGenerator {
    parts: Mutex<Result<Vec<ContentPart>, String>>,
    calls: AtomicUsize,
}

impl FakeGenerator {
    /// A generator that answers with a name line and PNG artwork.
    pub fn named(text: &str) -> Self {
        Self::with_parts(vec![
            ContentPart::Text(text.to_string()),
            ContentPart::InlineData {
                mime_type: "image/png".into(),
                data: artwork_png(),
            },
        ])
    }

    pub fn with_parts(parts: Vec<ContentPart>) -> Self {
        Self {
            parts: Mutex::new(Ok(parts)),
            calls: AtomicUsize::new(0),
        }
    }

    /// A generator whose API call always fails.
    pub fn failing(body: &str) -> Self {
        Self {
            parts: Mutex::new(Err(body.to_string())),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageGenerator for FakeGenerator {
    async fn generate(&self, _prompt: &str) -> Result<Option<Vec<ContentPart>>, GenAiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &*self.parts.lock().unwrap() {
            Ok(parts) => Ok(Some(parts.clone())),
            Err(body) => Err(GenAiError::ApiError {
                status: 503,
                body: body.clone(),
            }),
        }
    }
}

/// A fully wired application plus handles on its fakes.
pub struct TestApp {
    pub router: Router,
    pub pool: PgPool,
    pub storage: Arc<MemoryStorage>,
    pub generator: Option<Arc<FakeGenerator>>,
}

impl TestApp {
    /// A fresh clone of the router for a single `oneshot` call.
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    pub fn generator_calls(&self) -> usize {
        self.generator.as_ref().map_or(0, |g| g.call_count())
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool, in-memory storage and the given generator.
pub fn build_test_app_with(
    pool: PgPool,
    config: ServerConfig,
    generator: Option<FakeGenerator>,
) -> TestApp {
    let storage = Arc::new(MemoryStorage::new(config.media_base_url()));
    let generator = generator.map(Arc::new);
    let orchestrator = CreatureOrchestrator::new(
        Arc::new(PgCreatureStore::new(pool.clone())),
        storage.clone(),
        generator
            .clone()
            .map(|g| g as Arc<dyn ImageGenerator>),
    );

    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
        orchestrator: Arc::new(orchestrator),
    };

    TestApp {
        router: build_app_router(state, &config),
        pool,
        storage,
        generator,
    }
}

/// Test app with a generator that names every creature `Zyrx`.
pub fn build_test_app(pool: PgPool) -> TestApp {
    build_test_app_with(
        pool,
        test_config(),
        Some(FakeGenerator::named("Pokemon Name: Zyrx\nA sparky rocket fox.")),
    )
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_json(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    api_key: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(key) = api_key {
        builder = builder.header("x-api-key", key);
    }
    app.oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}
