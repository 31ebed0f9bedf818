//! HTTP routes: the Q&A proxy plus read-only scene endpoints.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use orrery_engine::{render_svg, AnimationClock, Catalog, InfoCard, Language, Scene, ViewState};

use crate::config::ServerConfig;
use crate::error::AskError;
use crate::upstream::TextGenerator;

/// Application state shared across handlers. Immutable after startup.
pub struct AppState {
    pub config: ServerConfig,
    pub generator: Arc<dyn TextGenerator>,
    pub scene: Scene,
    pub clock: AnimationClock,
}

impl AppState {
    pub fn new(config: ServerConfig, generator: Arc<dyn TextGenerator>, scene: Scene) -> Self {
        Self {
            config,
            generator,
            scene,
            clock: AnimationClock::start(),
        }
    }
}

type SharedState = Arc<AppState>;

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/api/ask", post(ask).fallback(method_not_allowed))
        .route("/api/bodies", get(list_bodies))
        .route("/api/bodies/:id", get(body_card))
        .route("/scene.svg", get(scene_svg))
        .route("/health", get(health))
        .with_state(state)
}

// ============================================================================
// Q&A proxy
// ============================================================================

/// Accepts anything JSON-shaped; validation happens in the handler so a bad
/// field yields our own 400 rather than an extractor rejection.
#[derive(Debug, Default, Deserialize)]
struct AskRequest {
    #[serde(default)]
    prompt: Option<Value>,
    #[serde(default)]
    model: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AskResponse {
    pub text: String,
}

async fn ask(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<AskResponse>, AskError> {
    let request: AskRequest =
        serde_json::from_slice(&body).map_err(|_| AskError::InvalidPrompt)?;

    let prompt = request
        .prompt
        .as_ref()
        .and_then(Value::as_str)
        .filter(|p| !p.is_empty())
        .ok_or(AskError::InvalidPrompt)?;

    let api_key = state
        .config
        .api_key
        .as_deref()
        .ok_or(AskError::MissingCredential)?;

    let model = request
        .model
        .as_ref()
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .unwrap_or(&state.config.default_model);

    log::info!("[api/ask] model={model} prompt_chars={}", prompt.chars().count());
    let text = state.generator.generate(api_key, model, prompt).await?;
    Ok(Json(AskResponse { text }))
}

async fn method_not_allowed() -> AskError {
    AskError::MethodNotAllowed
}

// ============================================================================
// Scene
// ============================================================================

#[derive(Debug, Default, Deserialize)]
struct LangQuery {
    lang: Option<String>,
}

fn language(code: Option<&str>) -> Language {
    code.and_then(Language::from_code).unwrap_or_default()
}

async fn list_bodies(State(state): State<SharedState>) -> Json<Catalog> {
    Json(state.scene.catalog().clone())
}

async fn body_card(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Query(query): Query<LangQuery>,
) -> Result<Json<InfoCard>, StatusCode> {
    let body = state.scene.catalog().get(&id).ok_or(StatusCode::NOT_FOUND)?;
    let photo = state.scene.assets().photo_uri(&id);
    Ok(Json(InfoCard::new(body, language(query.lang.as_deref()), photo)))
}

#[derive(Debug, Default, Deserialize)]
struct SceneQuery {
    /// Seconds; defaults to time since the server started.
    t: Option<f64>,
    selected: Option<String>,
    hovered: Option<String>,
    lang: Option<String>,
}

async fn scene_svg(
    State(state): State<SharedState>,
    Query(query): Query<SceneQuery>,
) -> impl IntoResponse {
    let catalog = state.scene.catalog();
    let known = |id: Option<String>| id.filter(|id| catalog.contains(id));
    let t = query
        .t
        .filter(|t| t.is_finite())
        .unwrap_or_else(|| state.clock.elapsed());
    let view = ViewState {
        selected: known(query.selected),
        hovered: known(query.hovered),
        language: language(query.lang.as_deref()),
    };
    (
        [(header::CONTENT_TYPE, "image/svg+xml")],
        render_svg(&state.scene, t, &view),
    )
}

async fn health(State(state): State<SharedState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "bodies": state.scene.catalog().len(),
        "credential": state.config.api_key.is_some(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::UpstreamError;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use std::sync::Mutex;
    use tower::ServiceExt;

    /// Records calls; `reply: None` simulates an upstream failure.
    struct MockGenerator {
        reply: Option<String>,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl MockGenerator {
        fn new(reply: Option<&str>) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.map(str::to_string),
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for MockGenerator {
        async fn generate(
            &self,
            _api_key: &str,
            model: &str,
            prompt: &str,
        ) -> Result<String, UpstreamError> {
            self.calls
                .lock()
                .unwrap()
                .push((model.to_string(), prompt.to_string()));
            match &self.reply {
                Some(text) => Ok(text.clone()),
                None => Err(UpstreamError::Status {
                    status: 503,
                    body: "overloaded".to_string(),
                }),
            }
        }
    }

    fn app(key: Option<&str>, generator: Arc<MockGenerator>) -> Router {
        let mut config = ServerConfig::default();
        config.api_key = key.map(str::to_string);
        router(Arc::new(AppState::new(config, generator, Scene::solar_system())))
    }

    async fn call(app: Router, method: &str, uri: &str, body: &str) -> (StatusCode, Vec<u8>) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    fn json_body(bytes: &[u8]) -> Value {
        serde_json::from_slice(bytes).unwrap()
    }

    #[tokio::test]
    async fn ask_returns_generated_text() {
        let generator = MockGenerator::new(Some("Because of Rayleigh scattering."));
        let app = app(Some("key"), generator.clone());
        let (status, body) = call(app, "POST", "/api/ask", r#"{"prompt":"Why blue?"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_body(&body), json!({ "text": "Because of Rayleigh scattering." }));
        let calls = generator.calls.lock().unwrap();
        assert_eq!(calls.as_slice(), &[("gemini-2.5-flash".to_string(), "Why blue?".to_string())]);
    }

    #[tokio::test]
    async fn ask_passes_requested_model() {
        let generator = MockGenerator::new(Some(""));
        let app = app(Some("key"), generator.clone());
        let (status, body) = call(
            app,
            "POST",
            "/api/ask",
            r#"{"prompt":"hi","model":"gemini-2.5-pro"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_body(&body), json!({ "text": "" }));
        assert_eq!(generator.calls.lock().unwrap()[0].0, "gemini-2.5-pro");
    }

    #[tokio::test]
    async fn ask_rejects_other_methods() {
        for method in ["GET", "PUT", "DELETE"] {
            let app = app(Some("key"), MockGenerator::new(Some("x")));
            let (status, body) = call(app, method, "/api/ask", "").await;
            assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{method}");
            assert_eq!(json_body(&body), json!({ "error": "Method Not Allowed" }));
        }
    }

    #[tokio::test]
    async fn ask_rejects_bad_prompts() {
        for body in ["", "not json", "{}", r#"{"prompt":""}"#, r#"{"prompt":42}"#, "[]"] {
            let generator = MockGenerator::new(Some("x"));
            let app = app(Some("key"), generator.clone());
            let (status, resp) = call(app, "POST", "/api/ask", body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body {body:?}");
            assert_eq!(json_body(&resp), json!({ "error": "Missing or invalid 'prompt'" }));
            assert!(generator.calls.lock().unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn ask_without_credential_is_configuration_error() {
        let generator = MockGenerator::new(Some("x"));
        let app = app(None, generator.clone());
        let (status, body) = call(app, "POST", "/api/ask", r#"{"prompt":"hi"}"#).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(&body),
            json!({ "error": "Server configuration error: GEMINI_API_KEY not set" })
        );
        assert!(generator.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn upstream_failure_is_generic() {
        let app = app(Some("key"), MockGenerator::new(None));
        let (status, body) = call(app, "POST", "/api/ask", r#"{"prompt":"hi"}"#).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(&body), json!({ "error": "AI service unavailable" }));
        assert!(!String::from_utf8_lossy(&body).contains("overloaded"));
    }

    #[tokio::test]
    async fn bodies_lists_catalog() {
        let app = app(None, MockGenerator::new(None));
        let (status, body) = call(app, "GET", "/api/bodies", "").await;
        assert_eq!(status, StatusCode::OK);
        let catalog: Catalog = serde_json::from_slice(&body).unwrap();
        assert_eq!(catalog.len(), 9);
        assert_eq!(catalog.star.id, "sun");
    }

    #[tokio::test]
    async fn body_card_is_localized_or_404() {
        let (status, body) =
            call(app(None, MockGenerator::new(None)), "GET", "/api/bodies/mars?lang=en", "").await;
        assert_eq!(status, StatusCode::OK);
        let card = json_body(&body);
        assert_eq!(card["name"], "Mars");
        assert_eq!(card["type"], "Terrestrial");

        let (status, _) =
            call(app(None, MockGenerator::new(None)), "GET", "/api/bodies/vulcan", "").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn scene_snapshot_is_svg() {
        let app = app(None, MockGenerator::new(None));
        let request = Request::builder()
            .uri("/scene.svg?t=12.5&selected=earth&lang=en")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "image/svg+xml"
        );
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let svg = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(svg.contains("viewBox=\"-650 -650 1300 1300\""));
        assert!(svg.contains("class=\"selection\""));
        assert!(svg.contains("SUN"));
    }

    #[tokio::test]
    async fn health_reports_credential_presence() {
        let (status, body) = call(app(Some("k"), MockGenerator::new(None)), "GET", "/health", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_body(&body)["credential"], true);
    }
}
