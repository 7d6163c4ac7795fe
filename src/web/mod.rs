//! Browser UI: one form, one submit endpoint.
//!
//! Each `POST /analyze` is handled independently; the only shared state is the read-only
//! [`AppState`]. The browser waits on the POST while the model call is in flight and gets
//! back the same page with the preview and the result or error filled in.

pub mod page;
pub mod submit;

use crate::config::AppConfig;
use crate::image::UploadedFile;
use crate::llm::gateways::{GeminiConfig, GeminiGateway};
use crate::llm::{AnalysisBroker, LlmGateway};
use axum::extract::multipart::MultipartError;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::response::Html;
use axum::routing::{get, post};
use axum::Router;
use page::PageView;
use std::sync::Arc;
use submit::SubmitForm;
use tower_http::trace::TraceLayer;
use tracing::debug;

pub const IMAGE_FIELD: &str = "image";
pub const USER_INPUT_FIELD: &str = "user_input";

/// Shared, read-only application state
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// `None` while no API key is configured
    pub broker: Option<Arc<AnalysisBroker>>,
}

impl AppState {
    /// Build the state with the real Gemini gateway when a key is configured
    pub fn from_config(config: AppConfig) -> Self {
        match GeminiConfig::from_app_config(&config) {
            Some(gemini) => Self::with_gateway(config, Arc::new(GeminiGateway::with_config(gemini))),
            None => Self {
                config: Arc::new(config),
                broker: None,
            },
        }
    }

    /// Build the state around any gateway. The broker is only created when the
    /// configuration carries an API key.
    pub fn with_gateway(config: AppConfig, gateway: Arc<dyn LlmGateway>) -> Self {
        let broker = config
            .has_api_key()
            .then(|| Arc::new(AnalysisBroker::new(config.model.clone(), gateway)));

        Self {
            config: Arc::new(config),
            broker,
        }
    }
}

/// Create the router for the UI
pub fn create_app(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(index))
        .route("/analyze", post(analyze))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(page::render(&PageView {
        warning: state.config.missing_key_warning(),
        ..Default::default()
    }))
}

async fn analyze(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Html<String>, MultipartError> {
    let form = read_form(multipart).await?;
    let user_input = form.user_input.clone();

    let submission = submit::submit(&state, form).await;

    Ok(Html(page::render(&PageView {
        warning: state.config.missing_key_warning(),
        user_input: &user_input,
        preview: submission.preview.as_deref(),
        outcome: Some(&submission.outcome),
    })))
}

async fn health() -> &'static str {
    "ok"
}

// Collect the form fields; unknown fields are skipped
async fn read_form(mut multipart: Multipart) -> Result<SubmitForm, MultipartError> {
    let mut form = SubmitForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(IMAGE_FIELD) => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;

                debug!("Received upload {:?} ({} bytes)", file_name, bytes.len());

                // browsers send an empty part when no file was chosen
                if !(file_name.is_empty() && bytes.is_empty()) {
                    form.upload = Some(UploadedFile::new(file_name, content_type, bytes.to_vec()));
                }
            }
            Some(USER_INPUT_FIELD) => {
                form.user_input = field.text().await?;
            }
            _ => {}
        }
    }

    Ok(form)
}
