use std::{net::SocketAddr, sync::Arc};

use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    serve, Json, Router,
};
use minijinja::{context, Environment};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::analysis::{PraiseEmpathyResult, ToneAnalysisResult};
use crate::assistant::Assistant;
use crate::client::CompletionClient;
use crate::config::SETUP_INSTRUCTIONS;
use crate::constants::{PRAISE_EXAMPLE, TONE_EXAMPLE};
use crate::error::AppError;
use crate::session::{ConversationTurn, SessionState};

const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");

// Shared application state. One process-wide session: the app is single-user.
struct AppState<C> {
    assistant: Arc<Assistant<C>>,
    session: Arc<Mutex<SessionState>>,
    templates: Arc<Environment<'static>>,
}

impl<C> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            assistant: self.assistant.clone(),
            session: self.session.clone(),
            templates: self.templates.clone(),
        }
    }
}

fn create_minijinja_env() -> Result<Environment<'static>> {
    let mut env = Environment::new();
    env.add_template("index.html", INDEX_TEMPLATE)
        .context("Failed to load index template")?;
    Ok(env)
}

#[derive(Deserialize)]
pub struct TextRequest {
    pub text: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ChatReply {
    pub reply: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct Status {
    pub configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setup_instructions: Option<String>,
}

/// Request failure rendered as a JSON body with a matching HTTP status.
pub struct ApiError(AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AppError::Configuration(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Service(_) => StatusCode::BAD_GATEWAY,
            AppError::Extraction(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::EmptyInput => StatusCode::BAD_REQUEST,
        };
        warn!(%status, error = %self.0, "Request failed");

        let mut body = json!({
            "error": self.0.kind(),
            "message": self.0.to_string(),
        });
        if let Some(working_text) = self.0.working_text() {
            body["working_text"] = json!(working_text);
        }
        if matches!(self.0, AppError::Configuration(_)) {
            body["setup_instructions"] = json!(SETUP_INSTRUCTIONS);
        }
        (status, Json(body)).into_response()
    }
}

async fn index_handler<C: CompletionClient + 'static>(
    State(state): State<AppState<C>>,
) -> Result<Html<String>, Html<String>> {
    state
        .templates
        .get_template("index.html")
        .and_then(|tmpl| {
            tmpl.render(context! {
                configured => state.assistant.is_configured(),
                setup_instructions => SETUP_INSTRUCTIONS,
                tone_example => TONE_EXAMPLE,
                praise_example => PRAISE_EXAMPLE,
            })
        })
        .map(Html)
        .map_err(|e| {
            error!("Failed to get or render template: {}", e);
            Html(format!("Internal Server Error: {}", e))
        })
}

async fn status_handler<C: CompletionClient + 'static>(
    State(state): State<AppState<C>>,
) -> Json<Status> {
    let configured = state.assistant.is_configured();
    Json(Status {
        configured,
        setup_instructions: (!configured).then(|| SETUP_INSTRUCTIONS.to_string()),
    })
}

async fn history_handler<C: CompletionClient + 'static>(
    State(state): State<AppState<C>>,
) -> Json<Vec<ConversationTurn>> {
    let session = state.session.lock().await;
    Json(session.history().to_vec())
}

async fn chat_handler<C: CompletionClient + 'static>(
    State(state): State<AppState<C>>,
    Json(request): Json<TextRequest>,
) -> Result<Json<ChatReply>, ApiError> {
    // Held across the call so turns from overlapping requests never interleave.
    let mut session = state.session.lock().await;
    let reply = state.assistant.send_chat(&mut session, &request.text).await?;
    Ok(Json(ChatReply { reply }))
}

async fn tone_handler<C: CompletionClient + 'static>(
    State(state): State<AppState<C>>,
    Json(request): Json<TextRequest>,
) -> Result<Json<ToneAnalysisResult>, ApiError> {
    let result = state.assistant.run_tone_analysis(&request.text).await?;
    Ok(Json(result))
}

async fn praise_handler<C: CompletionClient + 'static>(
    State(state): State<AppState<C>>,
    Json(request): Json<TextRequest>,
) -> Result<Json<PraiseEmpathyResult>, ApiError> {
    let result = state.assistant.run_praise_generation(&request.text).await?;
    Ok(Json(result))
}

/// Builds the application router around `assistant`.
pub fn router<C: CompletionClient + 'static>(assistant: Assistant<C>) -> Result<Router> {
    let templates = create_minijinja_env().context("Failed to initialize template engine")?;
    let state = AppState {
        assistant: Arc::new(assistant),
        session: Arc::new(Mutex::new(SessionState::new())),
        templates: Arc::new(templates),
    };

    Ok(Router::new()
        .route("/", get(index_handler::<C>))
        .route("/api/status", get(status_handler::<C>))
        .route("/api/history", get(history_handler::<C>))
        .route("/api/chat", post(chat_handler::<C>))
        .route("/api/tone", post(tone_handler::<C>))
        .route("/api/praise", post(praise_handler::<C>))
        .with_state(state)
        .layer(TraceLayer::new_for_http())) // Add request logging
}

pub async fn start_web_server<C: CompletionClient + 'static>(
    port: u16,
    assistant: Assistant<C>,
) -> Result<()> {
    if !assistant.is_configured() {
        warn!("No credential configured; the page will show setup instructions");
    }
    let app = router(assistant)?;

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    info!("Web server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context(format!("Failed to bind to address {}", addr))?;

    serve(listener, app.into_make_service())
        .await
        .context("Web server failed")?;

    Ok(())
}
