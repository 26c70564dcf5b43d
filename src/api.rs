//! REST API Server for the budget advisor
//!
//! Exposes the intake pipeline and the chat controller over HTTP
//! for the student-facing frontend

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use uuid::Uuid;

use crate::chat::{ChatSession, ChatSessionController, CHAT_DISCLAIMER, WELCOME_MESSAGE};
use crate::client::AdvisoryTransport;
use crate::error::ChatError;
use crate::intake::IntakeForm;
use crate::models::FinancialProfile;
use crate::pipeline::BudgetAdvisor;

/// =============================
/// Request Models
/// =============================

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub session_id: Option<String>,
    pub message: String,
}

/// =============================
/// Response Wrapper
/// =============================

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub data: Option<serde_json::Value>,
    pub error: Option<String>,
    pub timestamp: String,
}

impl ApiResponse {
    pub fn success<T: Serialize>(data: T) -> Self {
        Self {
            success: true,
            data: serde_json::to_value(data).ok(),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Error envelope that still carries a payload
    pub fn error_with<T: Serialize>(message: String, data: T) -> Self {
        Self {
            data: serde_json::to_value(data).ok(),
            ..Self::error(message)
        }
    }
}

/// =============================
/// API State
/// =============================

#[derive(Clone)]
pub struct ApiState {
    pub advisor: Arc<BudgetAdvisor>,
    pub chat: Arc<ChatSessionController>,
    /// In-memory only; sessions live as long as the process.
    pub sessions: Arc<RwLock<HashMap<Uuid, Arc<ChatSession>>>>,
}

impl ApiState {
    pub fn new(transport: Arc<dyn AdvisoryTransport>) -> Self {
        Self {
            advisor: Arc::new(BudgetAdvisor::new(transport.clone())),
            chat: Arc::new(ChatSessionController::new(transport)),
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    async fn session(&self, session_id: Uuid) -> Arc<ChatSession> {
        {
            let sessions = self.sessions.read().await;
            if let Some(session) = sessions.get(&session_id) {
                return session.clone();
            }
        }

        let mut sessions = self.sessions.write().await;
        sessions
            .entry(session_id)
            .or_insert_with(|| Arc::new(ChatSession::with_id(session_id)))
            .clone()
    }
}

/// =============================
/// Session Ids
/// =============================

fn stable_uuid_from_string(input: &str) -> Uuid {
    use sha2::{Digest, Sha256};

    let hash = Sha256::digest(input.as_bytes());
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&hash[..16]);

    // Set UUID version (4) and variant (RFC4122) bits.
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    Uuid::from_bytes(bytes)
}

/// Real UUIDs pass through; any other text maps to the same UUID every time.
fn parse_session_id(value: &str) -> Uuid {
    Uuid::parse_str(value.trim()).unwrap_or_else(|_| stable_uuid_from_string(value.trim()))
}

/// =============================
/// Health Endpoint
/// =============================

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// =============================
/// Intake Analysis Endpoint
/// =============================

async fn analyze(
    State(state): State<ApiState>,
    Json(form): Json<IntakeForm>,
) -> (StatusCode, Json<ApiResponse>) {
    let profile = match FinancialProfile::try_from(form) {
        Ok(profile) => profile,
        Err(e) => {
            info!(errors = e.errors.len(), "Rejected intake form");
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error_with(e.to_string(), &e.errors)),
            );
        }
    };

    let report = state.advisor.analyze(&profile).await;
    (StatusCode::OK, Json(ApiResponse::success(report)))
}

/// =============================
/// Chat Endpoints
/// =============================

async fn create_session(State(state): State<ApiState>) -> (StatusCode, Json<ApiResponse>) {
    let session = state.session(Uuid::new_v4()).await;
    info!(session_id = %session.session_id, "Chat session created");

    (
        StatusCode::CREATED,
        Json(ApiResponse::success(serde_json::json!({
            "session_id": session.session_id,
            "welcome": WELCOME_MESSAGE,
            "disclaimer": CHAT_DISCLAIMER,
        }))),
    )
}

async fn get_transcript(
    State(state): State<ApiState>,
    Path(session_id): Path<String>,
) -> (StatusCode, Json<ApiResponse>) {
    let session_id = parse_session_id(&session_id);
    let session = {
        let sessions = state.sessions.read().await;
        sessions.get(&session_id).cloned()
    };

    match session {
        Some(session) => (
            StatusCode::OK,
            Json(ApiResponse::success(serde_json::json!({
                "session_id": session.session_id,
                "turns": session.transcript().await,
            }))),
        ),
        None => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Unknown chat session".into())),
        ),
    }
}

/// Sessions are only kept for requests that name one; an id-less request
/// gets a one-off session that is never stored.
async fn chat_handler(
    State(state): State<ApiState>,
    Json(req): Json<ChatRequest>,
) -> (StatusCode, Json<ApiResponse>) {
    let session_id = req
        .session_id
        .as_deref()
        .filter(|value| !value.trim().is_empty())
        .map(parse_session_id);

    if req.message.trim().is_empty() {
        return chat_error(session_id, ChatError::EmptyMessage);
    }

    let session = match session_id {
        Some(session_id) => state.session(session_id).await,
        None => Arc::new(ChatSession::new()),
    };

    match state.chat.send(&session, &req.message).await {
        Ok(turn) => (
            StatusCode::OK,
            Json(ApiResponse::success(serde_json::json!({
                "session_id": session.session_id,
                "answer": turn.content,
                "id": turn.reply_id,
            }))),
        ),
        Err(e) => chat_error(Some(session.session_id), e),
    }
}

fn chat_error(session_id: Option<Uuid>, e: ChatError) -> (StatusCode, Json<ApiResponse>) {
    let status = match e {
        ChatError::RequestInFlight => StatusCode::CONFLICT,
        _ if e.is_rejection() => StatusCode::BAD_REQUEST,
        _ => StatusCode::BAD_GATEWAY,
    };

    (
        status,
        Json(ApiResponse::error_with(
            e.user_message(),
            serde_json::json!({
                "session_id": session_id,
                "kind": e.kind(),
            }),
        )),
    )
}

/// =============================
/// Router
/// =============================

pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/analyze", post(analyze))
        .route("/api/chat", post(chat_handler))
        .route("/api/chat/sessions", post(create_session))
        .route("/api/chat/sessions/:session_id", get(get_transcript))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// =============================
/// Server Startup
/// =============================

pub async fn start_server(state: ApiState, port: u16) -> crate::Result<()> {
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!("API Server listening on http://0.0.0.0:{}", port);
    info!("Local: http://127.0.0.1:{}", port);

    axum::serve(listener, router).await?;

    Ok(())
}
