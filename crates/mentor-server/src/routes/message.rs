use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use chrono::{DateTime, Utc};
use mentor::models::agent::AgentKind;
use mentor::models::message::ChatMessage;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{error, info};
use uuid::Uuid;

const MAX_MESSAGE_LENGTH: usize = 2000;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChatRequest {
    message: String,
    #[serde(default)]
    session_id: Option<String>,
    #[serde(default)]
    context: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChatResponse {
    message: String,
    agent: AgentKind,
    timestamp: DateTime<Utc>,
    session_id: String,
    tools_used: Vec<String>,
    analysis: String,
    specialist_response: String,
    tool_results: HashMap<String, Value>,
    formatted_equations: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    error: bool,
    message: String,
    session_id: String,
    timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    fn new(message: String, session_id: String) -> Self {
        Self {
            error: true,
            message,
            session_id,
            timestamp: Utc::now(),
        }
    }
}

async fn send_message(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> impl IntoResponse {
    let session_id = request
        .session_id
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    // Validation happens before the orchestrator is involved; the
    // limit is in characters, not bytes
    if request.message.is_empty() || request.message.chars().count() > MAX_MESSAGE_LENGTH {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(
                format!(
                    "message must be between 1 and {} characters",
                    MAX_MESSAGE_LENGTH
                ),
                session_id,
            )),
        )
            .into_response();
    }

    info!("Chat request from session {}: {:.100}...", session_id, request.message);

    match state
        .orchestrator
        .route_message(&request.message, &request.context)
        .await
    {
        Ok(response) => {
            info!("Response generated by {} agent", response.agent);
            (
                StatusCode::OK,
                Json(ChatResponse {
                    message: response.content,
                    agent: response.agent,
                    timestamp: Utc::now(),
                    session_id,
                    tools_used: response.tools_used,
                    analysis: response.analysis,
                    specialist_response: response.specialist_response,
                    tool_results: response.tool_results,
                    formatted_equations: response.formatted_equations,
                }),
            )
                .into_response()
        }
        Err(err) => {
            error!("Error processing message: {:#}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(
                    format!("Error processing message: {:#}", err),
                    session_id,
                )),
            )
                .into_response()
        }
    }
}

// Configure routes for this module
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/chat/message", post(send_message))
        .with_state(state)
}
