use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use mentor::models::response::AgentInfo;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct AgentsResponse {
    agents: Vec<AgentInfo>,
}

async fn list_agents(State(state): State<AppState>) -> Json<AgentsResponse> {
    Json(AgentsResponse {
        agents: state.orchestrator.agent_info(),
    })
}

// Configure routes for this module
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/chat/agents", get(list_agents))
        .with_state(state)
}
