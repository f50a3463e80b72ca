use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use super::agent::AgentKind;

/// The combined result of routing a message through the system.
/// Produced fresh per request; `agent` names the responder that wrote
/// the final content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentResponse {
    pub content: String,
    pub agent: AgentKind,
    pub tools_used: Vec<String>,
    /// Heuristic score in [0, 1], not a calibrated probability
    pub confidence: f32,
    #[serde(default)]
    pub analysis: String,
    #[serde(default)]
    pub specialist_response: String,
    #[serde(default)]
    pub tool_results: HashMap<String, Value>,
    #[serde(default)]
    pub formatted_equations: bool,
}

/// Static description of a responder, for discovery endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentInfo {
    pub id: AgentKind,
    pub name: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_camel_case() {
        let response = AgentResponse {
            content: "Math Agent: 4".to_string(),
            agent: AgentKind::Math,
            tools_used: vec!["calculator".to_string()],
            confidence: 0.5,
            analysis: String::new(),
            specialist_response: String::new(),
            tool_results: HashMap::new(),
            formatted_equations: true,
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["toolsUsed"][0], "calculator");
        assert_eq!(value["formattedEquations"], true);
        assert_eq!(value["agent"], "math");
    }
}
