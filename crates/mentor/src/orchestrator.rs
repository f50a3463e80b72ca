use anyhow::Result;
use indoc::formatdoc;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use crate::agents::{self, Responder};
use crate::models::agent::AgentKind;
use crate::models::message::ChatMessage;
use crate::models::response::{AgentInfo, AgentResponse};
use crate::providers::base::Provider;
use crate::providers::gemini::GeminiProvider;

lazy_static! {
    static ref AGENT_ROUTING: Regex = Regex::new(r"(?i)AGENT_ROUTING:\s*(TUTOR|MATH|PHYSICS)").unwrap();
    static ref ANALYSIS: Regex = Regex::new(r"(?i)ANALYSIS:\s*(.+)").unwrap();
}

/// Coordinates the three responders: classifies each inbound message,
/// delegates to the matching specialist, and merges tool results and
/// the specialist's text into one reply. Constructed once at process
/// start and immutable thereafter; every LLM call within a request is
/// strictly sequential.
pub struct Orchestrator {
    tutor: Responder,
    math: Responder,
    physics: Responder,
}

impl Orchestrator {
    /// Build the three responders over a shared provider
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self {
            tutor: agents::tutor::new(provider.clone()),
            math: agents::math::new(provider.clone()),
            physics: agents::physics::new(provider),
        }
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self::new(Arc::new(GeminiProvider::from_env()?)))
    }

    fn responder(&self, kind: AgentKind) -> &Responder {
        match kind {
            AgentKind::Tutor => &self.tutor,
            AgentKind::Math => &self.math,
            AgentKind::Physics => &self.physics,
        }
    }

    /// Route a message to the best responder and return the combined
    /// result. Performs two LLM calls for general questions and three
    /// for specialist-routed ones (classification, specialist analysis,
    /// final synthesis); any failure aborts the whole operation.
    pub async fn route_message(
        &self,
        message: &str,
        context: &[ChatMessage],
    ) -> Result<AgentResponse> {
        info!("Routing message: {:.50}...", message);

        let routing_prompt = formatdoc! {"
            You are the coordinator for a multi-agent AI tutoring system. Your task is to analyze the user's question and determine which agent should handle it.

            Available agents:
            1. Tutor Agent: General educational questions, coordination, and non-specialized topics
            2. Math Agent: Mathematics, calculations, equations, algebra, geometry, calculus, statistics
            3. Physics Agent: Physics concepts, forces, energy, motion, constants, laws of physics

            Analyze the following question and respond in this exact format:

            AGENT_ROUTING: [agent_name] (must be one of: TUTOR, MATH, or PHYSICS)
            ANALYSIS: [brief 1-2 sentence analysis of why this agent is appropriate]

            User Question: {message}",
            message = message,
        };

        let routing_text = self.tutor.generate(&routing_prompt).await?;

        // Unrecognized or absent routing lines fall back to the tutor
        let target = AGENT_ROUTING
            .captures(&routing_text)
            .and_then(|captures| captures.get(1))
            .map(|m| match m.as_str().to_uppercase().as_str() {
                "MATH" => AgentKind::Math,
                "PHYSICS" => AgentKind::Physics,
                _ => AgentKind::Tutor,
            })
            .unwrap_or(AgentKind::Tutor);

        let analysis = ANALYSIS
            .captures(&routing_text)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default();

        info!("Selected {} agent based on analysis", target);

        let mut specialist_response = String::new();
        let mut tools_used: Vec<String> = Vec::new();
        let mut tool_results: HashMap<String, serde_json::Value> = HashMap::new();
        let mut formatted_equations = false;

        if target != AgentKind::Tutor {
            let specialist = self.responder(target);
            info!("Delegating to {}", specialist.name);

            // The routing model and the keyword triggers are independent
            // decisions; when the triggers find nothing, the specialist
            // still answers but its tool results are not recorded.
            let expects_tools = specialist.expects_tools(message);
            let response = specialist.process_message(message, context).await?;
            specialist_response = format!("{}: {}", specialist.name, response.content);
            if expects_tools {
                tools_used = response.tools_used;
                tool_results = response.tool_results;
            }
            formatted_equations = true;
        }

        let final_prompt = if specialist_response.is_empty() {
            message.to_string()
        } else {
            format!(
                "Question: {}\n\nProblem Analysis: {}\n\nSpecialist Response: {}",
                message, analysis, specialist_response
            )
        };

        let final_response = self
            .responder(target)
            .process_message(&final_prompt, context)
            .await?;

        for name in &final_response.tools_used {
            if !tools_used.contains(name) {
                tools_used.push(name.clone());
            }
        }

        let mut content = final_response.content;
        if !tools_used.is_empty() && !content.contains("Tools Used:") {
            content.push_str(&format!("\n\nTools Used: {}", tools_used.join(", ")));
        }

        Ok(AgentResponse {
            content,
            agent: target,
            tools_used,
            confidence: final_response.confidence,
            analysis,
            specialist_response,
            tool_results,
            formatted_equations,
        })
    }

    /// Static listing of the responders for discovery/display
    pub fn agent_info(&self) -> Vec<AgentInfo> {
        [&self.math, &self.physics, &self.tutor]
            .iter()
            .map(|responder| AgentInfo {
                id: responder.kind,
                name: responder.name.clone(),
                description: responder.description.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::base::Usage;
    use crate::providers::mock::MockProvider;
    use anyhow::anyhow;
    use async_trait::async_trait;

    struct FailingProvider;

    #[async_trait]
    impl Provider for FailingProvider {
        async fn generate(&self, _prompt: &str) -> Result<(String, Usage)> {
            Err(anyhow!("quota exceeded"))
        }
    }

    fn orchestrator(responses: Vec<&str>) -> Orchestrator {
        Orchestrator::new(Arc::new(MockProvider::new(responses)))
    }

    #[tokio::test]
    async fn test_math_question_runs_calculator() -> Result<()> {
        let orchestrator = orchestrator(vec![
            "AGENT_ROUTING: MATH\nANALYSIS: This is an arithmetic question.",
            "Math Agent: 15 + 27 = 42",
            "Math Agent: The answer is 42.",
        ]);

        let response = orchestrator.route_message("Calculate 15 + 27", &[]).await?;

        assert_eq!(response.agent, AgentKind::Math);
        assert!(response.tools_used.contains(&"calculator".to_string()));
        assert_eq!(
            response.tool_results["calculator"]["result"].as_f64(),
            Some(42.0)
        );
        assert_eq!(response.analysis, "This is an arithmetic question.");
        assert!(response
            .specialist_response
            .starts_with("Math Agent: Math Agent: 15 + 27 = 42"));
        assert!(response.formatted_equations);
        assert!(response.content.contains("Tools Used: calculator"));
        Ok(())
    }

    #[tokio::test]
    async fn test_physics_question_looks_up_constant() -> Result<()> {
        let orchestrator = orchestrator(vec![
            "AGENT_ROUTING: PHYSICS\nANALYSIS: The user asks for a physical constant.",
            "Physics Agent: G is 6.674e-11.",
            "Physics Agent: The gravitational constant G is 6.674e-11 m³/(kg⋅s²).",
        ]);

        let response = orchestrator
            .route_message("What is the gravitational constant?", &[])
            .await?;

        assert_eq!(response.agent, AgentKind::Physics);
        assert!(response.tools_used.contains(&"physicsConstants".to_string()));
        let value = response.tool_results["physicsConstants"]["value"]
            .as_f64()
            .unwrap();
        assert!((value - 6.67430e-11).abs() < 1e-16);
        Ok(())
    }

    #[tokio::test]
    async fn test_general_question_goes_to_tutor() -> Result<()> {
        let orchestrator = orchestrator(vec![
            "AGENT_ROUTING: TUTOR\nANALYSIS: General capability question.",
            "AI Tutor: I can help you with math and physics questions.",
        ]);

        let response = orchestrator
            .route_message("Tell me about your capabilities", &[])
            .await?;

        assert_eq!(response.agent, AgentKind::Tutor);
        assert!(response.tools_used.is_empty());
        assert!(response.tool_results.is_empty());
        assert!(response.specialist_response.is_empty());
        assert!(!response.formatted_equations);
        assert!(!response.content.contains("Tools Used:"));
        Ok(())
    }

    #[tokio::test]
    async fn test_unparseable_routing_defaults_to_tutor() -> Result<()> {
        let orchestrator = orchestrator(vec![
            "I am not sure which agent fits here.",
            "AI Tutor: Let me help with that.",
        ]);

        let response = orchestrator.route_message("hello", &[]).await?;

        assert_eq!(response.agent, AgentKind::Tutor);
        assert_eq!(response.analysis, "");
        Ok(())
    }

    #[tokio::test]
    async fn test_specialist_without_tool_trigger_keeps_results_empty() -> Result<()> {
        // The router picks math, but no math tool trigger matches, so
        // tool results from the specialist pass are not recorded.
        let orchestrator = orchestrator(vec![
            "AGENT_ROUTING: MATH\nANALYSIS: A conceptual math question.",
            "Math Agent: A derivative measures the rate of change.",
            "Math Agent: Think of it as instantaneous slope.",
        ]);

        let response = orchestrator
            .route_message("Explain what a derivative is, intuitively", &[])
            .await?;

        assert_eq!(response.agent, AgentKind::Math);
        assert!(response.tool_results.is_empty());
        assert!(!response.specialist_response.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_tool_names_are_merged() -> Result<()> {
        // Calculator runs in both the specialist and the final pass;
        // the merged list names it once.
        let orchestrator = orchestrator(vec![
            "AGENT_ROUTING: MATH\nANALYSIS: Arithmetic.",
            "Math Agent: 4",
            "Math Agent: 2 + 2 = 4",
        ]);

        let response = orchestrator.route_message("Calculate 2+2", &[]).await?;

        let calculator_count = response
            .tools_used
            .iter()
            .filter(|name| name.as_str() == "calculator")
            .count();
        assert_eq!(calculator_count, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_existing_tools_line_is_not_duplicated() -> Result<()> {
        let orchestrator = orchestrator(vec![
            "AGENT_ROUTING: MATH\nANALYSIS: Arithmetic.",
            "Math Agent: 4",
            "Math Agent: 2 + 2 = 4\n\nTools Used: calculator",
        ]);

        let response = orchestrator.route_message("Calculate 2+2", &[]).await?;

        assert_eq!(response.content.matches("Tools Used:").count(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_provider_failure_aborts_routing() {
        let orchestrator = Orchestrator::new(Arc::new(FailingProvider));

        let err = orchestrator.route_message("hello", &[]).await.unwrap_err();
        assert!(err.to_string().contains("AI Tutor failed to generate content"));
        assert!(format!("{:#}", err).contains("quota exceeded"));
    }

    #[test]
    fn test_agent_info_lists_all_responders() {
        let orchestrator = orchestrator(vec![]);
        let info = orchestrator.agent_info();

        assert_eq!(info.len(), 3);
        assert_eq!(info[0].id, AgentKind::Math);
        assert_eq!(info[1].id, AgentKind::Physics);
        assert_eq!(info[2].id, AgentKind::Tutor);
        assert_eq!(info[2].name, "AI Tutor");
    }
}
