use anyhow::{Context, Result};
use indoc::formatdoc;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info};

pub mod math;
pub mod physics;
pub mod tutor;

use crate::models::agent::AgentKind;
use crate::models::message::ChatMessage;
use crate::models::response::AgentResponse;
use crate::providers::base::Provider;
use crate::tool::Tool;

/// Number of trailing context messages included in a prompt
const CONTEXT_WINDOW: usize = 5;

const MATH_KEYWORDS: &[&str] = &[
    "math",
    "calculate",
    "equation",
    "solve",
    "algebra",
    "geometry",
    "trigonometry",
    "calculus",
    "statistics",
    "probability",
    "number",
    "formula",
    "+",
    "-",
    "*",
    "/",
    "sum",
    "difference",
    "product",
    "quotient",
];

const PHYSICS_KEYWORDS: &[&str] = &[
    "physics",
    "force",
    "energy",
    "motion",
    "velocity",
    "acceleration",
    "newton",
    "gravity",
    "mass",
    "weight",
    "momentum",
    "pressure",
    "temperature",
    "heat",
    "light",
    "wave",
    "frequency",
    "electricity",
    "magnetic",
    "quantum",
    "relativity",
    "constant",
    "speed of light",
];

lazy_static! {
    static ref DIGIT_OPERATION: Regex = Regex::new(r"\d+[+\-*/]\d+").unwrap();
    static ref VARIABLE_ASSIGNMENT: Regex = Regex::new(r"[a-z]\s*=").unwrap();
}

fn matches_math(lower: &str) -> bool {
    MATH_KEYWORDS.iter().any(|k| lower.contains(k))
        || DIGIT_OPERATION.is_match(lower)
        || VARIABLE_ASSIGNMENT.is_match(lower)
}

fn matches_physics(lower: &str) -> bool {
    PHYSICS_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// A responder pairs a fixed instruction template with the tools it may
/// run. The three variants (tutor, math, physics) are constructed once
/// at process start and hold no mutable state across calls.
pub struct Responder {
    pub kind: AgentKind,
    pub name: String,
    pub description: String,
    system_prompt: String,
    tools: Vec<Tool>,
    provider: Arc<dyn Provider>,
}

impl Responder {
    pub fn new<N, D, P>(
        kind: AgentKind,
        name: N,
        description: D,
        system_prompt: P,
        tools: Vec<Tool>,
        provider: Arc<dyn Provider>,
    ) -> Self
    where
        N: Into<String>,
        D: Into<String>,
        P: Into<String>,
    {
        Responder {
            kind,
            name: name.into(),
            description: description.into(),
            system_prompt: system_prompt.into(),
            tools,
            provider,
        }
    }

    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    /// Whether this responder is topically responsible for the message.
    /// The tutor is the fallback: it answers exactly when neither
    /// specialist keyword set matches.
    pub fn can_handle(&self, message: &str) -> bool {
        let lower = message.to_lowercase();
        match self.kind {
            AgentKind::Math => matches_math(&lower),
            AgentKind::Physics => matches_physics(&lower),
            AgentKind::Tutor => !matches_math(&lower) && !matches_physics(&lower),
        }
    }

    /// Whether any declared tool would trigger on the message
    pub fn expects_tools(&self, message: &str) -> bool {
        self.tools.iter().any(|tool| tool.is_relevant(message))
    }

    /// Raw passthrough to the underlying model, without tool use or
    /// conversation context. The orchestrator uses this for routing.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let (text, _) = self
            .provider
            .generate(prompt)
            .await
            .with_context(|| format!("{} failed to generate content", self.name))?;
        Ok(text)
    }

    /// Run the full pipeline for one message: trigger and execute the
    /// relevant tools, build the composite prompt, and call the model.
    /// Tool failures are surfaced inline to the model and never abort
    /// the request; a model failure aborts it.
    pub async fn process_message(
        &self,
        message: &str,
        context: &[ChatMessage],
    ) -> Result<AgentResponse> {
        info!("{} processing message: {:.50}...", self.name, message);

        let mut tools_used: Vec<String> = Vec::new();
        let mut tool_results: HashMap<String, serde_json::Value> = HashMap::new();
        let mut enhanced_message = message.to_string();

        for tool in &self.tools {
            if !tool.is_relevant(message) {
                continue;
            }
            let parameters = tool.extract_parameters(message);
            match tool.execute(&parameters) {
                Ok(result) => {
                    enhanced_message
                        .push_str(&format!("\n\nTool Result ({}): {}", tool.name, result));
                    tools_used.push(tool.name.clone());
                    tool_results.insert(tool.name.clone(), result);
                    info!("Tool {} executed successfully", tool.name);
                }
                Err(tool_error) => {
                    error!("Tool {} execution failed: {}", tool.name, tool_error);
                    enhanced_message
                        .push_str(&format!("\n\nTool Error ({}): {}", tool.name, tool_error));
                }
            }
        }

        let prompt = self.build_prompt(&enhanced_message, context, &tools_used);
        let (content, _) = self
            .provider
            .generate(&prompt)
            .await
            .with_context(|| format!("{} failed to process message", self.name))?;

        info!("{} generated response successfully", self.name);

        let confidence = self.calculate_confidence(message, &content);

        Ok(AgentResponse {
            content,
            agent: self.kind,
            tools_used,
            confidence,
            analysis: String::new(),
            specialist_response: String::new(),
            tool_results,
            formatted_equations: false,
        })
    }

    fn build_prompt(&self, message: &str, context: &[ChatMessage], tools_used: &[String]) -> String {
        let start = context.len().saturating_sub(CONTEXT_WINDOW);
        let context_block = context[start..]
            .iter()
            .map(|m| format!("{}: {}", m.sender, m.content))
            .collect::<Vec<_>>()
            .join("\n");

        let tools_line = if tools_used.is_empty() {
            String::new()
        } else {
            format!(
                "5. Include a section at the end labeled \"Tools Used: {}\" to show which tools were utilized\n",
                tools_used.join(", ")
            )
        };

        formatdoc! {"
            {system_prompt}

            Previous conversation:
            {context_block}

            Current user message: {message}

            IMPORTANT RESPONSE FORMAT INSTRUCTIONS:
            1. Start your response with \"{name}:\" to clearly identify which agent is responding
            2. Provide a helpful, accurate response using your specialized knowledge
            3. Present information in a clear, structured format
            4. If showing calculations or equations, present them step-by-step
            {tools_line}
            Now, provide your response as the {name}:",
            system_prompt = self.system_prompt,
            context_block = context_block,
            message = message,
            name = self.name,
            tools_line = tools_line,
        }
    }

    /// Heuristic response quality score in [0, 1]
    fn calculate_confidence(&self, message: &str, response: &str) -> f32 {
        let lower = message.to_lowercase();
        let mentions_tool = self
            .tools
            .iter()
            .any(|tool| lower.contains(&tool.name.to_lowercase()));

        let base = (response.len() as f32 / 500.0).min(0.8);
        if mentions_tool {
            (base + 0.2).min(0.95)
        } else {
            base
        }
    }
}
