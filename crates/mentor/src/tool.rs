use serde_json::Value;
use std::fmt::Debug;

use crate::errors::ToolResult;

type Trigger = fn(&str) -> bool;
type Extractor = fn(&str) -> Value;
type Executor = fn(&Value) -> ToolResult<Value>;

/// A stateless deterministic helper a responder can run for a side
/// calculation. The trigger, extractor and executor are plain functions
/// registered at definition time: the trigger decides relevance from
/// the lower-cased message, the extractor pulls a parameter record out
/// of the raw message, and the executor computes the result.
#[derive(Clone)]
pub struct Tool {
    /// The name of the tool; part of the observable wire format
    pub name: String,
    /// A description of what the tool does
    pub description: String,
    /// Parameters that the tool accepts
    pub parameters: Value,
    trigger: Trigger,
    extractor: Extractor,
    executor: Executor,
}

impl Tool {
    pub fn new<N, D>(
        name: N,
        description: D,
        parameters: Value,
        trigger: Trigger,
        extractor: Extractor,
        executor: Executor,
    ) -> Self
    where
        N: Into<String>,
        D: Into<String>,
    {
        Tool {
            name: name.into(),
            description: description.into(),
            parameters,
            trigger,
            extractor,
            executor,
        }
    }

    /// Whether the fixed keyword/regex trigger matches the message
    pub fn is_relevant(&self, message: &str) -> bool {
        (self.trigger)(&message.to_lowercase())
    }

    /// Pull the tool's parameter record out of the raw message
    pub fn extract_parameters(&self, message: &str) -> Value {
        (self.extractor)(message)
    }

    /// Run the tool to completion
    pub fn execute(&self, parameters: &Value) -> ToolResult<Value> {
        (self.executor)(parameters)
    }
}

impl Debug for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("parameters", &self.parameters)
            .finish()
    }
}
