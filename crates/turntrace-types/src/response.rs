//! The turn result handed to the engine by the transport layer.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::schema::ContentBlock;

/// One completed turn as seen by the transport layer.
///
/// `metrics` is the raw cumulative summary reachable from the runtime's
/// result value; `None` means the turn was not instrumented, which is a
/// valid state rather than an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResult {
    pub response: AgentResponse,

    #[serde(default)]
    pub metrics: Option<Value>,
}

impl AgentResult {
    pub fn new(response: AgentResponse, metrics: Option<Value>) -> Self {
        Self { response, metrics }
    }
}

/// Response payload in the formats the runtime produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AgentResponse {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

impl AgentResponse {
    /// Flatten the response into display text.
    ///
    /// Block lists are joined with spaces; unrecognized blocks fall back to
    /// their serialized form so no content silently disappears.
    pub fn display_text(&self) -> String {
        match self {
            AgentResponse::Text(text) => text.clone(),
            AgentResponse::Blocks(blocks) => {
                let parts: Vec<String> = blocks
                    .iter()
                    .map(|block| match block {
                        ContentBlock::Text { text } => text.clone(),
                        other => serde_json::to_string(other).unwrap_or_default(),
                    })
                    .collect();
                parts.join(" ")
            }
        }
    }
}

impl fmt::Display for AgentResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_text())
    }
}

impl From<&str> for AgentResponse {
    fn from(text: &str) -> Self {
        AgentResponse::Text(text.to_string())
    }
}

impl From<String> for AgentResponse {
    fn from(text: String) -> Self {
        AgentResponse::Text(text)
    }
}
