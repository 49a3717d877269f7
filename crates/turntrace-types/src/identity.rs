//! Agent identity and display-name probing.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Model id reported when no descriptor is bound to the agent.
pub const DEFAULT_MODEL_ID: &str = "us.anthropic.claude-3-7-sonnet-20250219-v1:0";

/// Agent name reported when the handle carries none.
pub const DEFAULT_AGENT_NAME: &str = "Strands Agent";

/// Telemetry system identifier for downstream semantic-convention mapping.
pub const AGENT_SYSTEM: &str = "strands-agents";

/// Opaque, stable handle distinguishing one long-lived agent instance.
///
/// Minted once per [`AgentHandle`] and used purely as a lookup key. Two
/// handles are the same agent only if they share the same id; field equality
/// on name or model never makes them equal. The snapshot store keeps only
/// this Copy token, so tracking an agent never extends its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentId(Uuid);

impl AgentId {
    pub fn new() -> Self {
        AgentId(Uuid::new_v4())
    }
}

impl Default for AgentId {
    fn default() -> Self {
        Self::new()
    }
}

/// What the engine knows about the agent instance that produced a turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentHandle {
    id: AgentId,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub model: Option<ModelDescriptor>,
}

impl AgentHandle {
    pub fn new() -> Self {
        Self {
            id: AgentId::new(),
            name: None,
            model: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_model(mut self, model: ModelDescriptor) -> Self {
        self.model = Some(model);
        self
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| DEFAULT_AGENT_NAME.to_string())
    }
}

impl Default for AgentHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Identifier fields a runtime model object may expose.
///
/// Provider implementations do not agree on a single field, so the display
/// name is resolved through a fixed, ordered probe table rather than any one
/// canonical field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Canonical identifier (`model_id`).
    #[serde(default)]
    pub model_id: Option<String>,

    /// First fallback (`model`).
    #[serde(default)]
    pub model: Option<String>,

    /// Second fallback (`model_name`).
    #[serde(default)]
    pub model_name: Option<String>,

    /// Last-resort private identifier (`_model_id`).
    #[serde(default)]
    pub raw_model_id: Option<String>,

    /// Declared provider type name (e.g. "BedrockModel"), probed only when
    /// no identifier field is set.
    #[serde(default)]
    pub provider: Option<String>,
}

impl ModelDescriptor {
    pub fn from_id(model_id: impl Into<String>) -> Self {
        Self {
            model_id: Some(model_id.into()),
            ..Default::default()
        }
    }

    /// Resolve the display name through the probe table.
    pub fn display_name(&self) -> String {
        if let Some(id) = self
            .model_id
            .as_ref()
            .or(self.model.as_ref())
            .or(self.model_name.as_ref())
            .or(self.raw_model_id.as_ref())
        {
            return id.clone();
        }

        match &self.provider {
            Some(p) if p.contains("Bedrock") => "BedrockModel".to_string(),
            Some(p) if p.contains("Anthropic") => "AnthropicModel".to_string(),
            Some(p) if p.contains("OpenAI") => "OpenAIModel".to_string(),
            Some(p) => p.clone(),
            None => "Unknown Model".to_string(),
        }
    }
}
