//! UI-facing per-message record.
//!
//! Self-contained: holds no references back into engine state, so the
//! transport layer can serialize it directly.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::TraceNode;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerMessageRecord {
    pub message_id: String,
    pub trace_id: String,
    pub has_real_traces: bool,
    pub response_text: String,
    pub message_text: String,
    pub agent_attributes: AgentAttributes,
    pub cycles: Vec<CycleView>,
    pub llm_calls: Vec<LlmCallView>,
    pub tool_calls: Vec<ToolCallView>,
    pub total_duration_ms: u64,
    pub total_tokens: TokenSplit,
    /// Raw cumulative summary, passed through for downstream debug output.
    pub metrics_summary: Value,
    pub debug_info: DebugInfo,
}

/// Fixed telemetry attribute vocabulary for downstream display and
/// semantic-convention mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentAttributes {
    #[serde(rename = "gen_ai.system")]
    pub system: String,

    #[serde(rename = "agent.name")]
    pub agent_name: String,

    #[serde(rename = "gen_ai.agent.name")]
    pub gen_ai_agent_name: String,

    #[serde(rename = "gen_ai.request.model")]
    pub request_model: String,

    #[serde(rename = "gen_ai.usage.prompt_tokens")]
    pub prompt_tokens: u64,

    #[serde(rename = "gen_ai.usage.completion_tokens")]
    pub completion_tokens: u64,

    #[serde(rename = "gen_ai.usage.total_tokens")]
    pub total_tokens: u64,

    pub mode: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleView {
    pub cycle_id: String,
    pub prompt: String,
    pub completion: String,
    /// Epoch seconds.
    pub start_time: f64,
    /// Epoch seconds.
    pub end_time: f64,
    pub duration_ms: u64,
    pub spans: Vec<Value>,
}

/// Synthetic per-cycle LLM call.
///
/// The runtime reports token usage per turn, not per cycle; the token split
/// here is the turn delta divided evenly across cycles, an approximation
/// rather than a measured per-cycle cost.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmCallView {
    pub call_id: String,
    pub model: String,
    pub start_time: f64,
    pub end_time: f64,
    pub duration_ms: u64,
    pub prompt: String,
    pub completion: String,
    pub tokens: TokenSplit,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSplit {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallView {
    pub tool_id: String,
    pub tool_name: String,
    pub start_time: f64,
    pub end_time: f64,
    pub duration_ms: u64,
    pub parameters: Value,
    pub result: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugInfo {
    pub new_cycles: u64,
    pub message_contents: Vec<String>,
    pub new_traces: Vec<TraceNode>,
    pub metrics_summary: Value,
}
