//! Wire contract of the agent runtime's cumulative execution summary.
//!
//! The runtime reports lifetime counters and an append-only trace tree after
//! every turn; nothing in this shape marks turn boundaries. All fields are
//! defaulted so a partially populated summary still parses.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reserved child-node name for assistant message streaming steps.
pub const STREAM_STEP_NAME: &str = "stream_messages";

/// Reserved substring marking tool invocation steps (e.g. "Tool: calculator").
pub const TOOL_STEP_MARKER: &str = "Tool:";

/// Message role carried by assistant steps.
pub const ASSISTANT_ROLE: &str = "assistant";

/// Cumulative summary produced by the runtime each turn.
///
/// Counters are monotonically non-decreasing over the lifetime of the agent
/// conversation; `traces` is index-aligned with `total_cycles`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CumulativeSummary {
    #[serde(default)]
    pub accumulated_usage: UsageTotals,

    #[serde(default)]
    pub total_cycles: u64,

    #[serde(default)]
    pub accumulated_metrics: AccumulatedMetrics,

    #[serde(default)]
    pub traces: Vec<TraceNode>,

    /// Per-tool usage mapping, passed through opaquely.
    #[serde(default)]
    pub tool_usage: Value,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageTotals {
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub output_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AccumulatedMetrics {
    #[serde(rename = "latencyMs", default)]
    pub latency_ms: u64,
}

/// One node of the runtime's execution trace.
///
/// Only a cycle node and its direct children are interpreted; deeper nesting
/// rides along in `children` untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraceNode {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    /// Epoch seconds.
    #[serde(default)]
    pub start_time: Option<f64>,

    /// Epoch seconds.
    #[serde(default)]
    pub end_time: Option<f64>,

    /// Seconds.
    #[serde(default)]
    pub duration: Option<f64>,

    #[serde(default)]
    pub message: Option<TraceMessage>,

    #[serde(default)]
    pub children: Vec<TraceNode>,

    #[serde(default)]
    pub metadata: TraceMetadata,
}

impl TraceNode {
    /// Content blocks of the attached message, empty when absent.
    pub fn message_content(&self) -> &[ContentBlock] {
        self.message.as_ref().map(|m| m.content.as_slice()).unwrap_or(&[])
    }

    /// Whether this node is an assistant message-streaming step.
    pub fn is_assistant_step(&self) -> bool {
        self.name.as_deref() == Some(STREAM_STEP_NAME)
            && self
                .message
                .as_ref()
                .is_some_and(|m| m.role == ASSISTANT_ROLE)
    }

    /// Whether this node is a tool invocation step.
    pub fn is_tool_step(&self) -> bool {
        self.name
            .as_deref()
            .is_some_and(|n| n.contains(TOOL_STEP_MARKER))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraceMessage {
    #[serde(default)]
    pub role: String,

    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

/// Node metadata; only the tool-use id is interpreted, the rest passes through.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraceMetadata {
    #[serde(rename = "toolUseId", default, skip_serializing_if = "Option::is_none")]
    pub tool_use_id: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Tagged content variant inside a trace message.
///
/// The runtime keys variants by field presence, so matching is untagged with
/// a catch-all for block types this engine does not interpret.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentBlock {
    Text {
        text: String,
    },
    ToolUse {
        #[serde(rename = "toolUse")]
        tool_use: ToolUseBlock,
    },
    ToolResult {
        #[serde(rename = "toolResult")]
        tool_result: ToolResultBlock,
    },
    Other(Value),
}

impl ContentBlock {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentBlock::Text { text } => Some(text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolUseBlock {
    #[serde(default)]
    pub tool_use_id: String,

    #[serde(default = "default_tool_name")]
    pub name: String,

    #[serde(default)]
    pub input: Value,
}

fn default_tool_name() -> String {
    "unknown".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResultBlock {
    #[serde(default)]
    pub tool_use_id: String,

    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_summary_with_missing_fields() {
        let summary: CumulativeSummary = serde_json::from_value(json!({
            "total_cycles": 3
        }))
        .unwrap();

        assert_eq!(summary.total_cycles, 3);
        assert_eq!(summary.accumulated_usage.input_tokens, 0);
        assert_eq!(summary.accumulated_metrics.latency_ms, 0);
        assert!(summary.traces.is_empty());
    }

    #[test]
    fn parses_content_block_variants() {
        let blocks: Vec<ContentBlock> = serde_json::from_value(json!([
            {"text": "hello"},
            {"toolUse": {"toolUseId": "t1", "name": "calculator", "input": {"expr": "1+1"}}},
            {"toolResult": {"toolUseId": "t1", "content": [{"text": "2"}]}},
            {"image": {"source": "..."}}
        ]))
        .unwrap();

        assert_eq!(blocks.len(), 4);
        assert_eq!(blocks[0].as_text(), Some("hello"));
        match &blocks[1] {
            ContentBlock::ToolUse { tool_use } => assert_eq!(tool_use.tool_use_id, "t1"),
            other => panic!("expected tool use, got {:?}", other),
        }
        assert!(matches!(&blocks[2], ContentBlock::ToolResult { .. }));
        assert!(matches!(&blocks[3], ContentBlock::Other(_)));
    }

    #[test]
    fn tool_use_defaults_apply() {
        let block: ContentBlock = serde_json::from_value(json!({
            "toolUse": {"toolUseId": "t9"}
        }))
        .unwrap();

        match block {
            ContentBlock::ToolUse { tool_use } => {
                assert_eq!(tool_use.name, "unknown");
                assert!(tool_use.input.is_null());
            }
            other => panic!("expected tool use, got {:?}", other),
        }
    }

    #[test]
    fn detects_assistant_and_tool_steps() {
        let assistant: TraceNode = serde_json::from_value(json!({
            "name": "stream_messages",
            "message": {"role": "assistant", "content": [{"text": "hi"}]}
        }))
        .unwrap();
        assert!(assistant.is_assistant_step());
        assert!(!assistant.is_tool_step());

        let tool: TraceNode = serde_json::from_value(json!({
            "name": "Tool: calculator",
            "metadata": {"toolUseId": "t1", "attempt": 1}
        }))
        .unwrap();
        assert!(tool.is_tool_step());
        assert_eq!(tool.metadata.tool_use_id.as_deref(), Some("t1"));
        assert!(tool.metadata.extra.contains_key("attempt"));
    }

    #[test]
    fn user_role_stream_step_is_not_assistant() {
        let node: TraceNode = serde_json::from_value(json!({
            "name": "stream_messages",
            "message": {"role": "user", "content": [{"text": "hi"}]}
        }))
        .unwrap();
        assert!(!node.is_assistant_step());
    }
}
