//! Content extraction from newly sliced trace nodes.
//!
//! Recovers assistant text and paired tool-call/tool-result records from the
//! two trace levels this engine interprets: a cycle node and its direct
//! children. Tool results live on sibling nodes of the call's assistant step
//! and sibling order is not guaranteed, so pairing is an id-keyed join, not a
//! positional one.

use serde_json::Value;
use turntrace_types::{ContentBlock, TraceNode};

/// Assistant text and tool activity recovered from one turn's new cycles.
#[derive(Debug, Clone, Default)]
pub struct ExtractedContent {
    pub assistant_texts: Vec<String>,
    pub tool_calls: Vec<ToolCallRecord>,
}

/// One tool invocation with its resolved result.
///
/// `result` is empty on a join-miss: the call may still be in flight or
/// logging-only, so an unresolved id is not an error.
#[derive(Debug, Clone)]
pub struct ToolCallRecord {
    pub id: String,
    pub name: String,
    pub parameters: Value,
    pub result: String,
}

pub fn extract_content(new_traces: &[TraceNode]) -> ExtractedContent {
    let mut content = ExtractedContent::default();

    for trace in new_traces {
        for child in &trace.children {
            if !child.is_assistant_step() {
                continue;
            }

            for block in child.message_content() {
                match block {
                    ContentBlock::Text { text } => {
                        content.assistant_texts.push(text.clone());
                    }
                    ContentBlock::ToolUse { tool_use } => {
                        let result =
                            resolve_tool_result(&trace.children, &tool_use.tool_use_id);
                        content.tool_calls.push(ToolCallRecord {
                            id: tool_use.tool_use_id.clone(),
                            name: tool_use.name.clone(),
                            parameters: tool_use.input.clone(),
                            result,
                        });
                    }
                    _ => {}
                }
            }
        }
    }

    content
}

/// Concatenated assistant text of one cycle node, space-joined.
pub fn cycle_completion_text(trace: &TraceNode) -> String {
    let mut parts = Vec::new();
    for child in &trace.children {
        if !child.is_assistant_step() {
            continue;
        }
        for block in child.message_content() {
            if let Some(text) = block.as_text() {
                parts.push(text.to_string());
            }
        }
    }
    parts.join(" ")
}

/// Scan siblings for the tool step carrying this call's result.
///
/// The first sibling whose name contains the tool marker and whose metadata
/// id matches wins; scanning stops there even if that node carries no text
/// payload, in which case the result stays empty.
fn resolve_tool_result(siblings: &[TraceNode], tool_use_id: &str) -> String {
    for sibling in siblings {
        if !sibling.is_tool_step() {
            continue;
        }
        if sibling.metadata.tool_use_id.as_deref() != Some(tool_use_id) {
            continue;
        }
        return first_result_text(sibling).unwrap_or_default();
    }
    String::new()
}

fn first_result_text(node: &TraceNode) -> Option<String> {
    for block in node.message_content() {
        if let ContentBlock::ToolResult { tool_result } = block {
            for item in &tool_result.content {
                if let Some(text) = item.as_text() {
                    return Some(text.to_string());
                }
            }
        }
    }
    None
}
