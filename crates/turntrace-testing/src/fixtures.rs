//! Fixtures for building runtime summaries and trace trees in tests.
//!
//! Builders produce the raw JSON shape the runtime hands the engine, so
//! tests exercise schema parsing the same way production input does.

use serde_json::{json, Value};
use turntrace_types::{AgentResponse, AgentResult, CumulativeSummary};

/// Builder for a cumulative summary payload.
#[derive(Debug, Clone, Default)]
pub struct SummaryBuilder {
    input_tokens: u64,
    output_tokens: u64,
    total_tokens: u64,
    cycles: u64,
    latency_ms: u64,
    traces: Vec<Value>,
}

impl SummaryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn usage(mut self, input: u64, output: u64, total: u64) -> Self {
        self.input_tokens = input;
        self.output_tokens = output;
        self.total_tokens = total;
        self
    }

    pub fn cycles(mut self, cycles: u64) -> Self {
        self.cycles = cycles;
        self
    }

    pub fn latency_ms(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    /// Append a trace node without touching the cycle counter; set that
    /// explicitly to model counter/trace inconsistencies.
    pub fn trace(mut self, node: Value) -> Self {
        self.traces.push(node);
        self
    }

    pub fn build_value(&self) -> Value {
        json!({
            "accumulated_usage": {
                "inputTokens": self.input_tokens,
                "outputTokens": self.output_tokens,
                "totalTokens": self.total_tokens
            },
            "total_cycles": self.cycles,
            "accumulated_metrics": {"latencyMs": self.latency_ms},
            "traces": self.traces,
            "tool_usage": {}
        })
    }

    pub fn build(&self) -> CumulativeSummary {
        serde_json::from_value(self.build_value()).expect("fixture summary must parse")
    }

    /// Wrap the summary in a turn result with the given response text.
    pub fn into_result(self, response: &str) -> AgentResult {
        AgentResult::new(AgentResponse::from(response), Some(self.build_value()))
    }
}

/// A cycle node with the given direct children.
pub fn cycle(id: &str, children: Vec<Value>) -> Value {
    json!({
        "id": id,
        "name": format!("Cycle {}", id),
        "start_time": 1000.0,
        "end_time": 1002.5,
        "duration": 2.5,
        "children": children
    })
}

/// An assistant message-streaming step carrying the given content blocks.
pub fn assistant_step(blocks: Vec<Value>) -> Value {
    json!({
        "name": "stream_messages",
        "message": {"role": "assistant", "content": blocks}
    })
}

pub fn text_block(text: &str) -> Value {
    json!({"text": text})
}

pub fn tool_use_block(id: &str, name: &str, input: Value) -> Value {
    json!({"toolUse": {"toolUseId": id, "name": name, "input": input}})
}

/// A tool invocation step carrying a text result for the given call id.
pub fn tool_step(tool_name: &str, tool_use_id: &str, result_text: &str) -> Value {
    json!({
        "name": format!("Tool: {}", tool_name),
        "metadata": {"toolUseId": tool_use_id},
        "message": {
            "role": "user",
            "content": [{
                "toolResult": {
                    "toolUseId": tool_use_id,
                    "content": [{"text": result_text}]
                }
            }]
        }
    })
}

/// A turn result with no metrics attachment (not instrumented).
pub fn uninstrumented_result(response: &str) -> AgentResult {
    AgentResult::new(AgentResponse::from(response), None)
}
