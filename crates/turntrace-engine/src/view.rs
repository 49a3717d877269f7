//! Assembly of the UI-facing per-message record.

use chrono::Utc;
use serde_json::Value;
use turntrace_types::{
    AgentAttributes, AgentHandle, CycleView, DebugInfo, LlmCallView, PerMessageRecord, TokenSplit,
    ToolCallView, TraceNode, UsageDelta, AGENT_SYSTEM, DEFAULT_AGENT_NAME, DEFAULT_MODEL_ID,
};

use crate::extract::{cycle_completion_text, ExtractedContent};

/// Observation mode tag carried in the telemetry attributes.
const MODE_LOCAL: &str = "local";

/// Placeholder duration for tool calls; the runtime's tool trace nodes do not
/// reliably expose timing in the inputs available here.
const TOOL_PLACEHOLDER_MS: u64 = 100;

/// Default cycle duration when the trace node reports none.
const DEFAULT_CYCLE_MS: u64 = 1000;

/// Everything the builder needs for one record.
pub struct RecordParts<'a> {
    pub message_id: String,
    pub message_text: String,
    pub response_text: String,
    pub delta: UsageDelta,
    pub new_traces: &'a [TraceNode],
    pub content: ExtractedContent,
    pub metrics_summary: Value,
}

pub fn build_record(parts: RecordParts<'_>, agent: Option<&AgentHandle>) -> PerMessageRecord {
    let model = agent
        .and_then(|a| a.model.as_ref())
        .map(|m| m.display_name())
        .unwrap_or_else(|| DEFAULT_MODEL_ID.to_string());
    let agent_name = agent
        .map(|a| a.display_name())
        .unwrap_or_else(|| DEFAULT_AGENT_NAME.to_string());

    let now = epoch_seconds();
    let tokens_per_cycle = split_tokens(&parts.delta);

    let mut cycles = Vec::with_capacity(parts.new_traces.len());
    let mut llm_calls = Vec::with_capacity(parts.new_traces.len());

    for (i, trace) in parts.new_traces.iter().enumerate() {
        let cycle_id = trace
            .id
            .clone()
            .unwrap_or_else(|| format!("cycle_{}", i + 1));

        let completion = {
            let text = cycle_completion_text(trace);
            if text.is_empty() {
                parts.response_text.clone()
            } else {
                text
            }
        };

        let start_time = trace.start_time.unwrap_or(now);
        let end_time = trace.end_time.unwrap_or(now + 1.0);
        let duration_ms = match trace.duration {
            Some(d) if d > 0.0 => (d * 1000.0).round() as u64,
            _ => DEFAULT_CYCLE_MS,
        };

        llm_calls.push(LlmCallView {
            call_id: format!("llm_{}", cycle_id),
            model: model.clone(),
            start_time,
            end_time,
            duration_ms,
            prompt: "User message".to_string(),
            completion: completion.clone(),
            tokens: tokens_per_cycle,
        });

        cycles.push(CycleView {
            cycle_id,
            prompt: "User message".to_string(),
            completion,
            start_time,
            end_time,
            duration_ms,
            spans: Vec::new(),
        });
    }

    let tool_calls = parts
        .content
        .tool_calls
        .iter()
        .enumerate()
        .map(|(i, call)| ToolCallView {
            tool_id: if call.id.is_empty() {
                format!("tool_{}", i + 1)
            } else {
                call.id.clone()
            },
            tool_name: call.name.clone(),
            start_time: now,
            end_time: now + 0.1,
            duration_ms: TOOL_PLACEHOLDER_MS,
            parameters: call.parameters.clone(),
            result: call.result.clone(),
        })
        .collect();

    PerMessageRecord {
        message_id: parts.message_id,
        trace_id: format!("trace_{}", Utc::now().timestamp_micros()),
        has_real_traces: true,
        response_text: parts.response_text,
        message_text: parts.message_text,
        agent_attributes: AgentAttributes {
            system: AGENT_SYSTEM.to_string(),
            agent_name: agent_name.clone(),
            gen_ai_agent_name: agent_name,
            request_model: model,
            prompt_tokens: parts.delta.input_tokens,
            completion_tokens: parts.delta.output_tokens,
            total_tokens: parts.delta.total_tokens,
            mode: MODE_LOCAL.to_string(),
        },
        cycles,
        llm_calls,
        tool_calls,
        total_duration_ms: parts.delta.latency_ms,
        total_tokens: TokenSplit {
            prompt_tokens: parts.delta.input_tokens,
            completion_tokens: parts.delta.output_tokens,
            total_tokens: parts.delta.total_tokens,
        },
        metrics_summary: parts.metrics_summary.clone(),
        debug_info: DebugInfo {
            new_cycles: parts.delta.cycles,
            message_contents: parts.content.assistant_texts,
            new_traces: parts.new_traces.to_vec(),
            metrics_summary: parts.metrics_summary,
        },
    }
}

/// Even division of this turn's token delta across its cycles.
///
/// The runtime reports usage per turn, not per cycle, so this is an
/// approximation rather than a measured per-cycle cost.
fn split_tokens(delta: &UsageDelta) -> TokenSplit {
    let divisor = delta.cycles.max(1);
    TokenSplit {
        prompt_tokens: delta.input_tokens / divisor,
        completion_tokens: delta.output_tokens / divisor,
        total_tokens: delta.total_tokens / divisor,
    }
}

fn epoch_seconds() -> f64 {
    Utc::now().timestamp_millis() as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{extract_content, ToolCallRecord};
    use serde_json::json;
    use turntrace_types::ModelDescriptor;

    fn traces(value: serde_json::Value) -> Vec<TraceNode> {
        serde_json::from_value(value).unwrap()
    }

    fn parts<'a>(delta: UsageDelta, new_traces: &'a [TraceNode]) -> RecordParts<'a> {
        RecordParts {
            message_id: "msg_1".to_string(),
            message_text: String::new(),
            response_text: "overall response".to_string(),
            delta,
            new_traces,
            content: extract_content(new_traces),
            metrics_summary: Value::Null,
        }
    }

    #[test]
    fn splits_token_delta_evenly_across_cycles() {
        let nodes = traces(json!([
            {"id": "c1", "duration": 0.5},
            {"id": "c2", "duration": 0.25}
        ]));
        let delta = UsageDelta {
            input_tokens: 10,
            output_tokens: 5,
            total_tokens: 15,
            cycles: 2,
            latency_ms: 400,
        };

        let record = build_record(parts(delta, &nodes), None);

        assert_eq!(record.llm_calls.len(), 2);
        for call in &record.llm_calls {
            assert_eq!(call.tokens.prompt_tokens, 5);
            assert_eq!(call.tokens.completion_tokens, 2);
            assert_eq!(call.tokens.total_tokens, 7);
        }
        assert_eq!(record.total_tokens.total_tokens, 15);
        assert_eq!(record.total_duration_ms, 400);
    }

    #[test]
    fn zero_cycles_does_not_divide_by_zero() {
        let delta = UsageDelta {
            input_tokens: 10,
            ..Default::default()
        };
        let record = build_record(parts(delta, &[]), None);
        assert!(record.llm_calls.is_empty());
        assert_eq!(record.agent_attributes.prompt_tokens, 10);
    }

    #[test]
    fn cycle_duration_defaults_when_missing_or_zero() {
        let nodes = traces(json!([
            {"id": "c1"},
            {"id": "c2", "duration": 0.0},
            {"id": "c3", "duration": 2.5}
        ]));
        let record = build_record(parts(UsageDelta::default(), &nodes), None);

        assert_eq!(record.cycles[0].duration_ms, 1000);
        assert_eq!(record.cycles[1].duration_ms, 1000);
        assert_eq!(record.cycles[2].duration_ms, 2500);
    }

    #[test]
    fn completion_falls_back_to_response_text() {
        let nodes = traces(json!([{"id": "c1"}]));
        let record = build_record(parts(UsageDelta::default(), &nodes), None);
        assert_eq!(record.cycles[0].completion, "overall response");
        assert_eq!(record.cycles[0].prompt, "User message");
    }

    #[test]
    fn missing_cycle_id_gets_positional_fallback() {
        let nodes = traces(json!([{}, {}]));
        let record = build_record(parts(UsageDelta::default(), &nodes), None);
        assert_eq!(record.cycles[0].cycle_id, "cycle_1");
        assert_eq!(record.cycles[1].cycle_id, "cycle_2");
        assert_eq!(record.llm_calls[1].call_id, "llm_cycle_2");
    }

    #[test]
    fn tool_calls_get_placeholder_timing() {
        let nodes: Vec<TraceNode> = Vec::new();
        let mut p = parts(UsageDelta::default(), &nodes);
        p.content = ExtractedContent {
            assistant_texts: Vec::new(),
            tool_calls: vec![ToolCallRecord {
                id: "t1".to_string(),
                name: "calculator".to_string(),
                parameters: json!({"expr": "6*7"}),
                result: "42".to_string(),
            }],
        };

        let record = build_record(p, None);
        let call = &record.tool_calls[0];
        assert_eq!(call.duration_ms, 100);
        assert_eq!(call.tool_id, "t1");
        assert_eq!(call.result, "42");
    }

    #[test]
    fn agent_handle_drives_names_and_default_applies_without_one() {
        let without = build_record(parts(UsageDelta::default(), &[]), None);
        assert_eq!(without.agent_attributes.request_model, DEFAULT_MODEL_ID);
        assert_eq!(without.agent_attributes.agent_name, DEFAULT_AGENT_NAME);

        let agent = AgentHandle::new()
            .with_name("researcher")
            .with_model(ModelDescriptor::from_id("claude-sonnet"));
        let with = build_record(parts(UsageDelta::default(), &[]), Some(&agent));
        assert_eq!(with.agent_attributes.request_model, "claude-sonnet");
        assert_eq!(with.agent_attributes.agent_name, "researcher");
        assert_eq!(with.agent_attributes.system, AGENT_SYSTEM);
        assert!(with.has_real_traces);
    }
}
