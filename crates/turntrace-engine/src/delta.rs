//! Cumulative-to-delta conversion.

use turntrace_types::UsageDelta;

use crate::snapshot::AgentSnapshot;

/// Compute this turn's contribution from the current cumulative counters.
///
/// Without a previous snapshot the whole cumulative value is attributed to
/// this turn (correct for a first observation). Otherwise every field is
/// clamped at zero: a regressed counter means the runtime's accumulator was
/// recreated without the store being told, and under-reporting beats raising
/// on a display path.
pub fn compute_delta(current: &AgentSnapshot, previous: Option<&AgentSnapshot>) -> UsageDelta {
    let Some(prev) = previous else {
        return UsageDelta {
            input_tokens: current.input_tokens,
            output_tokens: current.output_tokens,
            total_tokens: current.total_tokens,
            cycles: current.cycles,
            latency_ms: current.latency_ms,
        };
    };

    UsageDelta {
        input_tokens: current.input_tokens.saturating_sub(prev.input_tokens),
        output_tokens: current.output_tokens.saturating_sub(prev.output_tokens),
        total_tokens: current.total_tokens.saturating_sub(prev.total_tokens),
        cycles: current.cycles.saturating_sub(prev.cycles),
        latency_ms: current.latency_ms.saturating_sub(prev.latency_ms),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(input: u64, output: u64, total: u64, cycles: u64, latency: u64) -> AgentSnapshot {
        AgentSnapshot {
            input_tokens: input,
            output_tokens: output,
            total_tokens: total,
            cycles,
            latency_ms: latency,
        }
    }

    #[test]
    fn no_previous_passes_current_through() {
        let delta = compute_delta(&snapshot(10, 5, 15, 2, 300), None);
        assert_eq!(delta.input_tokens, 10);
        assert_eq!(delta.output_tokens, 5);
        assert_eq!(delta.total_tokens, 15);
        assert_eq!(delta.cycles, 2);
        assert_eq!(delta.latency_ms, 300);
    }

    #[test]
    fn per_field_difference() {
        let delta = compute_delta(
            &snapshot(18, 9, 27, 3, 450),
            Some(&snapshot(10, 5, 15, 2, 300)),
        );
        assert_eq!(delta.input_tokens, 8);
        assert_eq!(delta.output_tokens, 4);
        assert_eq!(delta.total_tokens, 12);
        assert_eq!(delta.cycles, 1);
        assert_eq!(delta.latency_ms, 150);
    }

    #[test]
    fn regressed_counters_clamp_to_zero() {
        let delta = compute_delta(
            &snapshot(5, 2, 7, 1, 100),
            Some(&snapshot(10, 5, 15, 2, 300)),
        );
        assert_eq!(delta, UsageDelta::default());
    }

    #[test]
    fn mixed_regression_clamps_only_affected_fields() {
        let delta = compute_delta(
            &snapshot(20, 3, 23, 3, 500),
            Some(&snapshot(10, 5, 15, 2, 300)),
        );
        assert_eq!(delta.input_tokens, 10);
        assert_eq!(delta.output_tokens, 0);
        assert_eq!(delta.total_tokens, 8);
        assert_eq!(delta.cycles, 1);
        assert_eq!(delta.latency_ms, 200);
    }
}
