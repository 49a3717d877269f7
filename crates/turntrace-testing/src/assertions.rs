//! Assertion helpers for delta checks.

use turntrace_types::UsageDelta;

/// Assert every field of a usage delta at once.
#[track_caller]
pub fn assert_delta(
    delta: &UsageDelta,
    input: u64,
    output: u64,
    total: u64,
    cycles: u64,
    latency_ms: u64,
) {
    assert_eq!(delta.input_tokens, input, "input_tokens");
    assert_eq!(delta.output_tokens, output, "output_tokens");
    assert_eq!(delta.total_tokens, total, "total_tokens");
    assert_eq!(delta.cycles, cycles, "cycles");
    assert_eq!(delta.latency_ms, latency_ms, "latency_ms");
}
