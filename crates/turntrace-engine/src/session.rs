//! Process-lifetime running totals.

use serde::{Deserialize, Serialize};
use turntrace_types::UsageDelta;

/// Running sums of every delta computed since the last reset, independent of
/// which agent identity produced them. Totals are fed from the same deltas
/// that are returned to callers, never recomputed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTotals {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub total_tokens: u64,
    pub cycles: u64,
    pub latency_ms: u64,
}

impl SessionTotals {
    pub fn accumulate(&mut self, delta: &UsageDelta) {
        self.input_tokens += delta.input_tokens;
        self.output_tokens += delta.output_tokens;
        self.total_tokens += delta.total_tokens;
        self.cycles += delta.cycles;
        self.latency_ms += delta.latency_ms;
    }

    pub fn reset(&mut self) {
        *self = SessionTotals::default();
    }
}
