use serde::{Deserialize, Serialize};

/// The portion of the cumulative counters attributable to one turn.
///
/// Unsigned by construction: deltas are clamped at zero even when the
/// underlying counters regress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageDelta {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub total_tokens: u64,
    pub cycles: u64,
    pub latency_ms: u64,
}
