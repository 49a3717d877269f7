//! Last-seen cumulative counters per agent identity.

use std::collections::HashMap;

use turntrace_types::{AgentId, CumulativeSummary};

/// Cumulative counter values captured from one summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AgentSnapshot {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub total_tokens: u64,
    pub cycles: u64,
    pub latency_ms: u64,
}

impl AgentSnapshot {
    pub fn capture(summary: &CumulativeSummary) -> Self {
        Self {
            input_tokens: summary.accumulated_usage.input_tokens,
            output_tokens: summary.accumulated_usage.output_tokens,
            total_tokens: summary.accumulated_usage.total_tokens,
            cycles: summary.total_cycles,
            latency_ms: summary.accumulated_metrics.latency_ms,
        }
    }
}

/// Keyed store of the last snapshot observed per agent identity.
///
/// Each identity is either Unseen (no entry) or Tracked (entry present);
/// the only transitions are Unseen -> Tracked on first observation and
/// Tracked -> Tracked after, until `reset` clears everything. Entries hold
/// only the Copy id, never the agent itself.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    snapshots: HashMap<AgentId, AgentSnapshot>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current summary for `identity` and return what was stored
    /// before, or `None` on first observation.
    ///
    /// The entry is refreshed before any downstream processing runs, so a
    /// later extraction failure never leaves a stale snapshot behind.
    pub fn observe(
        &mut self,
        identity: AgentId,
        summary: &CumulativeSummary,
    ) -> Option<AgentSnapshot> {
        self.snapshots.insert(identity, AgentSnapshot::capture(summary))
    }

    pub fn is_tracked(&self, identity: AgentId) -> bool {
        self.snapshots.contains_key(&identity)
    }

    /// Forget every tracked identity. No partial reset is supported.
    pub fn reset(&mut self) {
        self.snapshots.clear();
    }
}
