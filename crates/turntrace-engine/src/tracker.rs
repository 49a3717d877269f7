//! Tracker composing the snapshot store, delta calculation, trace slicing,
//! content extraction and view building into per-turn observations.

use chrono::Utc;
use serde_json::Value;
use turntrace_types::{
    AgentHandle, AgentId, AgentResult, CumulativeSummary, PerMessageRecord, Result, UsageDelta,
};

use crate::delta::compute_delta;
use crate::extract::extract_content;
use crate::session::SessionTotals;
use crate::slice::slice_new_traces;
use crate::snapshot::{AgentSnapshot, SnapshotStore};
use crate::view::{build_record, RecordParts};

/// One delta observation plus the slicing cursor it implies.
#[derive(Debug, Clone, Copy)]
pub struct Observation {
    pub delta: UsageDelta,
    /// Cycle index of the previous observation; 0 without history.
    pub prev_cycle_index: usize,
}

/// Stateful per-process metrics tracker.
///
/// Holds the snapshot store and session totals; each instance is independent,
/// and the crate-level façade wraps one shared instance for transport layers
/// that want process-wide tracking.
#[derive(Debug, Default)]
pub struct MetricsTracker {
    store: SnapshotStore,
    totals: SessionTotals,
}

impl MetricsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe one cumulative summary and compute this turn's delta.
    ///
    /// Without an identity the store is bypassed entirely: the caller is
    /// signaling the summary is already per-message (ephemeral agent), so the
    /// whole cumulative value is this turn's contribution. Session totals are
    /// fed either way.
    pub fn observe(
        &mut self,
        identity: Option<AgentId>,
        summary: &CumulativeSummary,
    ) -> Observation {
        let current = AgentSnapshot::capture(summary);
        let previous = identity.and_then(|id| self.store.observe(id, summary));
        let delta = compute_delta(&current, previous.as_ref());
        self.totals.accumulate(&delta);

        Observation {
            delta,
            prev_cycle_index: previous.map(|p| p.cycles as usize).unwrap_or(0),
        }
    }

    /// Extract a per-message record with identity-keyed delta tracking.
    ///
    /// Returns `None` when the turn carries no metrics attachment or when
    /// the attachment cannot be read; extraction failures never propagate
    /// past this boundary.
    pub fn extract_turn_record(
        &mut self,
        result: &AgentResult,
        message_id: Option<String>,
        agent: Option<&AgentHandle>,
    ) -> Option<PerMessageRecord> {
        self.extract(result, message_id, agent, agent.map(|a| a.id()))
    }

    /// Extract a per-message record for a single-use agent.
    ///
    /// Skips identity-keyed tracking and reports the full cumulative summary
    /// as the per-message delta: a fresh instance's cumulative-since-creation
    /// equals its per-turn contribution.
    pub fn extract_ephemeral_record(
        &mut self,
        result: &AgentResult,
        message_id: Option<String>,
    ) -> Option<PerMessageRecord> {
        self.extract(result, message_id, None, None)
    }

    /// Clear all tracked identities and the session totals.
    pub fn reset(&mut self) {
        self.store.reset();
        self.totals.reset();
    }

    pub fn totals(&self) -> SessionTotals {
        self.totals
    }

    fn extract(
        &mut self,
        result: &AgentResult,
        message_id: Option<String>,
        agent: Option<&AgentHandle>,
        identity: Option<AgentId>,
    ) -> Option<PerMessageRecord> {
        // Not instrumented; a valid state, not a failure.
        let raw = result.metrics.as_ref()?;

        match self.assemble(raw, result, message_id, agent, identity) {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::warn!(error = %err, "failed to extract per-turn metrics");
                None
            }
        }
    }

    fn assemble(
        &mut self,
        raw: &Value,
        result: &AgentResult,
        message_id: Option<String>,
        agent: Option<&AgentHandle>,
        identity: Option<AgentId>,
    ) -> Result<PerMessageRecord> {
        let summary: CumulativeSummary = serde_json::from_value(raw.clone())?;

        let observation = self.observe(identity, &summary);
        let new_traces = slice_new_traces(
            &summary.traces,
            observation.prev_cycle_index,
            summary.total_cycles as usize,
        );
        let content = extract_content(new_traces);

        let parts = RecordParts {
            message_id: message_id.unwrap_or_else(generated_message_id),
            message_text: String::new(),
            response_text: result.response.display_text(),
            delta: observation.delta,
            new_traces,
            content,
            metrics_summary: raw.clone(),
        };

        Ok(build_record(parts, agent))
    }
}

fn generated_message_id() -> String {
    format!("msg_{}", Utc::now().timestamp_micros())
}
