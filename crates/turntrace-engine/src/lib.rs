// Engine module - per-message metrics delta computation
// Sits between the agent runtime's cumulative summary and the transport
// layer's UI serialization.

pub mod delta;
pub mod extract;
pub mod session;
pub mod slice;
pub mod snapshot;
pub mod tracker;
pub mod view;

pub use delta::compute_delta;
pub use extract::{extract_content, ExtractedContent, ToolCallRecord};
pub use session::SessionTotals;
pub use slice::slice_new_traces;
pub use snapshot::{AgentSnapshot, SnapshotStore};
pub use tracker::{MetricsTracker, Observation};
pub use view::{build_record, RecordParts};

use chrono::Utc;
use once_cell::sync::Lazy;
use sha2::{Digest, Sha256};
use std::sync::{Mutex, MutexGuard, PoisonError};
use turntrace_types::{AgentHandle, AgentResult, PerMessageRecord};

// Façade API - Stable public interface for the transport layer
// Wraps one process-wide tracker; the transport serializes turns per
// conversation, and the lock is the mutual exclusion around the shared
// session totals when different identities complete concurrently.

static TRACKER: Lazy<Mutex<MetricsTracker>> = Lazy::new(|| Mutex::new(MetricsTracker::new()));

fn tracker() -> MutexGuard<'static, MetricsTracker> {
    // A poisoned lock only means another turn panicked mid-observation;
    // telemetry state is still usable and this path must not panic the caller.
    TRACKER.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Extract a per-message record from a completed turn, tracking cumulative
/// deltas per agent identity. Returns `None` when no trace data is available;
/// the caller's degraded behavior is to show plain response text.
pub fn extract_turn_record(
    result: &AgentResult,
    message_id: Option<String>,
    agent: Option<&AgentHandle>,
) -> Option<PerMessageRecord> {
    tracker().extract_turn_record(result, message_id, agent)
}

/// Extract a per-message record for a single-use agent, skipping
/// identity-keyed delta tracking (the fresh instance's cumulative summary is
/// already per-message).
pub fn extract_ephemeral_record(
    result: &AgentResult,
    message_id: Option<String>,
) -> Option<PerMessageRecord> {
    tracker().extract_ephemeral_record(result, message_id)
}

/// Extract a per-message record for one user message, deriving a
/// deterministic-prefix message id from the message text and stamping the
/// record with it.
pub fn turn_record_for_message(
    result: &AgentResult,
    message: &str,
    agent: Option<&AgentHandle>,
) -> Option<PerMessageRecord> {
    let mut record = tracker().extract_turn_record(result, Some(message_id_for(message)), agent)?;
    record.message_text = message.to_string();
    Some(record)
}

/// Clear all tracked identities and the session totals; used when a UI
/// session restarts. No partial reset granularity is supported.
pub fn reset_metrics_state() {
    tracker().reset();
}

/// Running totals of every delta computed since the last reset.
pub fn session_totals() -> SessionTotals {
    tracker().totals()
}

fn message_id_for(message: &str) -> String {
    let digest = Sha256::digest(message.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    let short = u64::from_be_bytes(bytes) % 100_000;
    format!("msg_{}_{}", short, Utc::now().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_ids_are_stable_in_prefix_for_same_text() {
        let a = message_id_for("what is 6*7?");
        let b = message_id_for("what is 6*7?");
        let c = message_id_for("something else");

        let prefix = |s: &str| s.rsplit_once('_').map(|(p, _)| p.to_string());
        assert_eq!(prefix(&a), prefix(&b));
        assert_ne!(prefix(&a), prefix(&c));
    }
}
