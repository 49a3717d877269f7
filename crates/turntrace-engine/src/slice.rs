//! Selection of trace nodes newly produced since the last observation.

use turntrace_types::TraceNode;

/// Return the cycle nodes appended between the previous and current
/// observation, i.e. `all[prev..curr]` with both bounds clamped.
///
/// The trace list can be shorter than the reported cycle count (the two
/// cumulative fields are not guaranteed consistent); that yields an empty
/// slice rather than a panic.
pub fn slice_new_traces(
    all: &[TraceNode],
    prev_cycle_index: usize,
    curr_cycle_index: usize,
) -> &[TraceNode] {
    if prev_cycle_index >= all.len() || prev_cycle_index >= curr_cycle_index {
        return &[];
    }
    let end = curr_cycle_index.min(all.len());
    &all[prev_cycle_index..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nodes(n: usize) -> Vec<TraceNode> {
        (0..n)
            .map(|i| TraceNode {
                id: Some(format!("cycle_{}", i + 1)),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn slices_newly_appended_nodes() {
        let all = nodes(3);
        let new = slice_new_traces(&all, 1, 3);
        assert_eq!(new.len(), 2);
        assert_eq!(new[0].id.as_deref(), Some("cycle_2"));
    }

    #[test]
    fn previous_index_beyond_length_yields_empty() {
        let all = nodes(2);
        assert!(slice_new_traces(&all, 5, 7).is_empty());
    }

    #[test]
    fn current_index_beyond_length_is_clamped() {
        let all = nodes(2);
        let new = slice_new_traces(&all, 0, 9);
        assert_eq!(new.len(), 2);
    }

    #[test]
    fn regressed_cycle_count_yields_empty() {
        let all = nodes(3);
        assert!(slice_new_traces(&all, 3, 1).is_empty());
        assert!(slice_new_traces(&all, 2, 2).is_empty());
    }
}
