//! Simple majority update rule (Raghavan, Albert & Kumara 2007).
//!
//! A node takes the label carried by most of its neighbors. When several
//! labels share the highest count, one is picked uniformly at random. The
//! node is redrawn even if its current label is already one of the winners,
//! so ties keep moving until the neighborhood is unambiguous.
//!
//! Because redrawing can hide instability, a sweep without changes is only
//! trusted after a read-only pass confirms that every node already carries
//! one of its majority labels.
//!
//! ## References
//!
//! Raghavan, Albert, Kumara (2007). "Near linear time algorithm to detect
//! community structures in large-scale networks." Physical Review E 76, 036106.

use super::label_prop::PropagationState;
use super::traits::UpdateRule;
use crate::graph::Neighborhoods;
use crate::history::Label;
use std::collections::BTreeMap;

/// Majority-of-neighbors rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MajorityRule;

impl UpdateRule for MajorityRule {
    fn name(&self) -> &'static str {
        "majority"
    }

    fn candidates(
        &self,
        node: usize,
        hood: &Neighborhoods,
        state: &PropagationState,
    ) -> Vec<Label> {
        // Count neighbor labels
        let mut label_counts: BTreeMap<Label, usize> = BTreeMap::new();
        for &(neighbor, _) in hood.of(node) {
            *label_counts.entry(state.label(neighbor)).or_insert(0) += 1;
        }

        let max_count = label_counts.values().max().copied().unwrap_or(0);
        label_counts
            .into_iter()
            .filter(|&(_, count)| count == max_count)
            .map(|(label, _)| label)
            .collect()
    }

    fn confirms_convergence(&self) -> bool {
        true
    }

    fn redraws_maximal(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petgraph::graph::UnGraph;

    fn star_with_labels(leaf_labels: &[usize]) -> (Neighborhoods, PropagationState) {
        let mut graph = UnGraph::<(), ()>::new_undirected();
        let hub = graph.add_node(());
        for _ in leaf_labels {
            let leaf = graph.add_node(());
            let _ = graph.add_edge(hub, leaf, ());
        }
        let hood = Neighborhoods::from_accessor(&graph);
        let mut state = PropagationState::new(leaf_labels.len() + 1);
        for (i, &l) in leaf_labels.iter().enumerate() {
            state.set_label(i + 1, Label(l));
        }
        (hood, state)
    }

    #[test]
    fn test_single_majority() {
        let (hood, state) = star_with_labels(&[7, 7, 3]);
        assert_eq!(MajorityRule.candidates(0, &hood, &state), vec![Label(7)]);
    }

    #[test]
    fn test_ties_keep_all_maximal_labels_sorted() {
        let (hood, state) = star_with_labels(&[9, 2, 9, 2, 5]);
        assert_eq!(
            MajorityRule.candidates(0, &hood, &state),
            vec![Label(2), Label(9)]
        );
    }

    #[test]
    fn test_all_distinct_neighbors_all_tie() {
        let (hood, state) = star_with_labels(&[4, 1, 8]);
        assert_eq!(
            MajorityRule.candidates(0, &hood, &state),
            vec![Label(1), Label(4), Label(8)]
        );
    }

    #[test]
    fn test_rule_flags() {
        assert!(MajorityRule.confirms_convergence());
        assert!(MajorityRule.redraws_maximal());
        assert!(!MajorityRule.uses_scores());
    }
}
