//! Community detection traits.

use super::label_prop::PropagationState;
use crate::error::Result;
use crate::graph::{GraphAccessor, Neighborhoods};
use crate::history::Label;

/// Trait for community detection algorithms.
pub trait CommunityDetection {
    /// Detect communities in a graph.
    ///
    /// Returns a mapping from node index to community ID, numbered
    /// consecutively from 0.
    fn detect<G: GraphAccessor + ?Sized>(&self, graph: &G) -> Result<Vec<usize>>;
}

/// Per-node update strategy plugged into the sweep driver.
///
/// The driver owns visitation order, tie-breaking and convergence. A rule
/// only decides which labels are best for a node given the current state,
/// plus how the state reacts when a node actually switches label.
pub trait UpdateRule {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Check rule parameters before a run starts.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Labels tied for best among the neighbors of `node`, in label order.
    ///
    /// Only called for nodes with at least one neighbor. An empty result
    /// (every vote undefined, e.g. NaN weights) leaves the node untouched.
    fn candidates(&self, node: usize, hood: &Neighborhoods, state: &PropagationState)
        -> Vec<Label>;

    /// Whether a sweep without changes must be confirmed by a read-only pass
    /// over all nodes before the run stops.
    fn confirms_convergence(&self) -> bool;

    /// Whether a node whose label is already among the candidates is still
    /// redrawn at random from them.
    fn redraws_maximal(&self) -> bool;

    /// Whether the rule maintains per-node scores.
    fn uses_scores(&self) -> bool {
        false
    }

    /// Called after `node` switched to a label outside its previous
    /// candidate set.
    fn relabeled(&self, _node: usize, _hood: &Neighborhoods, _state: &mut PropagationState) {}
}
