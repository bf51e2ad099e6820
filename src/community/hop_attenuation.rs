//! Hop attenuation update rule with node preference (Leung et al. 2009).
//!
//! Every node carries a score, starting at 1. A neighbor `u` votes for its
//! label with strength
//!
//! ```text
//! score(u) * degree(u)^m * w(v, u)
//! ```
//!
//! where `m` is the node degree preference and `w` the edge weight (1 when
//! the edge is unweighted). Votes are summed per label and the best labels
//! become candidates.
//!
//! A node already carrying a candidate label is left alone. Otherwise it
//! adopts a random candidate and its score becomes the best score among the
//! neighbors now sharing that label, minus `delta`, floored at 0. Labels
//! therefore lose strength with every hop away from where they started,
//! which stops one label from flooding the whole graph.
//!
//! A single sweep without changes ends the run; there is no confirmation
//! pass since nodes are never redrawn among equal candidates.
//!
//! ## References
//!
//! Leung, Hui, Liò, Crowcroft (2009). "Towards real-time community detection
//! in large networks." Physical Review E 79, 066107.

use super::label_prop::PropagationState;
use super::traits::UpdateRule;
use crate::error::{Error, Result};
use crate::graph::Neighborhoods;
use crate::history::Label;
use std::collections::BTreeMap;

/// Hop attenuation rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HopAttenuation {
    /// Score lost on every relabel.
    delta: f64,
    /// Exponent applied to neighbor degree (m).
    node_degree_preference: f64,
}

impl HopAttenuation {
    /// Create a rule with the given attenuation and degree preference.
    pub fn new(delta: f64, node_degree_preference: f64) -> Self {
        Self {
            delta,
            node_degree_preference,
        }
    }

    /// Set hop attenuation.
    pub fn with_delta(mut self, delta: f64) -> Self {
        self.delta = delta;
        self
    }

    /// Set node degree preference.
    ///
    /// Positive values favor labels held by high-degree neighbors, negative
    /// values favor low-degree ones, 0 ignores degree.
    pub fn with_node_degree_preference(mut self, m: f64) -> Self {
        self.node_degree_preference = m;
        self
    }

    /// Hop attenuation.
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Node degree preference.
    pub fn node_degree_preference(&self) -> f64 {
        self.node_degree_preference
    }
}

impl Default for HopAttenuation {
    fn default() -> Self {
        Self::new(0.1, 0.0)
    }
}

impl UpdateRule for HopAttenuation {
    fn name(&self) -> &'static str {
        "hop_attenuation"
    }

    fn validate(&self) -> Result<()> {
        if !self.delta.is_finite() || self.delta < 0.0 {
            return Err(Error::InvalidParameter {
                name: "delta",
                message: format!("must be finite and non-negative, got {}", self.delta),
            });
        }
        if !self.node_degree_preference.is_finite() {
            return Err(Error::InvalidParameter {
                name: "node_degree_preference",
                message: format!("must be finite, got {}", self.node_degree_preference),
            });
        }
        Ok(())
    }

    fn candidates(
        &self,
        node: usize,
        hood: &Neighborhoods,
        state: &PropagationState,
    ) -> Vec<Label> {
        let m = self.node_degree_preference;

        let mut label_weights: BTreeMap<Label, f64> = BTreeMap::new();
        for &(neighbor, w) in hood.of(node) {
            // degree^m may overflow to inf; a zero score or weight still votes 0.
            let strength = state.score(neighbor) * w;
            let vote = if strength == 0.0 {
                0.0
            } else {
                strength * (hood.degree(neighbor) as f64).powf(m)
            };
            *label_weights.entry(state.label(neighbor)).or_insert(0.0) += vote;
        }

        let max_weight = label_weights
            .values()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        label_weights
            .into_iter()
            .filter(|&(_, weight)| weight >= max_weight)
            .map(|(label, _)| label)
            .collect()
    }

    fn confirms_convergence(&self) -> bool {
        false
    }

    fn redraws_maximal(&self) -> bool {
        false
    }

    fn uses_scores(&self) -> bool {
        true
    }

    fn relabeled(&self, node: usize, hood: &Neighborhoods, state: &mut PropagationState) {
        let label = state.label(node);
        let best = hood
            .of(node)
            .iter()
            .filter(|&&(neighbor, _)| state.label(neighbor) == label)
            .map(|&(neighbor, _)| state.score(neighbor))
            .fold(f64::NEG_INFINITY, f64::max);
        state.set_score(node, (best - self.delta).max(0.0));
    }
}
