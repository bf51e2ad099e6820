//! Label propagation for community detection.
//!
//! Very fast O(E) per sweep: nodes adopt the best label among their
//! neighbors, with "best" decided by an [`UpdateRule`].
//!
//! ## The Sweep
//!
//! Every node starts with its own label. Each sweep visits all nodes in a
//! fresh random order and updates them one at a time, in place: a node
//! visited late in a sweep already sees the labels its neighbors took
//! earlier in the same sweep. Nodes without neighbors are never touched.
//!
//! The label of every node is recorded after each sweep. The run ends when
//! a sweep changes nothing (confirmed by a read-only pass for rules that ask
//! for it) or when the iteration cap is reached.

use super::hop_attenuation::HopAttenuation;
use super::majority::MajorityRule;
use super::traits::{CommunityDetection, UpdateRule};
use crate::annotate::{final_column, history_columns, AnnotationSink, ExportMode};
use crate::error::{Error, Result};
use crate::graph::{GraphAccessor, Neighborhoods};
use crate::history::{History, Label};
use rand::prelude::*;
use std::collections::BTreeMap;
use tracing::{debug, info, trace, warn};

/// Labels and scores of every node during a run.
#[derive(Debug, Clone, PartialEq)]
pub struct PropagationState {
    labels: Vec<Label>,
    scores: Vec<f64>,
}

impl PropagationState {
    /// Initial state: node `v` carries `Label(v)` and score 1.
    pub fn new(n: usize) -> Self {
        Self {
            labels: (0..n).map(Label).collect(),
            scores: vec![1.0; n],
        }
    }

    /// Current label of `node`.
    pub fn label(&self, node: usize) -> Label {
        self.labels[node]
    }

    /// Current score of `node`.
    pub fn score(&self, node: usize) -> f64 {
        self.scores[node]
    }

    /// All labels in node order.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// All scores in node order.
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// Overwrite the label of `node`.
    pub fn set_label(&mut self, node: usize, label: Label) {
        self.labels[node] = label;
    }

    /// Overwrite the score of `node`.
    pub fn set_score(&mut self, node: usize, score: f64) {
        self.scores[node] = score;
    }
}

/// Outcome of a label propagation run.
#[derive(Debug, Clone, PartialEq)]
pub struct Propagation {
    state: PropagationState,
    uses_scores: bool,
    history: History,
    converged: bool,
}

impl Propagation {
    /// Final label of every node.
    pub fn labels(&self) -> &[Label] {
        self.state.labels()
    }

    /// Consume the outcome, keeping the final labels.
    pub fn into_labels(self) -> Vec<Label> {
        self.state.labels
    }

    /// Final scores, for rules that keep them.
    pub fn scores(&self) -> Option<&[f64]> {
        self.uses_scores.then(|| self.state.scores())
    }

    /// Labels after every completed sweep.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Number of completed sweeps.
    pub fn iterations(&self) -> usize {
        self.history.len()
    }

    /// Index of the last executed sweep, `None` if no sweep ran.
    pub fn last_iteration(&self) -> Option<usize> {
        self.history.len().checked_sub(1)
    }

    /// Whether the run stopped on a fixed point rather than the iteration cap.
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Nodes grouped by final label.
    pub fn communities(&self) -> BTreeMap<Label, Vec<usize>> {
        let mut by_label: BTreeMap<Label, Vec<usize>> = BTreeMap::new();
        for (node, &label) in self.labels().iter().enumerate() {
            by_label.entry(label).or_default().push(node);
        }
        by_label
    }

    /// Number of distinct final labels.
    pub fn n_communities(&self) -> usize {
        self.communities().len()
    }

    /// Final labels renumbered to consecutive integers in label order.
    pub fn compact(&self) -> Vec<usize> {
        let mut unique: Vec<Label> = self.labels().to_vec();
        unique.sort_unstable();
        unique.dedup();

        self.labels()
            .iter()
            .map(|l| unique.binary_search(l).unwrap_or(0))
            .collect()
    }

    /// Write the final labels or the whole history into `sink`.
    pub fn export<S: AnnotationSink + ?Sized>(&self, mode: ExportMode, sink: &mut S) -> Result<()> {
        match mode {
            ExportMode::None => Ok(()),
            ExportMode::Final => sink.attach(vec![final_column(self.labels())?]),
            ExportMode::History => sink.attach(history_columns(&self.history)?),
        }
    }
}

/// Label propagation community detection.
///
/// Generic over the per-node [`UpdateRule`]; see [`MajorityRule`] and
/// [`HopAttenuation`].
#[derive(Debug, Clone)]
pub struct LabelPropagation<U = MajorityRule> {
    /// Per-node update rule.
    rule: U,
    /// Maximum iterations.
    max_iter: usize,
    /// Random seed.
    seed: Option<u64>,
    /// What `propagate_into` writes to the sink.
    export: ExportMode,
}

impl LabelPropagation<MajorityRule> {
    /// Create a new label propagation detector with the simple majority rule.
    pub fn new() -> Self {
        Self::with_rule(MajorityRule)
    }
}

impl Default for LabelPropagation<MajorityRule> {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelPropagation<HopAttenuation> {
    /// Create a detector with the hop attenuation rule
    /// (delta 0.1, node degree preference 0).
    pub fn hop_attenuation() -> Self {
        Self::with_rule(HopAttenuation::default())
    }

    /// Set hop attenuation.
    pub fn with_delta(mut self, delta: f64) -> Self {
        self.rule = self.rule.with_delta(delta);
        self
    }

    /// Set node degree preference.
    pub fn with_node_degree_preference(mut self, m: f64) -> Self {
        self.rule = self.rule.with_node_degree_preference(m);
        self
    }
}

impl<U: UpdateRule> LabelPropagation<U> {
    /// Create a detector around an arbitrary rule.
    pub fn with_rule(rule: U) -> Self {
        Self {
            rule,
            max_iter: 1000,
            seed: None,
            export: ExportMode::None,
        }
    }

    /// Set maximum iterations.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set what [`propagate_into`](Self::propagate_into) exports.
    pub fn with_export(mut self, export: ExportMode) -> Self {
        self.export = export;
        self
    }

    /// Update rule.
    pub fn rule(&self) -> &U {
        &self.rule
    }

    /// Maximum iterations.
    pub fn max_iter(&self) -> usize {
        self.max_iter
    }

    /// Random seed, if fixed.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Configured export mode.
    pub fn export(&self) -> ExportMode {
        self.export
    }

    /// Run with the configured seed, or the thread RNG if none is set.
    pub fn propagate<G: GraphAccessor + ?Sized>(&self, graph: &G) -> Result<Propagation> {
        let mut rng: Box<dyn RngCore> = match self.seed {
            Some(s) => Box::new(StdRng::seed_from_u64(s)),
            None => Box::new(rand::rng()),
        };
        self.propagate_with_rng(graph, &mut rng)
    }

    /// Run and export into `sink` according to the configured [`ExportMode`].
    pub fn propagate_into<G, S>(&self, graph: &G, sink: &mut S) -> Result<Propagation>
    where
        G: GraphAccessor + ?Sized,
        S: AnnotationSink + ?Sized,
    {
        let outcome = self.propagate(graph)?;
        outcome.export(self.export, sink)?;
        Ok(outcome)
    }

    /// Run with an injected random source.
    ///
    /// The RNG provides the per-sweep visiting order and the tie-breaks;
    /// a seeded RNG makes the whole history reproducible.
    pub fn propagate_with_rng<G, R>(&self, graph: &G, rng: &mut R) -> Result<Propagation>
    where
        G: GraphAccessor + ?Sized,
        R: Rng + ?Sized,
    {
        if self.max_iter == 0 {
            return Err(Error::InvalidParameter {
                name: "max_iter",
                message: "must be at least 1".into(),
            });
        }
        self.rule.validate()?;
        if graph.is_directed() {
            return Err(Error::InvalidGraph);
        }

        let hood = Neighborhoods::from_accessor(graph);
        let n = hood.len();
        let mut state = PropagationState::new(n);
        let mut history = History::new();
        let mut converged = false;

        let mut order: Vec<usize> = (0..n).collect();

        for iteration in 0..self.max_iter {
            order.shuffle(rng);
            let changed = self.sweep(&order, &hood, &mut state, rng);
            history.record(state.labels());
            debug!(rule = self.rule.name(), iteration, changed, "sweep finished");

            if changed {
                continue;
            }
            if !self.rule.confirms_convergence() || self.is_stable(&hood, &state) {
                converged = true;
                break;
            }
            trace!(iteration, "quiet sweep is not a fixed point, continuing");
        }

        let last_iteration = history.len().saturating_sub(1);
        if converged {
            info!(rule = self.rule.name(), nodes = n, last_iteration, "label propagation converged");
        } else {
            warn!(
                rule = self.rule.name(),
                nodes = n,
                max_iter = self.max_iter,
                "label propagation stopped at iteration cap without converging"
            );
        }

        Ok(Propagation {
            state,
            uses_scores: self.rule.uses_scores(),
            history,
            converged,
        })
    }

    /// One pass over `order`. Returns whether any visited node carried a
    /// label outside its candidate set.
    fn sweep<R: Rng + ?Sized>(
        &self,
        order: &[usize],
        hood: &Neighborhoods,
        state: &mut PropagationState,
        rng: &mut R,
    ) -> bool {
        let mut changed = false;

        for &node in order {
            if hood.of(node).is_empty() {
                continue;
            }

            let candidates = self.rule.candidates(node, hood, state);
            if candidates.is_empty() {
                continue;
            }
            let maximal = candidates.contains(&state.label(node));
            if maximal && !self.rule.redraws_maximal() {
                continue;
            }
            if !maximal {
                changed = true;
            }

            if let Some(&next) = candidates.choose(rng) {
                state.set_label(node, next);
                if !maximal {
                    self.rule.relabeled(node, hood, state);
                }
            }
        }

        changed
    }

    /// Read-only check that every node with neighbors carries one of its
    /// candidate labels.
    fn is_stable(&self, hood: &Neighborhoods, state: &PropagationState) -> bool {
        (0..hood.len())
            .filter(|&node| !hood.of(node).is_empty())
            .all(|node| {
                let candidates = self.rule.candidates(node, hood, state);
                candidates.is_empty() || candidates.contains(&state.label(node))
            })
    }
}

impl<U: UpdateRule> CommunityDetection for LabelPropagation<U> {
    fn detect<G: GraphAccessor + ?Sized>(&self, graph: &G) -> Result<Vec<usize>> {
        Ok(self.propagate(graph)?.compact())
    }
}

/// Simple majority label propagation (Raghavan et al. 2007).
pub fn run_simple<G, R>(graph: &G, max_iterations: usize, rng: &mut R) -> Result<Propagation>
where
    G: GraphAccessor + ?Sized,
    R: Rng + ?Sized,
{
    LabelPropagation::new()
        .with_max_iter(max_iterations)
        .propagate_with_rng(graph, rng)
}

/// Hop attenuation label propagation with node preference (Leung et al. 2009).
pub fn run_hop_attenuation<G, R>(
    graph: &G,
    max_iterations: usize,
    delta: f64,
    node_degree_preference: f64,
    rng: &mut R,
) -> Result<Propagation>
where
    G: GraphAccessor + ?Sized,
    R: Rng + ?Sized,
{
    LabelPropagation::with_rule(HopAttenuation::new(delta, node_degree_preference))
        .with_max_iter(max_iterations)
        .propagate_with_rng(graph, rng)
}
