//! Declarative run configuration.
//!
//! [`PropagationConfig`] describes a whole run (rule, cap, seed, export) as
//! plain data, so it can be loaded from a settings file when the `serde`
//! feature is enabled.
//!
//! ```rust
//! use labelprop::community::{PropagationConfig, RuleKind};
//!
//! let config = PropagationConfig {
//!     rule: RuleKind::HopAttenuation { delta: 0.2, node_degree_preference: 1.0 },
//!     max_iterations: 200,
//!     seed: Some(7),
//!     ..Default::default()
//! };
//! let detector = config.build().unwrap();
//! assert_eq!(detector.max_iter(), 200);
//! ```

use super::hop_attenuation::HopAttenuation;
use super::label_prop::{LabelPropagation, PropagationState};
use super::majority::MajorityRule;
use super::traits::UpdateRule;
use crate::annotate::ExportMode;
use crate::error::{Error, Result};
use crate::graph::Neighborhoods;
use crate::history::Label;

/// Update rule selected at runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum RuleKind {
    /// Simple majority of neighbor labels.
    #[default]
    Simple,
    /// Hop attenuation with node degree preference.
    HopAttenuation {
        /// Score lost on every relabel.
        delta: f64,
        /// Exponent applied to neighbor degree.
        node_degree_preference: f64,
    },
}

impl RuleKind {
    fn hop(delta: f64, node_degree_preference: f64) -> HopAttenuation {
        HopAttenuation::new(delta, node_degree_preference)
    }
}

impl UpdateRule for RuleKind {
    fn name(&self) -> &'static str {
        match *self {
            RuleKind::Simple => MajorityRule.name(),
            RuleKind::HopAttenuation { delta, node_degree_preference } => {
                Self::hop(delta, node_degree_preference).name()
            }
        }
    }

    fn validate(&self) -> Result<()> {
        match *self {
            RuleKind::Simple => MajorityRule.validate(),
            RuleKind::HopAttenuation { delta, node_degree_preference } => {
                Self::hop(delta, node_degree_preference).validate()
            }
        }
    }

    fn candidates(
        &self,
        node: usize,
        hood: &Neighborhoods,
        state: &PropagationState,
    ) -> Vec<Label> {
        match *self {
            RuleKind::Simple => MajorityRule.candidates(node, hood, state),
            RuleKind::HopAttenuation { delta, node_degree_preference } => {
                Self::hop(delta, node_degree_preference).candidates(node, hood, state)
            }
        }
    }

    fn confirms_convergence(&self) -> bool {
        matches!(self, RuleKind::Simple)
    }

    fn redraws_maximal(&self) -> bool {
        matches!(self, RuleKind::Simple)
    }

    fn uses_scores(&self) -> bool {
        matches!(self, RuleKind::HopAttenuation { .. })
    }

    fn relabeled(&self, node: usize, hood: &Neighborhoods, state: &mut PropagationState) {
        if let RuleKind::HopAttenuation { delta, node_degree_preference } = *self {
            Self::hop(delta, node_degree_preference).relabeled(node, hood, state);
        }
    }
}

/// Full description of a label propagation run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct PropagationConfig {
    /// Update rule.
    pub rule: RuleKind,
    /// Maximum sweeps (default: 1000).
    pub max_iterations: usize,
    /// Fixed seed; `None` uses the thread RNG.
    pub seed: Option<u64>,
    /// What to export into an annotation sink.
    pub export: ExportMode,
}

impl Default for PropagationConfig {
    fn default() -> Self {
        Self {
            rule: RuleKind::Simple,
            max_iterations: 1000,
            seed: None,
            export: ExportMode::None,
        }
    }
}

impl PropagationConfig {
    /// Validate and turn into a detector.
    pub fn build(&self) -> Result<LabelPropagation<RuleKind>> {
        if self.max_iterations == 0 {
            return Err(Error::InvalidParameter {
                name: "max_iterations",
                message: "must be at least 1".into(),
            });
        }
        self.rule.validate()?;

        let mut detector = LabelPropagation::with_rule(self.rule)
            .with_max_iter(self.max_iterations)
            .with_export(self.export);
        if let Some(seed) = self.seed {
            detector = detector.with_seed(seed);
        }
        Ok(detector)
    }
}
