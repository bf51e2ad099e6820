//! # labelprop
//!
//! Community detection by label propagation over undirected, optionally
//! weighted graphs.
//!
//! - [`community`]: the sweep driver and its two update rules (simple
//!   majority, hop attenuation with node degree preference).
//! - [`graph`]: the read-only [`GraphAccessor`] the engine consumes, with an
//!   implementation for `petgraph` graphs.
//! - [`history`]: opaque [`Label`] tokens and the per-sweep [`History`].
//! - [`annotate`]: exporting final labels or the whole history as
//!   categorical columns into an [`AnnotationSink`].

pub mod annotate;
pub mod community;
/// Error types used across `labelprop`.
pub mod error;
pub mod graph;
pub mod history;

pub use annotate::{AnnotationSink, CategoricalColumn, ExportMode, ItemTable};
pub use community::{
    run_hop_attenuation, run_simple, CommunityDetection, HopAttenuation, LabelPropagation,
    MajorityRule, Propagation, PropagationConfig, RuleKind, UpdateRule,
};
pub use error::{Error, Result};
pub use graph::{EdgeWeight, GraphAccessor};
pub use history::{History, Label};
