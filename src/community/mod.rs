//! Community detection by label propagation.
//!
//! Given an undirected graph, find groups of nodes that end up sharing a
//! label after labels have spread along edges until no node wants to switch.
//!
//! ## Algorithms
//!
//! Both algorithms run on the same sweep driver, [`LabelPropagation`], and
//! differ only in the per-node [`UpdateRule`].
//!
//! ### Simple majority ([`MajorityRule`])
//!
//! Each node adopts the label most of its neighbors carry
//! ([Raghavan et al. 2007](https://arxiv.org/abs/0709.2938)). Ties are broken
//! at random and re-broken on every visit. A quiet sweep is confirmed by a
//! read-only pass before the run stops.
//!
//! ### Hop attenuation ([`HopAttenuation`])
//!
//! Neighbor votes are weighted by a per-node score, the neighbor's degree
//! raised to a preference exponent, and the edge weight
//! ([Leung et al. 2009](https://arxiv.org/abs/0808.2633)). Scores decay on
//! every relabel, so labels weaken as they travel. A quiet sweep ends the run.
//!
//! ## Usage
//!
//! ```rust
//! use petgraph::graph::UnGraph;
//! use labelprop::community::{CommunityDetection, LabelPropagation};
//!
//! // Build a graph
//! let mut graph = UnGraph::<(), ()>::new_undirected();
//! let a = graph.add_node(());
//! let b = graph.add_node(());
//! let c = graph.add_node(());
//! graph.add_edge(a, b, ());
//! graph.add_edge(b, c, ());
//!
//! // Detect communities
//! let lp = LabelPropagation::new().with_seed(42);
//! let communities = lp.detect(&graph).unwrap();
//! // communities[i] = community ID for node i
//! assert_eq!(communities.len(), 3);
//! ```
//!
//! ## References
//!
//! - Raghavan, Albert, Kumara (2007). "Near linear time algorithm to detect
//!   community structures in large-scale networks." Phys. Rev. E 76, 036106.
//! - Leung, Hui, Liò, Crowcroft (2009). "Towards real-time community
//!   detection in large networks." Phys. Rev. E 79, 066107.

mod config;
mod hop_attenuation;
mod label_prop;
mod majority;
mod traits;

pub use config::{PropagationConfig, RuleKind};
pub use hop_attenuation::HopAttenuation;
pub use label_prop::{
    run_hop_attenuation, run_simple, LabelPropagation, Propagation, PropagationState,
};
pub use majority::MajorityRule;
pub use traits::{CommunityDetection, UpdateRule};
