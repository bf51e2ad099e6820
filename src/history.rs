//! Label tokens and per-iteration label snapshots.

use std::collections::BTreeSet;
use std::fmt;

/// Community label carried by a node.
///
/// Labels are opaque: they are ordered and hashable, and only turn into text
/// at the export boundary. A run starts with `Label(v)` on node `v`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Label(pub usize);

impl Label {
    /// Underlying token.
    pub fn id(self) -> usize {
        self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for Label {
    fn from(id: usize) -> Self {
        Label(id)
    }
}

/// Labels of every node after each completed sweep, in node order.
///
/// Snapshot `i` is the assignment after sweep `i` finished and before
/// sweep `i + 1` started.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct History {
    snapshots: Vec<Vec<Label>>,
}

impl History {
    /// Empty history.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, labels: &[Label]) {
        self.snapshots.push(labels.to_vec());
    }

    /// Number of recorded sweeps.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// True if no sweep was recorded.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Snapshot after sweep `iteration`.
    pub fn snapshot(&self, iteration: usize) -> Option<&[Label]> {
        self.snapshots.get(iteration).map(Vec::as_slice)
    }

    /// First recorded snapshot.
    pub fn first(&self) -> Option<&[Label]> {
        self.snapshots.first().map(Vec::as_slice)
    }

    /// Most recent snapshot.
    pub fn last(&self) -> Option<&[Label]> {
        self.snapshots.last().map(Vec::as_slice)
    }

    /// Iterate snapshots in sweep order.
    pub fn iter(&self) -> impl Iterator<Item = &[Label]> {
        self.snapshots.iter().map(Vec::as_slice)
    }

    /// Distinct labels present after sweep `iteration`.
    pub fn label_set(&self, iteration: usize) -> Option<BTreeSet<Label>> {
        self.snapshot(iteration)
            .map(|labels| labels.iter().copied().collect())
    }

    /// Labels of `node` across all sweeps.
    pub fn trajectory(&self, node: usize) -> Vec<Label> {
        self.snapshots
            .iter()
            .filter_map(|s| s.get(node).copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(ids: &[usize]) -> Vec<Label> {
        ids.iter().copied().map(Label).collect()
    }

    #[test]
    fn test_history_records_in_order() {
        let mut history = History::new();
        assert!(history.is_empty());
        assert!(history.last().is_none());

        history.record(&labels(&[0, 0, 2]));
        history.record(&labels(&[0, 0, 0]));

        assert_eq!(history.len(), 2);
        assert_eq!(history.first(), Some(&labels(&[0, 0, 2])[..]));
        assert_eq!(history.last(), Some(&labels(&[0, 0, 0])[..]));
        assert_eq!(history.trajectory(2), labels(&[2, 0]));
        assert!(history.snapshot(2).is_none());
    }

    #[test]
    fn test_label_set_is_distinct_and_sorted() {
        let mut history = History::new();
        history.record(&labels(&[3, 1, 3, 0]));
        let set: Vec<Label> = history.label_set(0).unwrap().into_iter().collect();
        assert_eq!(set, labels(&[0, 1, 3]));
    }

    #[test]
    fn test_label_display_is_bare_token() {
        assert_eq!(Label(17).to_string(), "17");
        assert_eq!(Label::from(4).id(), 4);
    }
}
