//! Exporting labels as categorical item annotations.
//!
//! A run can attach its result to an item collection keyed by node, either
//! as a single column holding the final labels or as one column per sweep.
//! Labels become strings only here.

use crate::error::{Error, Result};
use crate::history::{History, Label};
use std::collections::BTreeSet;

/// Name of the column written in [`ExportMode::Final`].
pub const FINAL_COLUMN: &str = "clustering label propagation";

/// Which part of a run is materialized into an [`AnnotationSink`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ExportMode {
    /// Nothing is exported.
    #[default]
    None,
    /// One column with the final labels.
    Final,
    /// One column per completed sweep (`c0`, `c1`, ...).
    History,
}

impl ExportMode {
    /// Combine the two export switches. History export wins when both are set.
    pub fn from_flags(results_to_items: bool, history_to_items: bool) -> Self {
        match (results_to_items, history_to_items) {
            (_, true) => ExportMode::History,
            (true, false) => ExportMode::Final,
            (false, false) => ExportMode::None,
        }
    }
}

/// Column of categorical values, one row per node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoricalColumn {
    name: String,
    /// Declared domain, in label order.
    values: Vec<String>,
    rows: Vec<String>,
}

impl CategoricalColumn {
    /// Build a column, checking that every row is in the declared domain.
    pub fn new(name: impl Into<String>, values: Vec<String>, rows: Vec<String>) -> Result<Self> {
        let domain: BTreeSet<&str> = values.iter().map(String::as_str).collect();
        if let Some(bad) = rows.iter().find(|r| !domain.contains(r.as_str())) {
            return Err(Error::InvalidParameter {
                name: "rows",
                message: format!("value '{bad}' is not in the column domain"),
            });
        }
        Ok(Self {
            name: name.into(),
            values,
            rows,
        })
    }

    /// Build a column from labels with the given label domain.
    fn from_labels(name: String, domain: &BTreeSet<Label>, labels: &[Label]) -> Result<Self> {
        Self::new(
            name,
            domain.iter().map(Label::to_string).collect(),
            labels.iter().map(Label::to_string).collect(),
        )
    }

    /// Column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared domain.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Row values in node order.
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Receiver of exported annotation columns.
pub trait AnnotationSink {
    /// Attach columns whose rows follow canonical node order.
    fn attach(&mut self, columns: Vec<CategoricalColumn>) -> Result<()>;
}

/// In-memory item collection.
///
/// An empty table takes the attached columns as its whole content; a
/// non-empty one appends them side by side with what it already holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemTable {
    columns: Vec<CategoricalColumn>,
}

impl ItemTable {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Table from existing columns, which must agree on row count.
    pub fn from_columns(columns: Vec<CategoricalColumn>) -> Result<Self> {
        let mut table = Self::new();
        table.attach(columns)?;
        Ok(table)
    }

    /// Number of rows (0 for an empty table).
    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, CategoricalColumn::len)
    }

    /// Number of columns.
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// True when the table holds no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// All columns in insertion order.
    pub fn columns(&self) -> &[CategoricalColumn] {
        &self.columns
    }

    /// Column by name.
    pub fn column(&self, name: &str) -> Option<&CategoricalColumn> {
        self.columns.iter().find(|c| c.name() == name)
    }
}

impl AnnotationSink for ItemTable {
    fn attach(&mut self, columns: Vec<CategoricalColumn>) -> Result<()> {
        let expected = match self.columns.first().or_else(|| columns.first()) {
            Some(c) => c.len(),
            None => return Ok(()),
        };
        if let Some(bad) = columns.iter().find(|c| c.len() != expected) {
            return Err(Error::ShapeMismatch {
                expected: format!("{expected} rows"),
                actual: format!("{} rows in column '{}'", bad.len(), bad.name()),
            });
        }
        self.columns.extend(columns);
        Ok(())
    }
}

/// Single column holding `labels`, with their distinct values as domain.
pub fn final_column(labels: &[Label]) -> Result<CategoricalColumn> {
    let domain: BTreeSet<Label> = labels.iter().copied().collect();
    CategoricalColumn::from_labels(FINAL_COLUMN.to_string(), &domain, labels)
}

/// One column per recorded sweep, all sharing the first sweep's label set
/// as domain.
pub fn history_columns(history: &History) -> Result<Vec<CategoricalColumn>> {
    let domain = history.label_set(0).ok_or(Error::EmptyHistory)?;
    history
        .iter()
        .enumerate()
        .map(|(i, snapshot)| CategoricalColumn::from_labels(format!("c{i}"), &domain, snapshot))
        .collect()
}
