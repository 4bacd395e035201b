//! Typed Columns
//!
//! A column is a homogeneous vector of optional cells. Text columns can be
//! coerced to numeric on demand; cells that fail to parse (or parse to a
//! non-finite value) coerce to `None`, mirroring the lossy coercion the
//! rest of the toolkit relies on.

use serde::{Deserialize, Serialize};

/// One typed column of a results frame
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// 64-bit floats with missing cells
    Float(Vec<Option<f64>>),
    /// 64-bit integers with missing cells
    Int(Vec<Option<i64>>),
    /// Text cells (status, categorical parameters)
    Text(Vec<Option<String>>),
}

impl Column {
    /// Number of cells (including missing ones)
    pub fn len(&self) -> usize {
        match self {
            Column::Float(v) => v.len(),
            Column::Int(v) => v.len(),
            Column::Text(v) => v.len(),
        }
    }

    /// True if the column has no cells
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Numeric view of the column.
    ///
    /// Float cells pass through when finite, int cells convert exactly,
    /// text cells parse as `f64`. Everything else becomes `None`.
    pub fn numeric(&self) -> Vec<Option<f64>> {
        match self {
            Column::Float(v) => v
                .iter()
                .map(|c| c.filter(|x| x.is_finite()))
                .collect(),
            Column::Int(v) => v.iter().map(|c| c.map(|x| x as f64)).collect(),
            Column::Text(v) => v
                .iter()
                .map(|c| {
                    c.as_deref()
                        .and_then(|s| s.trim().parse::<f64>().ok())
                        .filter(|x| x.is_finite())
                })
                .collect(),
        }
    }

    /// Grouping key of the cell at `row`, or `None` for a missing cell.
    pub fn key_at(&self, row: usize) -> Option<Key> {
        match self {
            Column::Float(v) => v.get(row).copied().flatten().map(|x| {
                // Float group keys are rare; fall back to the text rendering
                Key::Text(format!("{x}"))
            }),
            Column::Int(v) => v.get(row).copied().flatten().map(Key::Int),
            Column::Text(v) => v
                .get(row)
                .and_then(|c| c.as_ref())
                .map(|s| Key::Text(s.clone())),
        }
    }
}

/// Value of a grouping column (configuration id, experiment id, status).
///
/// Integer and text keys cover everything the storage layer emits;
/// ordering and hashing make keys usable as stable group identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    /// Numeric id, e.g. `tunable_config_id`
    Int(i64),
    /// Text id, e.g. a status value or experiment name
    Text(String),
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Key::Int(i) => write!(f, "{i}"),
            Key::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for Key {
    fn from(v: i64) -> Self {
        Key::Int(v)
    }
}

impl From<&str> for Key {
    fn from(v: &str) -> Self {
        Key::Text(v.to_string())
    }
}
