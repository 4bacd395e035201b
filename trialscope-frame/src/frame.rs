//! Results Frame
//!
//! The central table type: named, typed columns over a fixed row count.
//! All analytics in the workspace consume this read-only view; nothing
//! mutates a frame after construction.

use crate::column::{Column, Key};
use crate::{well_known, FrameError};
use fxhash::FxHashMap;

/// Column-oriented table of trial results for one experiment
#[derive(Debug, Clone, Default)]
pub struct ResultsFrame {
    names: Vec<String>,
    index: FxHashMap<String, usize>,
    columns: Vec<Column>,
    rows: usize,
}

impl ResultsFrame {
    /// Create an empty frame
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows (trials)
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// True if the frame has no rows or no columns
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.columns.is_empty()
    }

    /// Column names in insertion order
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// Append a column. The first column fixes the frame's row count.
    pub fn push_column(&mut self, name: &str, column: Column) -> Result<(), FrameError> {
        if self.index.contains_key(name) {
            return Err(FrameError::DuplicateColumn(name.to_string()));
        }
        if !self.columns.is_empty() && column.len() != self.rows {
            return Err(FrameError::LengthMismatch {
                name: name.to_string(),
                expected: self.rows,
                got: column.len(),
            });
        }
        if self.columns.is_empty() {
            self.rows = column.len();
        }
        self.index.insert(name.to_string(), self.columns.len());
        self.names.push(name.to_string());
        self.columns.push(column);
        Ok(())
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.index.get(name).map(|&i| &self.columns[i])
    }

    /// Look up a column, failing with [`FrameError::MissingColumn`]
    pub fn require(&self, name: &str) -> Result<&Column, FrameError> {
        self.column(name).ok_or_else(|| FrameError::MissingColumn {
            name: name.to_string(),
        })
    }

    /// Coerced numeric view of a column (finite values only, `None` elsewhere)
    pub fn numeric(&self, name: &str) -> Result<Vec<Option<f64>>, FrameError> {
        Ok(self.require(name)?.numeric())
    }

    /// Valid (present, finite) numeric values of a column, row order preserved
    pub fn numeric_valid(&self, name: &str) -> Result<Vec<f64>, FrameError> {
        Ok(self.numeric(name)?.into_iter().flatten().collect())
    }

    /// Unique keys of a column in first-appearance order.
    ///
    /// Missing cells contribute no key. The returned order is the stable
    /// enumeration order for pairwise comparisons.
    pub fn group_keys(&self, name: &str) -> Result<Vec<Key>, FrameError> {
        let col = self.require(name)?;
        let mut seen: FxHashMap<Key, ()> = FxHashMap::default();
        let mut keys = Vec::new();
        for row in 0..col.len() {
            if let Some(key) = col.key_at(row) {
                if seen.insert(key.clone(), ()).is_none() {
                    keys.push(key);
                }
            }
        }
        Ok(keys)
    }

    /// Partition the valid numeric values of `target` by the keys of `group_col`.
    ///
    /// Groups appear in first-appearance order of their key. Rows whose
    /// target cell is missing or non-finite are excluded; rows whose group
    /// cell is missing are excluded entirely. Groups that end up with zero
    /// valid observations are still listed (with an empty value vector) so
    /// callers can decide how to treat them.
    pub fn grouped_numeric(
        &self,
        group_col: &str,
        target: &str,
    ) -> Result<Vec<(Key, Vec<f64>)>, FrameError> {
        let groups = self.require(group_col)?;
        let values = self.numeric(target)?;

        let mut order: Vec<Key> = Vec::new();
        let mut buckets: FxHashMap<Key, Vec<f64>> = FxHashMap::default();

        for row in 0..self.rows {
            let Some(key) = groups.key_at(row) else {
                continue;
            };
            let bucket = buckets.entry(key.clone()).or_insert_with(|| {
                order.push(key);
                Vec::new()
            });
            if let Some(Some(v)) = values.get(row) {
                bucket.push(*v);
            }
        }

        Ok(order
            .into_iter()
            .map(|k| {
                let vals = buckets.remove(&k).unwrap_or_default();
                (k, vals)
            })
            .collect())
    }

    /// Valid numeric values of `target` for the rows whose `group_col` equals `key`
    pub fn values_for_group(
        &self,
        group_col: &str,
        target: &str,
        key: &Key,
    ) -> Result<Vec<f64>, FrameError> {
        let groups = self.require(group_col)?;
        let values = self.numeric(target)?;
        let mut out = Vec::new();
        for row in 0..self.rows {
            if groups.key_at(row).as_ref() == Some(key) {
                if let Some(Some(v)) = values.get(row) {
                    out.push(*v);
                }
            }
        }
        Ok(out)
    }

    /// Occurrence counts of each key of a column, first-appearance order
    pub fn value_counts(&self, name: &str) -> Result<Vec<(Key, usize)>, FrameError> {
        let col = self.require(name)?;
        let mut order: Vec<Key> = Vec::new();
        let mut counts: FxHashMap<Key, usize> = FxHashMap::default();
        for row in 0..col.len() {
            if let Some(key) = col.key_at(row) {
                let entry = counts.entry(key.clone()).or_insert_with(|| {
                    order.push(key);
                    0
                });
                *entry += 1;
            }
        }
        Ok(order
            .into_iter()
            .map(|k| {
                let n = counts[&k];
                (k, n)
            })
            .collect())
    }

    /// Names of configuration-parameter columns (`config*`)
    pub fn config_columns(&self) -> Vec<&str> {
        self.columns_with_prefix(well_known::CONFIG_PREFIX)
    }

    /// Names of result-metric columns (`result*`)
    pub fn result_columns(&self) -> Vec<&str> {
        self.columns_with_prefix(well_known::RESULT_PREFIX)
    }

    fn columns_with_prefix(&self, prefix: &str) -> Vec<&str> {
        self.names
            .iter()
            .filter(|n| n.starts_with(prefix))
            .map(|n| n.as_str())
            .collect()
    }

    /// Build a frame from an array of JSON objects (one object per trial).
    ///
    /// This is the shape the HTTP backend returns from
    /// `GET /experiment_results/{id}`. The union of keys across all records
    /// becomes the column set; numbers become float/int columns, everything
    /// else text. A key absent from a record is a missing cell.
    pub fn from_json_records(records: &[serde_json::Value]) -> Result<Self, FrameError> {
        let mut names: Vec<String> = Vec::new();
        let mut seen: FxHashMap<String, ()> = FxHashMap::default();
        for rec in records {
            if let Some(obj) = rec.as_object() {
                for key in obj.keys() {
                    if seen.insert(key.clone(), ()).is_none() {
                        names.push(key.clone());
                    }
                }
            }
        }

        let mut frame = ResultsFrame::new();
        for name in &names {
            let cells: Vec<&serde_json::Value> = records
                .iter()
                .map(|rec| rec.get(name).unwrap_or(&serde_json::Value::Null))
                .collect();

            // A column is integer if every present cell is an integer,
            // float if every present cell is numeric, text otherwise.
            let all_int = cells
                .iter()
                .all(|v| v.is_null() || v.is_i64() || v.is_u64());
            let all_num = cells.iter().all(|v| v.is_null() || v.is_number());

            let column = if all_int && cells.iter().any(|v| v.is_number()) {
                Column::Int(cells.iter().map(|v| v.as_i64()).collect())
            } else if all_num && cells.iter().any(|v| v.is_number()) {
                Column::Float(cells.iter().map(|v| v.as_f64()).collect())
            } else {
                Column::Text(
                    cells
                        .iter()
                        .map(|v| match v {
                            serde_json::Value::Null => None,
                            serde_json::Value::String(s) => Some(s.clone()),
                            other => Some(other.to_string()),
                        })
                        .collect(),
                )
            };
            frame.push_column(name, column)?;
        }
        Ok(frame)
    }
}
