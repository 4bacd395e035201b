//! SQLite Results Store
//!
//! Local database of experiments, trials, and per-trial values.
//! `trial_values` holds one row per (trial, column) cell; loading an
//! experiment pivots those cells into a column-oriented frame.

use crate::{ExperimentSource, StorageError};
use rusqlite::{params, Connection};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;
use trialscope_frame::{well_known, Column, ResultsFrame};

const DDL: &str = "
CREATE TABLE IF NOT EXISTS experiments (
    exp_id      TEXT PRIMARY KEY,
    description TEXT
);
CREATE TABLE IF NOT EXISTS trials (
    exp_id            TEXT NOT NULL REFERENCES experiments(exp_id),
    trial_id          INTEGER NOT NULL,
    tunable_config_id INTEGER NOT NULL,
    status            TEXT NOT NULL,
    PRIMARY KEY (exp_id, trial_id)
);
CREATE TABLE IF NOT EXISTS trial_values (
    exp_id   TEXT NOT NULL,
    trial_id INTEGER NOT NULL,
    [column] TEXT NOT NULL,
    value    TEXT,
    PRIMARY KEY (exp_id, trial_id, [column]),
    FOREIGN KEY (exp_id, trial_id) REFERENCES trials(exp_id, trial_id)
);
CREATE INDEX IF NOT EXISTS idx_trial_values_exp ON trial_values(exp_id, [column]);
";

/// Store of experiment results in a local SQLite file.
///
/// Opening is an explicit, fallible step; there is no ambient global
/// connection.
pub struct ResultsStore {
    conn: Connection,
}

impl ResultsStore {
    /// Open (creating if absent) the database at `path`.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        conn.execute("PRAGMA foreign_keys = ON", [])?;
        conn.execute_batch(DDL)?;
        debug!(path = %path.display(), "opened results store");
        Ok(Self { conn })
    }

    /// Open an in-memory database (tests and scratch work).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(DDL)?;
        Ok(Self { conn })
    }

    /// Register an experiment.
    pub fn insert_experiment(
        &self,
        exp_id: &str,
        description: Option<&str>,
    ) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO experiments(exp_id, description) VALUES (?1, ?2)
             ON CONFLICT(exp_id) DO UPDATE SET description=excluded.description",
            params![exp_id, description],
        )?;
        Ok(())
    }

    /// Record one trial and its cell values in a single transaction.
    pub fn insert_trial(
        &mut self,
        exp_id: &str,
        trial_id: i64,
        tunable_config_id: i64,
        status: &str,
        values: &[(&str, &str)],
    ) -> Result<(), StorageError> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO trials(exp_id, trial_id, tunable_config_id, status)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(exp_id, trial_id) DO UPDATE SET
                tunable_config_id=excluded.tunable_config_id,
                status=excluded.status",
            params![exp_id, trial_id, tunable_config_id, status],
        )?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO trial_values(exp_id, trial_id, [column], value)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(exp_id, trial_id, [column]) DO UPDATE SET value=excluded.value",
            )?;
            for (column, value) in values {
                stmt.execute(params![exp_id, trial_id, column, value])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// Description of one experiment, if registered.
    pub fn description(&self, exp_id: &str) -> Result<Option<String>, StorageError> {
        let mut stmt = self
            .conn
            .prepare("SELECT description FROM experiments WHERE exp_id = ?1")?;
        let mut rows = stmt.query(params![exp_id])?;
        match rows.next()? {
            Some(row) => Ok(row.get(0)?),
            None => Err(StorageError::UnknownExperiment(exp_id.to_string())),
        }
    }

    fn load_frame(&self, exp_id: &str) -> Result<ResultsFrame, StorageError> {
        let known: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM experiments WHERE exp_id = ?1",
            params![exp_id],
            |r| r.get(0),
        )?;
        if known == 0 {
            return Err(StorageError::UnknownExperiment(exp_id.to_string()));
        }

        // Trial spine in trial_id order
        let mut stmt = self.conn.prepare(
            "SELECT trial_id, tunable_config_id, status
             FROM trials WHERE exp_id = ?1 ORDER BY trial_id ASC",
        )?;
        let spine: Vec<(i64, i64, String)> = stmt
            .query_map(params![exp_id], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?))
            })?
            .collect::<Result<_, _>>()?;

        let row_of: HashMap<i64, usize> = spine
            .iter()
            .enumerate()
            .map(|(i, (trial_id, _, _))| (*trial_id, i))
            .collect();

        // Pivot cells into per-column vectors aligned with the spine
        let mut col_names: Vec<String> = Vec::new();
        let mut cells: HashMap<String, Vec<Option<String>>> = HashMap::new();

        let mut stmt = self.conn.prepare(
            "SELECT trial_id, [column], value
             FROM trial_values WHERE exp_id = ?1 ORDER BY [column] ASC, trial_id ASC",
        )?;
        let mut rows = stmt.query(params![exp_id])?;
        while let Some(row) = rows.next()? {
            let trial_id: i64 = row.get(0)?;
            let column: String = row.get(1)?;
            let value: Option<String> = row.get(2)?;
            let Some(&idx) = row_of.get(&trial_id) else {
                continue;
            };
            let bucket = cells.entry(column.clone()).or_insert_with(|| {
                col_names.push(column);
                vec![None; spine.len()]
            });
            bucket[idx] = value;
        }

        let mut frame = ResultsFrame::new();
        frame.push_column(
            well_known::TRIAL_ID,
            Column::Int(spine.iter().map(|(t, _, _)| Some(*t)).collect()),
        )?;
        frame.push_column(
            well_known::TUNABLE_CONFIG_ID,
            Column::Int(spine.iter().map(|(_, c, _)| Some(*c)).collect()),
        )?;
        frame.push_column(
            well_known::STATUS,
            Column::Text(spine.iter().map(|(_, _, s)| Some(s.clone())).collect()),
        )?;
        for name in col_names {
            let values = cells.remove(&name).unwrap_or_default();
            frame.push_column(&name, classify(values))?;
        }

        debug!(
            experiment = exp_id,
            rows = frame.rows(),
            columns = frame.column_names().len(),
            "loaded results frame"
        );
        Ok(frame)
    }
}

/// Narrowest column type that holds every present cell: integer, then
/// float, then text.
fn classify(values: Vec<Option<String>>) -> Column {
    let present: Vec<&str> = values.iter().flatten().map(String::as_str).collect();
    if !present.is_empty() && present.iter().all(|s| s.parse::<i64>().is_ok()) {
        return Column::Int(
            values
                .iter()
                .map(|v| v.as_ref().and_then(|s| s.parse().ok()))
                .collect(),
        );
    }
    if !present.is_empty() && present.iter().all(|s| s.parse::<f64>().is_ok()) {
        return Column::Float(
            values
                .iter()
                .map(|v| v.as_ref().and_then(|s| s.parse().ok()))
                .collect(),
        );
    }
    Column::Text(values)
}

impl ExperimentSource for ResultsStore {
    fn experiment_ids(&self) -> Result<Vec<String>, StorageError> {
        let mut stmt = self
            .conn
            .prepare("SELECT exp_id FROM experiments ORDER BY exp_id ASC")?;
        let ids = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(ids)
    }

    fn results_frame(&self, experiment_id: &str) -> Result<ResultsFrame, StorageError> {
        self.load_frame(experiment_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trialscope_frame::Key;

    fn seeded_store() -> ResultsStore {
        let mut store = ResultsStore::open_in_memory().unwrap();
        store.insert_experiment("exp-1", Some("cache tuning")).unwrap();
        store
            .insert_trial(
                "exp-1",
                1,
                10,
                "SUCCEEDED",
                &[("config.cache_mb", "64"), ("result.latency", "12.5")],
            )
            .unwrap();
        store
            .insert_trial(
                "exp-1",
                2,
                11,
                "FAILED",
                &[("config.cache_mb", "128")],
            )
            .unwrap();
        store
    }

    #[test]
    fn test_experiment_ids_sorted() {
        let store = seeded_store();
        store.insert_experiment("exp-0", None).unwrap();
        assert_eq!(store.experiment_ids().unwrap(), vec!["exp-0", "exp-1"]);
    }

    #[test]
    fn test_frame_pivots_cells() {
        let store = seeded_store();
        let frame = store.results_frame("exp-1").unwrap();
        assert_eq!(frame.rows(), 2);
        assert_eq!(
            frame.numeric("result.latency").unwrap(),
            vec![Some(12.5), None]
        );
        assert_eq!(
            frame.group_keys(well_known::TUNABLE_CONFIG_ID).unwrap(),
            vec![Key::Int(10), Key::Int(11)]
        );
    }

    #[test]
    fn test_integer_cells_become_int_column() {
        let store = seeded_store();
        let frame = store.results_frame("exp-1").unwrap();
        assert!(matches!(
            frame.column("config.cache_mb"),
            Some(Column::Int(_))
        ));
    }

    #[test]
    fn test_unknown_experiment() {
        let store = seeded_store();
        assert!(matches!(
            store.results_frame("exp-404"),
            Err(StorageError::UnknownExperiment(_))
        ));
    }

    #[test]
    fn test_open_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.db");
        let store = ResultsStore::open(&path).unwrap();
        assert!(store.experiment_ids().unwrap().is_empty());
        assert!(path.exists());
    }
}
