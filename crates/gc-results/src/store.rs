//! Run storage API.
//!
//! One pretty-printed JSON file per run under a root directory. The store
//! keeps at most `MAX_SAVED_RUNS` records; saving past the cap evicts the
//! oldest.

use std::fs;
use std::path::PathBuf;

use crate::types::RunRecord;
use crate::{ResultsError, ResultsResult};

/// Retention cap on stored runs.
pub const MAX_SAVED_RUNS: usize = 12;

#[derive(Clone)]
pub struct RunStore {
    root_dir: PathBuf,
}

impl RunStore {
    pub fn new(root_dir: PathBuf) -> ResultsResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    fn run_path(&self, run_id: &str) -> PathBuf {
        self.root_dir.join(format!("{run_id}.json"))
    }

    pub fn has_run(&self, run_id: &str) -> bool {
        self.run_path(run_id).exists()
    }

    /// Save a record and evict beyond the retention cap. Saving an
    /// existing run id overwrites it in place.
    pub fn save_run(&self, record: &RunRecord) -> ResultsResult<()> {
        let json = serde_json::to_string_pretty(record)?;
        fs::write(self.run_path(&record.run_id), json)?;

        let runs = self.list_runs()?;
        for old in runs.iter().skip(MAX_SAVED_RUNS) {
            fs::remove_file(self.run_path(&old.run_id))?;
        }
        Ok(())
    }

    pub fn load_run(&self, run_id: &str) -> ResultsResult<RunRecord> {
        let path = self.run_path(run_id);
        if !path.exists() {
            return Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            });
        }
        let content = fs::read_to_string(path)?;
        let record = serde_json::from_str(&content)?;
        Ok(record)
    }

    /// All stored runs, newest first. Files that fail to parse are
    /// skipped rather than failing the listing.
    pub fn list_runs(&self) -> ResultsResult<Vec<RunRecord>> {
        let mut runs = Vec::new();

        if !self.root_dir.exists() {
            return Ok(runs);
        }

        for entry in fs::read_dir(&self.root_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json")
                && let Ok(content) = fs::read_to_string(&path)
                && let Ok(record) = serde_json::from_str::<RunRecord>(&content)
            {
                runs.push(record);
            }
        }

        // RFC 3339 timestamps sort lexically; ties broken by run id for a
        // stable order.
        runs.sort_by(|a, b| {
            b.timestamp
                .cmp(&a.timestamp)
                .then_with(|| a.run_id.cmp(&b.run_id))
        });
        Ok(runs)
    }

    pub fn delete_run(&self, run_id: &str) -> ResultsResult<()> {
        let path = self.run_path(run_id);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    pub fn clear(&self) -> ResultsResult<()> {
        for run in self.list_runs()? {
            self.delete_run(&run.run_id)?;
        }
        Ok(())
    }
}
