//! Application state and the dataset readiness gate.
//!
//! The reference dataset is read-mostly shared state: written once per
//! load cycle, read by every computation. Computation is gated on
//! readiness, and a reload drops readiness before touching anything so no
//! partial dataset is ever observable.

use gc_dataset::{LoadOptions, ReferenceDataset};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::sources::{DataSourcesConfig, TableSource, fetch_tables};

#[derive(Default)]
pub struct AppState {
    dataset: Option<ReferenceDataset>,
    dataset_version: String,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ready(&self) -> bool {
        self.dataset.is_some()
    }

    /// The loaded dataset, or `DatasetUnavailable` when no load has
    /// succeeded yet.
    pub fn dataset(&self) -> AppResult<&ReferenceDataset> {
        self.dataset
            .as_ref()
            .ok_or_else(|| AppError::DatasetUnavailable("no dataset loaded".to_string()))
    }

    /// Version label of the loaded dataset, recorded into run records.
    pub fn dataset_version(&self) -> &str {
        &self.dataset_version
    }

    /// Fetch all tables and rebuild the dataset wholesale. On any
    /// failure the state is left not-ready; there is no partial load.
    pub fn load_dataset(
        &mut self,
        source: &dyn TableSource,
        config: &DataSourcesConfig,
        options: &LoadOptions,
    ) -> AppResult<()> {
        self.dataset = None;

        let raw = fetch_tables(source, config)?;
        let dataset = gc_dataset::load(&raw, options)?;

        info!(version = %config.version, "dataset ready");
        self.dataset = Some(dataset);
        self.dataset_version = config.version.clone();
        Ok(())
    }
}
