//! Data-source configuration and table fetching.
//!
//! The six raw tables are fetched by an I/O collaborator behind the
//! `TableSource` trait. Fetches run as concurrent independent reads that
//! must all complete before the loader sees any of them; one failure
//! fails the whole fetch.

use std::path::{Path, PathBuf};
use std::thread;

use serde::{Deserialize, Serialize};
use tracing::warn;

use gc_dataset::{CarbonSchema, RawTables, TableSchemas};

use crate::error::{AppError, AppResult};

/// File names of the source tables, relative to the configured base
/// directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableFiles {
    pub providers: String,
    pub datacenters: String,
    pub default_pue: String,
    pub carbon: String,
    pub cpus: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hardware: Option<String>,
}

impl Default for TableFiles {
    fn default() -> Self {
        Self {
            providers: "providersNamesCodes.csv".to_string(),
            datacenters: "cloudProviders_datacenters.csv".to_string(),
            default_pue: "default_PUE.csv".to_string(),
            carbon: "CI_aggregated.csv".to_string(),
            cpus: "CPUs.csv".to_string(),
            hardware: None,
        }
    }
}

/// Which built-in carbon-table layout to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CarbonSchemaKind {
    #[default]
    Aggregated,
    ElectricityMap,
}

impl CarbonSchemaKind {
    pub fn schema(self) -> CarbonSchema {
        match self {
            CarbonSchemaKind::Aggregated => CarbonSchema::aggregated(),
            CarbonSchemaKind::ElectricityMap => CarbonSchema::electricity_map(),
        }
    }
}

/// YAML-backed configuration naming the dataset location and layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSourcesConfig {
    pub base_dir: PathBuf,
    /// Version label recorded in run records; a dataset swap changes it.
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub carbon_schema: CarbonSchemaKind,
    #[serde(default)]
    pub files: TableFiles,
}

fn default_version() -> String {
    "v3.0".to_string()
}

impl Default for DataSourcesConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("data"),
            version: default_version(),
            carbon_schema: CarbonSchemaKind::default(),
            files: TableFiles::default(),
        }
    }
}

impl DataSourcesConfig {
    pub fn load_yaml(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| AppError::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_yaml::from_str(&content).map_err(|e| AppError::ConfigParse(e.to_string()))
    }

    pub fn schemas(&self) -> TableSchemas {
        TableSchemas::with_carbon(self.carbon_schema.schema())
    }
}

/// I/O collaborator handing raw table text to the loader.
pub trait TableSource: Sync {
    fn fetch(&self, name: &str) -> std::io::Result<String>;
}

/// Filesystem-backed source rooted at a base directory.
pub struct FsTableSource {
    base_dir: PathBuf,
}

impl FsTableSource {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn for_config(config: &DataSourcesConfig) -> Self {
        Self::new(config.base_dir.clone())
    }
}

impl TableSource for FsTableSource {
    fn fetch(&self, name: &str) -> std::io::Result<String> {
        std::fs::read_to_string(self.base_dir.join(name))
    }
}

/// Fetch all configured tables concurrently. Every required table must
/// succeed; a missing optional hardware table is only a warning.
pub fn fetch_tables(source: &dyn TableSource, config: &DataSourcesConfig) -> AppResult<RawTables> {
    let files = &config.files;

    fn join(handle: thread::ScopedJoinHandle<'_, std::io::Result<String>>) -> std::io::Result<String> {
        handle
            .join()
            .unwrap_or_else(|_| Err(std::io::Error::other("fetch thread panicked")))
    }

    let (providers, datacenters, default_pue, carbon, cpus, hardware) = thread::scope(|scope| {
        let providers = scope.spawn(|| source.fetch(&files.providers));
        let datacenters = scope.spawn(|| source.fetch(&files.datacenters));
        let default_pue = scope.spawn(|| source.fetch(&files.default_pue));
        let carbon = scope.spawn(|| source.fetch(&files.carbon));
        let cpus = scope.spawn(|| source.fetch(&files.cpus));
        let hardware = files
            .hardware
            .as_deref()
            .map(|name| scope.spawn(move || source.fetch(name)));
        (
            join(providers),
            join(datacenters),
            join(default_pue),
            join(carbon),
            join(cpus),
            hardware.map(join),
        )
    });

    let mut failures: Vec<String> = Vec::new();
    let mut take = |name: &str, result: std::io::Result<String>| match result {
        Ok(text) => Some(text),
        Err(e) => {
            failures.push(format!("{name}: {e}"));
            None
        }
    };
    let providers = take(&files.providers, providers);
    let datacenters = take(&files.datacenters, datacenters);
    let default_pue = take(&files.default_pue, default_pue);
    let carbon = take(&files.carbon, carbon);
    let cpus = take(&files.cpus, cpus);

    let hardware = match hardware {
        Some(Ok(text)) => Some(text),
        Some(Err(e)) => {
            warn!(error = %e, "optional hardware-defaults table unavailable, skipping");
            None
        }
        None => None,
    };

    if let (Some(providers), Some(datacenters), Some(default_pue), Some(carbon), Some(cpus)) =
        (providers, datacenters, default_pue, carbon, cpus)
    {
        Ok(RawTables {
            providers,
            datacenters,
            default_pue,
            carbon,
            cpus,
            hardware,
        })
    } else {
        Err(AppError::DatasetUnavailable(failures.join("; ")))
    }
}
