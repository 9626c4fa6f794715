//! gc-dataset: reference data model, loading, and carbon-intensity
//! resolution.
//!
//! The dataset is assembled once per load cycle from six delimited text
//! tables and is immutable afterwards; a reload rebuilds it wholesale.

pub mod loader;
pub mod model;
pub mod resolver;
pub mod schema;
pub mod synth;

pub use loader::{LoadOptions, RawTables, load};
pub use model::{CpuSpec, Provider, ReferenceDataset, Region, cpu_key};
pub use resolver::{base_zone_code, resolve_carbon_intensity};
pub use schema::{CarbonSchema, TableSchemas};
pub use synth::SynthesizedRegions;

pub type DatasetResult<T> = Result<T, DatasetError>;

#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    #[error("Table '{table}' has no header row starting with '{keyword}'")]
    MissingHeader {
        table: &'static str,
        keyword: &'static str,
    },

    #[error("Table '{table}' contains no data rows")]
    EmptyTable { table: &'static str },
}
