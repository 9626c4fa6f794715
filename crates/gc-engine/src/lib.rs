//! gc-engine: workload footprint estimation and regional comparison.
//!
//! Pure computation over an already-loaded reference dataset: validated
//! requests in, energy/carbon figures and ranked region rows out. No
//! hidden state; identical inputs give bit-identical outputs.

pub mod compare;
pub mod estimate;
pub mod request;

pub use compare::{RegionComparisonRow, compare_regions};
pub use estimate::{FootprintResult, estimate, estimate_for_request};
pub use request::{TrialCount, WorkloadRequest};

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Invalid input: {field} ({reason})")]
    InvalidInput {
        field: &'static str,
        reason: &'static str,
    },

    #[error("Unresolved selection: no {kind} named '{key}' in the current dataset")]
    UnresolvedSelection { kind: &'static str, key: String },
}
