//! gc-app: shared application service layer for gridcarbon.
//!
//! Centralizes dataset loading (with its readiness gate), request
//! computation, and run-record bookkeeping behind one interface so
//! frontends stay thin.

pub mod compute_service;
pub mod error;
pub mod sources;
pub mod state;

pub use compute_service::{ComputeOutcome, compute, make_record, rerun_record};
pub use error::{AppError, AppResult};
pub use sources::{DataSourcesConfig, FsTableSource, TableFiles, TableSource, fetch_tables};
pub use state::AppState;
