//! Run record data types.

use gc_engine::{FootprintResult, WorkloadRequest};
use serde::{Deserialize, Serialize};

pub type RunId = String;

/// One persisted computation: the request as submitted, the result it
/// produced, and when.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub run_id: RunId,
    /// RFC 3339 timestamp of the computation.
    pub timestamp: String,
    /// Version label of the dataset the run was computed against.
    pub dataset_version: String,
    pub request: WorkloadRequest,
    pub result: FootprintResult,
}
