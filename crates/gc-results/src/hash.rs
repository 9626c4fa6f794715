//! Content-based hashing for run IDs.

use gc_engine::WorkloadRequest;
use sha2::{Digest, Sha256};

pub fn compute_run_id(request: &WorkloadRequest, dataset_version: &str) -> String {
    let mut hasher = Sha256::new();

    let request_json = serde_json::to_string(request).unwrap_or_default();
    hasher.update(request_json.as_bytes());
    hasher.update(dataset_version.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}
