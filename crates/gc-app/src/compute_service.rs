//! Computation entry points joining the dataset, engine, and run records.

use chrono::Utc;
use gc_engine::{
    EngineError, FootprintResult, RegionComparisonRow, WorkloadRequest, compare_regions,
    estimate_for_request,
};
use gc_results::{RunRecord, compute_run_id};

use crate::error::AppResult;
use crate::state::AppState;

/// Everything one computation produces for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputeOutcome {
    pub result: FootprintResult,
    pub comparison: Vec<RegionComparisonRow>,
}

/// Validate, resolve, estimate, and rank regions for one request.
pub fn compute(state: &AppState, request: &WorkloadRequest) -> AppResult<ComputeOutcome> {
    let dataset = state.dataset()?;
    let result = estimate_for_request(dataset, request)?;

    let provider = dataset
        .provider(&request.provider_code)
        .ok_or_else(|| EngineError::UnresolvedSelection {
            kind: "provider",
            key: request.provider_code.clone(),
        })?;
    let comparison = compare_regions(
        provider,
        result.machine_power_w,
        result.total_hours,
        &request.region_name,
    );

    Ok(ComputeOutcome { result, comparison })
}

/// Snapshot a computed request/result pair as a run record.
pub fn make_record(state: &AppState, request: &WorkloadRequest, result: &FootprintResult) -> RunRecord {
    let dataset_version = state.dataset_version().to_string();
    RunRecord {
        run_id: compute_run_id(request, &dataset_version),
        timestamp: Utc::now().to_rfc3339(),
        dataset_version,
        request: request.clone(),
        result: result.clone(),
    }
}

/// Re-run a stored record's request against the current dataset. Against
/// an unchanged dataset this reproduces the stored result exactly; after
/// a reload it may fail with `UnresolvedSelection` for stale keys.
pub fn rerun_record(state: &AppState, record: &RunRecord) -> AppResult<ComputeOutcome> {
    compute(state, &record.request)
}
