//! Footprint arithmetic.

use gc_dataset::{CpuSpec, ReferenceDataset, Region};
use serde::{Deserialize, Serialize};

use crate::request::WorkloadRequest;
use crate::{EngineError, EngineResult};

/// Output of one estimation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootprintResult {
    pub energy_kwh: f64,
    pub carbon_kg: f64,
    pub total_trials: u64,
    pub total_hours: f64,
    pub machine_power_w: f64,
}

/// Core energy/carbon formula.
///
///   machine_power_w = tdp_w * cpu_count + memory_gb * mem_power
///   energy_kwh      = (machine_power_w / 1000) * total_hours * pue
///   carbon_kg       = (energy_kwh * ci) / 1000
pub fn estimate(
    cpu: &CpuSpec,
    cpu_count: u32,
    memory_gb: f64,
    mem_power_w_per_gb: f64,
    region: &Region,
    total_trials: u64,
    total_hours: f64,
) -> FootprintResult {
    let cpu_power_w = cpu.tdp_w * cpu_count as f64;
    let memory_power_w = memory_gb * mem_power_w_per_gb;
    let machine_power_w = cpu_power_w + memory_power_w;
    let energy_kwh = (machine_power_w / 1000.0) * total_hours * region.pue;
    let carbon_kg = (energy_kwh * region.carbon_intensity_g_per_kwh) / 1000.0;

    FootprintResult {
        energy_kwh,
        carbon_kg,
        total_trials,
        total_hours,
        machine_power_w,
    }
}

/// Validate a request, resolve its selections against the dataset, and
/// estimate. Fails with `InvalidInput` before any lookup and with
/// `UnresolvedSelection` when a stale key no longer exists.
pub fn estimate_for_request(
    dataset: &ReferenceDataset,
    request: &WorkloadRequest,
) -> EngineResult<FootprintResult> {
    request.validate()?;

    let provider =
        dataset
            .provider(&request.provider_code)
            .ok_or_else(|| EngineError::UnresolvedSelection {
                kind: "provider",
                key: request.provider_code.clone(),
            })?;
    let region = provider.regions.get(&request.region_name).ok_or_else(|| {
        EngineError::UnresolvedSelection {
            kind: "region",
            key: request.region_name.clone(),
        }
    })?;
    let cpu = dataset
        .cpu(&request.cpu_key)
        .ok_or_else(|| EngineError::UnresolvedSelection {
            kind: "cpu",
            key: request.cpu_key.clone(),
        })?;

    let mem_power = request
        .mem_power_w_per_gb
        .unwrap_or(dataset.default_mem_power_w_per_gb);

    Ok(estimate(
        cpu,
        request.cpu_count,
        request.memory_gb,
        mem_power,
        region,
        request.total_trials(),
        request.total_hours(),
    ))
}
