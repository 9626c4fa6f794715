//! Workload request definition and validation.

use serde::{Deserialize, Serialize};

use crate::{EngineError, EngineResult};

/// How the total trial count is specified. The two modes are mutually
/// exclusive per request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum TrialCount {
    /// Manually specified total.
    Total { total_trials: u64 },
    /// Pair count times trials per pair (e.g., fuzzer/target pairs).
    Pairs { pairs: u64, trials_per_pair: u64 },
}

impl TrialCount {
    pub fn total(&self) -> u64 {
        match *self {
            TrialCount::Total { total_trials } => total_trials,
            TrialCount::Pairs {
                pairs,
                trials_per_pair,
            } => pairs * trials_per_pair,
        }
    }
}

/// One user computation request against the loaded dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadRequest {
    pub provider_code: String,
    pub region_name: String,
    pub cpu_key: String,
    pub cpu_count: u32,
    pub memory_gb: f64,
    /// Watts per GB; `None` uses the dataset default.
    pub mem_power_w_per_gb: Option<f64>,
    /// Duration of one trial, in hours.
    pub duration_h: f64,
    pub trials: TrialCount,
}

impl WorkloadRequest {
    /// Check every pre-condition, naming the offending field. No
    /// computation happens on a request that fails here.
    pub fn validate(&self) -> EngineResult<()> {
        if self.provider_code.trim().is_empty() {
            return invalid("provider_code", "must not be empty");
        }
        if self.region_name.trim().is_empty() {
            return invalid("region_name", "must not be empty");
        }
        if self.cpu_key.trim().is_empty() {
            return invalid("cpu_key", "must not be empty");
        }
        if self.cpu_count == 0 {
            return invalid("cpu_count", "must be a positive integer");
        }
        if !self.memory_gb.is_finite() || self.memory_gb < 0.0 {
            return invalid("memory_gb", "must be finite and >= 0");
        }
        if let Some(mem_power) = self.mem_power_w_per_gb
            && (!mem_power.is_finite() || mem_power < 0.0)
        {
            return invalid("mem_power_w_per_gb", "must be finite and >= 0");
        }
        if !self.duration_h.is_finite() || self.duration_h <= 0.0 {
            return invalid("duration_h", "must be finite and > 0");
        }
        match self.trials {
            TrialCount::Total { total_trials } => {
                if total_trials == 0 {
                    return invalid("total_trials", "must be > 0");
                }
            }
            TrialCount::Pairs {
                pairs,
                trials_per_pair,
            } => {
                if pairs == 0 {
                    return invalid("pairs", "must be > 0");
                }
                if trials_per_pair == 0 {
                    return invalid("trials_per_pair", "must be > 0");
                }
            }
        }
        Ok(())
    }

    /// Derived total trial count from the active mode.
    pub fn total_trials(&self) -> u64 {
        self.trials.total()
    }

    /// Derived total machine-hours.
    pub fn total_hours(&self) -> f64 {
        self.duration_h * self.total_trials() as f64
    }
}

fn invalid<T>(field: &'static str, reason: &'static str) -> EngineResult<T> {
    Err(EngineError::InvalidInput { field, reason })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> WorkloadRequest {
        WorkloadRequest {
            provider_code: "gcp".to_string(),
            region_name: "europe-west1".to_string(),
            cpu_key: "Intel Xeon E5-2660".to_string(),
            cpu_count: 4,
            memory_gb: 64.0,
            mem_power_w_per_gb: None,
            duration_h: 1.0,
            trials: TrialCount::Total { total_trials: 100 },
        }
    }

    fn invalid_field(request: &WorkloadRequest) -> &'static str {
        match request.validate().unwrap_err() {
            EngineError::InvalidInput { field, .. } => field,
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn valid_request_passes() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn each_violation_names_its_field() {
        let mut r = valid_request();
        r.cpu_count = 0;
        assert_eq!(invalid_field(&r), "cpu_count");

        let mut r = valid_request();
        r.memory_gb = -1.0;
        assert_eq!(invalid_field(&r), "memory_gb");

        let mut r = valid_request();
        r.mem_power_w_per_gb = Some(-0.5);
        assert_eq!(invalid_field(&r), "mem_power_w_per_gb");

        let mut r = valid_request();
        r.duration_h = 0.0;
        assert_eq!(invalid_field(&r), "duration_h");

        let mut r = valid_request();
        r.trials = TrialCount::Total { total_trials: 0 };
        assert_eq!(invalid_field(&r), "total_trials");

        let mut r = valid_request();
        r.trials = TrialCount::Pairs {
            pairs: 0,
            trials_per_pair: 20,
        };
        assert_eq!(invalid_field(&r), "pairs");

        let mut r = valid_request();
        r.trials = TrialCount::Pairs {
            pairs: 5,
            trials_per_pair: 0,
        };
        assert_eq!(invalid_field(&r), "trials_per_pair");

        let mut r = valid_request();
        r.region_name = "  ".to_string();
        assert_eq!(invalid_field(&r), "region_name");
    }

    #[test]
    fn trial_modes_agree_on_totals() {
        let pairs = TrialCount::Pairs {
            pairs: 5,
            trials_per_pair: 20,
        };
        let total = TrialCount::Total { total_trials: 100 };
        assert_eq!(pairs.total(), total.total());
    }

    #[test]
    fn request_round_trips_through_json() {
        let request = valid_request();
        let json = serde_json::to_string(&request).unwrap();
        let back: WorkloadRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, request);
    }
}
