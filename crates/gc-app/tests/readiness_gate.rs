use std::collections::HashMap;
use std::io;

use gc_app::{AppError, AppState, DataSourcesConfig, TableSource, compute, make_record, rerun_record};
use gc_dataset::LoadOptions;
use gc_engine::{TrialCount, WorkloadRequest};

/// In-memory table source for tests.
struct MapSource {
    tables: HashMap<String, String>,
}

impl MapSource {
    fn complete() -> Self {
        let mut tables = HashMap::new();
        tables.insert(
            "providersNamesCodes.csv".to_string(),
            "provider,providerName\ngcp,Google Cloud Platform\n".to_string(),
        );
        tables.insert(
            "cloudProviders_datacenters.csv".to_string(),
            "provider,Name,location,location_freeForm,PUE\ngcp,us-east4,US-VA,Virginia,1.2\ngcp,europe-west1,BE,Belgium,1.08\n"
                .to_string(),
        );
        tables.insert(
            "default_PUE.csv".to_string(),
            "provider,PUE\ngcp,1.1\n".to_string(),
        );
        tables.insert(
            "CI_aggregated.csv".to_string(),
            "location,carbonIntensity,regionName,countryName,continentName\nUS-VA,300,Virginia,United States,North America\nBE,160,,Belgium,Europe\n"
                .to_string(),
        );
        tables.insert(
            "CPUs.csv".to_string(),
            "model,Manufacturer,TDP,n_cores\nTest 150,Intel,150,16\n".to_string(),
        );
        Self { tables }
    }

    fn without(mut self, name: &str) -> Self {
        self.tables.remove(name);
        self
    }
}

impl TableSource for MapSource {
    fn fetch(&self, name: &str) -> io::Result<String> {
        self.tables
            .get(name)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, name.to_string()))
    }
}

fn request() -> WorkloadRequest {
    WorkloadRequest {
        provider_code: "gcp".to_string(),
        region_name: "us-east4".to_string(),
        cpu_key: "Intel Test 150".to_string(),
        cpu_count: 4,
        memory_gb: 64.0,
        mem_power_w_per_gb: Some(0.3725),
        duration_h: 1.0,
        trials: TrialCount::Total { total_trials: 100 },
    }
}

#[test]
fn compute_requires_a_loaded_dataset() {
    let state = AppState::new();
    assert!(!state.is_ready());
    assert!(matches!(
        compute(&state, &request()).unwrap_err(),
        AppError::DatasetUnavailable(_)
    ));
}

#[test]
fn successful_load_enables_computation() {
    let mut state = AppState::new();
    state
        .load_dataset(
            &MapSource::complete(),
            &DataSourcesConfig::default(),
            &LoadOptions::default(),
        )
        .expect("load");
    assert!(state.is_ready());
    assert_eq!(state.dataset_version(), "v3.0");

    let outcome = compute(&state, &request()).expect("compute");
    assert!((outcome.result.machine_power_w - 623.84).abs() < 1e-9);
    assert!((outcome.result.energy_kwh - 74.8608).abs() < 1e-9);

    // One comparison row per gcp region, ranked ascending; selected row
    // flagged.
    assert_eq!(outcome.comparison.len(), 2);
    assert!(outcome.comparison[0].tree_years <= outcome.comparison[1].tree_years);
    let selected: Vec<&str> = outcome
        .comparison
        .iter()
        .filter(|row| row.is_selected)
        .map(|row| row.region_name.as_str())
        .collect();
    assert_eq!(selected, ["us-east4"]);
}

#[test]
fn any_missing_table_fails_the_whole_load() {
    let mut state = AppState::new();
    let err = state
        .load_dataset(
            &MapSource::complete().without("CI_aggregated.csv"),
            &DataSourcesConfig::default(),
            &LoadOptions::default(),
        )
        .unwrap_err();
    assert!(matches!(err, AppError::DatasetUnavailable(_)));
    assert!(!state.is_ready());
}

#[test]
fn failed_reload_drops_readiness() {
    let mut state = AppState::new();
    state
        .load_dataset(
            &MapSource::complete(),
            &DataSourcesConfig::default(),
            &LoadOptions::default(),
        )
        .expect("initial load");
    assert!(state.is_ready());

    let _ = state.load_dataset(
        &MapSource::complete().without("CPUs.csv"),
        &DataSourcesConfig::default(),
        &LoadOptions::default(),
    );
    assert!(!state.is_ready());
}

#[test]
fn rerun_reproduces_stored_result_against_unchanged_dataset() {
    let mut state = AppState::new();
    state
        .load_dataset(
            &MapSource::complete(),
            &DataSourcesConfig::default(),
            &LoadOptions::default(),
        )
        .expect("load");

    let req = request();
    let outcome = compute(&state, &req).expect("compute");
    let record = make_record(&state, &req, &outcome.result);
    assert_eq!(record.dataset_version, "v3.0");

    let replay = rerun_record(&state, &record).expect("rerun");
    assert_eq!(replay.result, record.result);
}

#[test]
fn stale_record_fails_after_dataset_swap() {
    let mut state = AppState::new();
    state
        .load_dataset(
            &MapSource::complete(),
            &DataSourcesConfig::default(),
            &LoadOptions::default(),
        )
        .expect("load");
    let req = request();
    let outcome = compute(&state, &req).expect("compute");
    let record = make_record(&state, &req, &outcome.result);

    // Reload with the CPU table emptied of our model.
    let mut swapped = MapSource::complete();
    swapped.tables.insert(
        "CPUs.csv".to_string(),
        "model,Manufacturer,TDP,n_cores\nOther,AMD,120,8\n".to_string(),
    );
    state
        .load_dataset(
            &swapped,
            &DataSourcesConfig::default(),
            &LoadOptions::default(),
        )
        .expect("reload");

    assert!(matches!(
        rerun_record(&state, &record).unwrap_err(),
        AppError::Engine(gc_engine::EngineError::UnresolvedSelection { kind: "cpu", .. })
    ));
}
