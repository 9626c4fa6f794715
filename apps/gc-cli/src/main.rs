use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use gc_app::{
    AppResult, AppState, ComputeOutcome, DataSourcesConfig, FsTableSource, compute, make_record,
    rerun_record,
};
use gc_dataset::LoadOptions;
use gc_engine::{TrialCount, WorkloadRequest};
use gc_results::RunStore;

#[derive(Parser)]
#[command(name = "gc-cli")]
#[command(about = "gridcarbon CLI - workload carbon footprint estimation", long_about = None)]
struct Cli {
    /// Path to a data-sources YAML file (defaults to the built-in layout
    /// under ./data)
    #[arg(long, global = true)]
    data_config: Option<PathBuf>,

    /// Directory for saved run records
    #[arg(long, global = true, default_value = ".gridcarbon/runs")]
    runs_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List providers in the loaded dataset
    Providers,
    /// List regions of a provider with PUE and carbon intensity
    Regions {
        /// Provider code (e.g., gcp, aws, azure)
        provider: String,
    },
    /// List CPUs, optionally filtered by a substring
    Cpus {
        /// Case-insensitive substring filter on the CPU key
        filter: Option<String>,
    },
    /// Estimate the footprint of a workload and rank the provider's regions
    Compute(ComputeArgs),
    /// List saved runs, newest first
    Runs,
    /// Show a saved run as JSON
    ShowRun {
        /// Run ID or unique prefix (as listed by `runs`)
        run_id: String,
    },
    /// Re-run a saved run against the current dataset
    Rerun { run_id: String },
    /// Delete a saved run
    DeleteRun { run_id: String },
}

#[derive(Args)]
struct ComputeArgs {
    /// Provider code
    #[arg(long)]
    provider: String,
    /// Region name (as listed by `regions`)
    #[arg(long)]
    region: String,
    /// CPU key (as listed by `cpus`)
    #[arg(long)]
    cpu: String,
    /// Number of CPUs per machine configuration
    #[arg(long, default_value_t = 1)]
    cpu_count: u32,
    /// Memory size in GB
    #[arg(long, default_value_t = 0.0)]
    memory_gb: f64,
    /// Memory power coefficient in W/GB (dataset default when omitted)
    #[arg(long)]
    mem_power: Option<f64>,
    /// Duration of one trial in hours
    #[arg(long)]
    duration_h: f64,
    /// Total trial count (mutually exclusive with --pairs)
    #[arg(long, conflicts_with_all = ["pairs", "trials_per_pair"])]
    total_trials: Option<u64>,
    /// Number of fuzzer/target pairs
    #[arg(long, requires = "trials_per_pair")]
    pairs: Option<u64>,
    /// Trials per pair
    #[arg(long, requires = "pairs")]
    trials_per_pair: Option<u64>,
    /// Save the computed run
    #[arg(long)]
    save: bool,
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Providers => cmd_providers(&cli.data_config),
        Commands::Regions { ref provider } => cmd_regions(&cli.data_config, provider),
        Commands::Cpus { ref filter } => cmd_cpus(&cli.data_config, filter.as_deref()),
        Commands::Compute(ref args) => cmd_compute(&cli.data_config, &cli.runs_dir, args),
        Commands::Runs => cmd_runs(&cli.runs_dir),
        Commands::ShowRun { ref run_id } => cmd_show_run(&cli.runs_dir, run_id),
        Commands::Rerun { ref run_id } => cmd_rerun(&cli.data_config, &cli.runs_dir, run_id),
        Commands::DeleteRun { ref run_id } => cmd_delete_run(&cli.runs_dir, run_id),
    };

    if let Err(err) = result {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn load_state(data_config: &Option<PathBuf>) -> AppResult<AppState> {
    let config = match data_config {
        Some(path) => DataSourcesConfig::load_yaml(path)?,
        None => DataSourcesConfig::default(),
    };
    let source = FsTableSource::for_config(&config);
    let mut state = AppState::new();
    state.load_dataset(&source, &config, &LoadOptions::default())?;
    Ok(state)
}

fn open_store(runs_dir: &PathBuf) -> AppResult<RunStore> {
    Ok(RunStore::new(runs_dir.clone())?)
}

fn cmd_providers(data_config: &Option<PathBuf>) -> AppResult<()> {
    let state = load_state(data_config)?;
    let dataset = state.dataset()?;
    for provider in dataset.providers.values() {
        println!(
            "{:<10} {:<30} {} regions",
            provider.code,
            provider.name,
            provider.regions.len()
        );
    }
    Ok(())
}

fn cmd_regions(data_config: &Option<PathBuf>, provider_code: &str) -> AppResult<()> {
    let state = load_state(data_config)?;
    let dataset = state.dataset()?;
    let Some(provider) = dataset.provider(provider_code) else {
        println!("No provider '{provider_code}' in the dataset.");
        return Ok(());
    };
    if provider.regions.is_empty() {
        println!("No regional data available for this provider yet.");
        return Ok(());
    }
    println!(
        "{:<32} {:<24} {:>6} {:>12}",
        "Region", "Location", "PUE", "CI g/kWh"
    );
    for (name, region) in &provider.regions {
        println!(
            "{:<32} {:<24} {:>6.2} {:>12}",
            name,
            region.location_label(),
            region.pue,
            format!(
                "{:.1}{}",
                region.carbon_intensity_g_per_kwh,
                if region.ci_is_fallback { "*" } else { "" }
            ),
        );
    }
    println!("(* carbon intensity is the fallback constant, not a lookup)");
    Ok(())
}

fn cmd_cpus(data_config: &Option<PathBuf>, filter: Option<&str>) -> AppResult<()> {
    let state = load_state(data_config)?;
    let dataset = state.dataset()?;
    let filter = filter.map(str::to_lowercase);
    for (key, cpu) in &dataset.cpus {
        if let Some(f) = &filter
            && !key.to_lowercase().contains(f)
        {
            continue;
        }
        println!(
            "{:<40} {:>7.1} W  {:>5} cores  {:>5.1} W/core",
            key,
            cpu.tdp_w,
            cpu.cores,
            cpu.watts_per_core()
        );
    }
    Ok(())
}

fn cmd_compute(
    data_config: &Option<PathBuf>,
    runs_dir: &PathBuf,
    args: &ComputeArgs,
) -> AppResult<()> {
    let trials = match (args.total_trials, args.pairs, args.trials_per_pair) {
        (Some(total_trials), _, _) => TrialCount::Total { total_trials },
        (None, Some(pairs), Some(trials_per_pair)) => TrialCount::Pairs {
            pairs,
            trials_per_pair,
        },
        _ => {
            eprintln!("Specify either --total-trials or --pairs with --trials-per-pair.");
            std::process::exit(2);
        }
    };
    let request = WorkloadRequest {
        provider_code: args.provider.clone(),
        region_name: args.region.clone(),
        cpu_key: args.cpu.clone(),
        cpu_count: args.cpu_count,
        memory_gb: args.memory_gb,
        mem_power_w_per_gb: args.mem_power,
        duration_h: args.duration_h,
        trials,
    };

    let state = load_state(data_config)?;
    let outcome = compute(&state, &request)?;
    print_outcome(&request, &outcome);

    if args.save {
        let record = make_record(&state, &request, &outcome.result);
        open_store(runs_dir)?.save_run(&record)?;
        println!("\nSaved run {}", record.run_id);
    }
    Ok(())
}

fn print_outcome(request: &WorkloadRequest, outcome: &ComputeOutcome) {
    let r = &outcome.result;
    println!("Carbon footprint: {:.5} kg CO2e", r.carbon_kg);
    println!(
        "Energy use:       {:.4} kWh (machine power {:.1} W)",
        r.energy_kwh, r.machine_power_w
    );
    println!(
        "Workload:         {} trials, {:.1} machine-hours",
        r.total_trials, r.total_hours
    );

    if outcome.comparison.is_empty() {
        println!("\nNo regional data available for this provider yet.");
        return;
    }
    println!(
        "\n{:<32} {:<24} {:>10} {:>12} {:>6}",
        "Region", "Location", "Tree-yrs", "Carbon kg", "PUE"
    );
    for row in &outcome.comparison {
        println!(
            "{}{:<30} {:<24} {:>10.2} {:>12.2} {:>6.2}",
            if row.region_name == request.region_name {
                "> "
            } else {
                "  "
            },
            row.region_name,
            row.location,
            row.tree_years,
            row.carbon_kg,
            row.pue,
        );
    }
    println!("(lower tree-years indicate less offset time for a mature tree)");
}

fn cmd_runs(runs_dir: &PathBuf) -> AppResult<()> {
    let store = open_store(runs_dir)?;
    let runs = store.list_runs()?;
    if runs.is_empty() {
        println!("No saved runs.");
        return Ok(());
    }
    for run in runs {
        println!(
            "{}  {}  {}/{}  {:.5} kg",
            &run.run_id[..12.min(run.run_id.len())],
            run.timestamp,
            run.request.provider_code,
            run.request.region_name,
            run.result.carbon_kg
        );
    }
    Ok(())
}

fn find_run(store: &RunStore, run_id: &str) -> AppResult<gc_results::RunRecord> {
    // Accept the short prefix shown by `runs`.
    if let Ok(record) = store.load_run(run_id) {
        return Ok(record);
    }
    let mut matches: Vec<_> = store
        .list_runs()?
        .into_iter()
        .filter(|r| r.run_id.starts_with(run_id))
        .collect();
    if matches.len() == 1
        && let Some(record) = matches.pop()
    {
        return Ok(record);
    }
    Err(gc_app::AppError::RunNotFound(run_id.to_string()))
}

fn cmd_show_run(runs_dir: &PathBuf, run_id: &str) -> AppResult<()> {
    let record = find_run(&open_store(runs_dir)?, run_id)?;
    let json = serde_json::to_string_pretty(&record)
        .map_err(|e| gc_app::AppError::Results(e.to_string()))?;
    println!("{json}");
    Ok(())
}

fn cmd_rerun(
    data_config: &Option<PathBuf>,
    runs_dir: &PathBuf,
    run_id: &str,
) -> AppResult<()> {
    let record = find_run(&open_store(runs_dir)?, run_id)?;
    let state = load_state(data_config)?;
    let outcome = rerun_record(&state, &record)?;
    print_outcome(&record.request, &outcome);

    if state.dataset_version() == record.dataset_version
        && outcome.result != record.result
    {
        println!("\nWarning: result differs from the stored record.");
    }
    Ok(())
}

fn cmd_delete_run(runs_dir: &PathBuf, run_id: &str) -> AppResult<()> {
    let store = open_store(runs_dir)?;
    let record = find_run(&store, run_id)?;
    store.delete_run(&record.run_id)?;
    println!("Deleted run {}", record.run_id);
    Ok(())
}
