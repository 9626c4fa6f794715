//! Assembles a `ReferenceDataset` from raw table text.
//!
//! The loader owns header detection (keyword scan, not row zero) and the
//! merge rules that keep loading order-independent: provider registration
//! merges display name and preserves regions, while carbon-intensity and
//! CPU entries are strictly first-seen-wins.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use gc_core::numeric::parse_finite;
use gc_tabular::{HeaderMap, find_header_row, parse};

use crate::model::{CpuSpec, Provider, ReferenceDataset, Region, cpu_key};
use crate::schema::TableSchemas;
use crate::synth::{self, SynthesizedRegions};
use crate::{DatasetError, DatasetResult};

/// Raw text of the source tables, already fetched by the caller.
#[derive(Debug, Clone, Default)]
pub struct RawTables {
    pub providers: String,
    pub datacenters: String,
    pub default_pue: String,
    pub carbon: String,
    pub cpus: String,
    pub hardware: Option<String>,
}

/// Loader configuration: column schemas plus post-load hooks.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub schemas: TableSchemas,
    pub synthesized_regions: Vec<SynthesizedRegions>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            schemas: TableSchemas::default(),
            synthesized_regions: synth::builtin_hooks(),
        }
    }
}

/// Build the full reference dataset, or fail without producing a partial
/// one.
pub fn load(tables: &RawTables, options: &LoadOptions) -> DatasetResult<ReferenceDataset> {
    let mut dataset = ReferenceDataset::default();

    load_providers(&mut dataset, &tables.providers, options)?;
    load_default_pue(&mut dataset, &tables.default_pue, options)?;
    if let Some(hardware) = &tables.hardware {
        load_hardware_defaults(&mut dataset, hardware, options);
    }
    load_carbon(&mut dataset, &tables.carbon, options)?;
    load_datacenters(&mut dataset, &tables.datacenters, options)?;
    synth::apply_hooks(&mut dataset, &options.synthesized_regions);
    load_cpus(&mut dataset, &tables.cpus, options)?;

    info!(
        providers = dataset.providers.len(),
        regions = dataset
            .providers
            .values()
            .map(|p| p.regions.len())
            .sum::<usize>(),
        cpus = dataset.cpus.len(),
        zones = dataset.carbon_by_zone.len(),
        "reference dataset loaded"
    );
    Ok(dataset)
}

/// Register or merge a provider: the display name is updated, existing
/// regions are preserved.
fn register_provider(dataset: &mut ReferenceDataset, code: &str, name: Option<&str>) {
    let entry = dataset
        .providers
        .entry(code.to_string())
        .or_insert_with(|| Provider {
            code: code.to_string(),
            name: code.to_uppercase(),
            regions: BTreeMap::new(),
        });
    if let Some(name) = name {
        entry.name = name.to_string();
    }
}

fn load_providers(
    dataset: &mut ReferenceDataset,
    text: &str,
    options: &LoadOptions,
) -> DatasetResult<()> {
    let cols = &options.schemas.providers;
    let rows = parse(text);
    let header_index =
        find_header_row(&rows, cols.header_keyword).ok_or(DatasetError::MissingHeader {
            table: "providers",
            keyword: cols.header_keyword,
        })?;
    let map = HeaderMap::new(&rows[header_index]);

    for row in &rows[header_index + 1..] {
        let Some(code) = map.cell(row, cols.code) else {
            continue;
        };
        register_provider(dataset, code, map.cell(row, cols.name));
    }
    Ok(())
}

fn load_default_pue(
    dataset: &mut ReferenceDataset,
    text: &str,
    options: &LoadOptions,
) -> DatasetResult<()> {
    let cols = &options.schemas.default_pue;
    let rows = parse(text);
    let header_index =
        find_header_row(&rows, cols.header_keyword).ok_or(DatasetError::MissingHeader {
            table: "default_pue",
            keyword: cols.header_keyword,
        })?;
    let map = HeaderMap::new(&rows[header_index]);

    for row in &rows[header_index + 1..] {
        let Some(provider) = map.cell(row, cols.provider) else {
            continue;
        };
        let Some(pue) = map.cell(row, cols.pue).and_then(parse_finite) else {
            continue;
        };
        dataset
            .default_pue_by_provider
            .insert(provider.to_string(), pue);
    }
    Ok(())
}

/// Optional table; a missing header here is a warning, not a load failure.
fn load_hardware_defaults(dataset: &mut ReferenceDataset, text: &str, options: &LoadOptions) {
    let cols = &options.schemas.hardware;
    let rows = parse(text);
    let Some(header_index) = find_header_row(&rows, cols.header_keyword) else {
        warn!(
            keyword = cols.header_keyword,
            "hardware-defaults table has no header row, skipping"
        );
        return;
    };
    let map = HeaderMap::new(&rows[header_index]);

    for row in &rows[header_index + 1..] {
        if map.cell(row, cols.key) != Some("memoryPower") {
            continue;
        }
        if let Some(value) = map.cell(row, cols.value).and_then(parse_finite) {
            debug!(value, "memory power coefficient overridden");
            dataset.default_mem_power_w_per_gb = value;
        }
    }
}

fn load_carbon(
    dataset: &mut ReferenceDataset,
    text: &str,
    options: &LoadOptions,
) -> DatasetResult<()> {
    let schema = &options.schemas.carbon;
    let rows = parse(text);
    if rows.len() < 2 {
        return Err(DatasetError::EmptyTable { table: "carbon" });
    }

    // Explicit keyword match, or the first row as fallback.
    let header_index = find_header_row(&rows, schema.header_keyword).unwrap_or(0);
    let map = HeaderMap::new(&rows[header_index]);

    for row in &rows[header_index + 1..] {
        let Some(zone) = map.cell(row, schema.zone) else {
            continue;
        };
        let Some(ci) = schema
            .intensity
            .iter()
            .find_map(|col| map.cell(row, col).and_then(parse_finite))
        else {
            continue;
        };

        dataset
            .carbon_by_zone
            .entry(zone.to_string())
            .or_insert(ci);
        for col in schema.names {
            if let Some(name) = map.cell(row, col) {
                dataset
                    .carbon_by_name
                    .entry(name.to_lowercase())
                    .or_insert(ci);
            }
        }
        let base = crate::resolver::base_zone_code(zone);
        if !base.is_empty() {
            dataset.carbon_by_zone.entry(base.to_string()).or_insert(ci);
        }
    }
    Ok(())
}

fn load_datacenters(
    dataset: &mut ReferenceDataset,
    text: &str,
    options: &LoadOptions,
) -> DatasetResult<()> {
    let cols = &options.schemas.datacenters;
    let rows = parse(text);
    let header_index =
        find_header_row(&rows, cols.header_keyword).ok_or(DatasetError::MissingHeader {
            table: "datacenters",
            keyword: cols.header_keyword,
        })?;
    let map = HeaderMap::new(&rows[header_index]);

    for row in &rows[header_index + 1..] {
        let Some(provider_code) = map.cell(row, cols.provider) else {
            continue;
        };
        let Some(region_name) = map.cell(row, cols.region_name) else {
            continue;
        };
        register_provider(dataset, provider_code, None);

        let location_code = map.cell(row, cols.location).map(str::to_string);
        let location_free = map.cell(row, cols.location_free).map(str::to_string);
        let pue = map
            .cell(row, cols.pue)
            .and_then(parse_finite)
            .unwrap_or_else(|| dataset.default_pue_for(provider_code));
        let (ci, ci_is_fallback) =
            dataset.resolve_intensity(location_code.as_deref(), location_free.as_deref());

        let region = Region {
            location_code,
            location_free,
            pue,
            carbon_intensity_g_per_kwh: ci,
            ci_is_fallback,
        };
        if let Some(provider) = dataset.providers.get_mut(provider_code) {
            provider.regions.insert(region_name.to_string(), region);
        }
    }
    Ok(())
}

fn load_cpus(
    dataset: &mut ReferenceDataset,
    text: &str,
    options: &LoadOptions,
) -> DatasetResult<()> {
    let cols = &options.schemas.cpus;
    let rows = parse(text);
    let header_index =
        find_header_row(&rows, cols.header_keyword).ok_or(DatasetError::MissingHeader {
            table: "cpus",
            keyword: cols.header_keyword,
        })?;
    let map = HeaderMap::new(&rows[header_index]);

    let mut skipped = 0usize;
    for row in &rows[header_index + 1..] {
        let Some(model) = map.cell(row, cols.model) else {
            continue;
        };
        // "Average" rows are dataset aggregates, not selectable CPUs.
        if model == "Average" {
            continue;
        }
        let manufacturer = cols
            .manufacturer
            .iter()
            .find_map(|col| map.cell(row, col));
        let tdp = map.cell(row, cols.tdp).and_then(parse_finite);
        let cores = map.cell(row, cols.cores).and_then(parse_finite);
        let (Some(tdp_w), Some(cores)) = (tdp, cores) else {
            skipped += 1;
            continue;
        };
        if tdp_w <= 0.0 || cores <= 0.0 {
            skipped += 1;
            continue;
        }

        let key = cpu_key(manufacturer, model);
        dataset.cpus.entry(key).or_insert_with(|| CpuSpec {
            model: model.to_string(),
            manufacturer: manufacturer.unwrap_or("Unknown").to_string(),
            tdp_w,
            cores,
        });
    }
    if skipped > 0 {
        debug!(skipped, "dropped CPU rows with unusable TDP or core count");
    }
    Ok(())
}
