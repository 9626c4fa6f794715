//! Regional comparison: the same workload placed in every region of a
//! provider, ranked by tree-year impact.

use gc_core::constants::TREE_CO2_ABSORPTION_KG_PER_YEAR;
use gc_dataset::Provider;
use serde::{Deserialize, Serialize};

/// One row of the comparison table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionComparisonRow {
    pub region_name: String,
    pub location: String,
    pub pue: f64,
    pub carbon_kg: f64,
    pub tree_years: f64,
    pub carbon_intensity_g_per_kwh: f64,
    pub ci_is_fallback: bool,
    pub is_selected: bool,
}

/// Apply the energy/carbon formula across every region of `provider`,
/// reusing the already-computed machine power and machine-hours (only PUE
/// and carbon intensity vary per row).
///
/// Rows with non-finite carbon are excluded (guarded; dataset invariants
/// should prevent them). Output is sorted ascending by tree-years, ties
/// broken by region name. An empty provider yields an empty vec; the
/// caller must present an explicit no-data state.
pub fn compare_regions(
    provider: &Provider,
    machine_power_w: f64,
    total_hours: f64,
    selected_region_name: &str,
) -> Vec<RegionComparisonRow> {
    let mut rows: Vec<RegionComparisonRow> = provider
        .regions
        .iter()
        .filter_map(|(region_name, region)| {
            let energy_kwh = (machine_power_w / 1000.0) * total_hours * region.pue;
            let carbon_kg = (energy_kwh * region.carbon_intensity_g_per_kwh) / 1000.0;
            if !carbon_kg.is_finite() {
                return None;
            }
            Some(RegionComparisonRow {
                region_name: region_name.clone(),
                location: region.location_label().to_string(),
                pue: region.pue,
                carbon_kg,
                tree_years: carbon_kg / TREE_CO2_ABSORPTION_KG_PER_YEAR,
                carbon_intensity_g_per_kwh: region.carbon_intensity_g_per_kwh,
                ci_is_fallback: region.ci_is_fallback,
                is_selected: region_name == selected_region_name,
            })
        })
        .collect();

    // BTreeMap iteration already yields name order, so a stable sort on
    // tree-years keeps the lexical tie-break.
    rows.sort_by(|a, b| a.tree_years.total_cmp(&b.tree_years));
    rows
}
