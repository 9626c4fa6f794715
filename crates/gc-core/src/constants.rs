//! Reference constants shared across the workspace.

/// Carbon intensity assumed when a region cannot be resolved against any
/// zone or free-text table, in g CO2e per kWh.
pub const FALLBACK_CARBON_INTENSITY_G_PER_KWH: f64 = 400.0;

/// Memory power draw coefficient, in watts per gigabyte. Used when neither
/// the hardware-defaults table nor the request overrides it.
pub const DEFAULT_MEM_POWER_W_PER_GB: f64 = 0.3725;

/// Datacenter PUE assumed when a provider has no default-efficiency entry
/// and no generic "Unknown" entry exists either.
pub const DEFAULT_PUE: f64 = 1.56;

/// Approximate CO2 absorption of one mature tree, in kg per year.
pub const TREE_CO2_ABSORPTION_KG_PER_YEAR: f64 = 21.77;

/// Sentinel provider code used for catch-all default-efficiency entries.
pub const UNKNOWN_PROVIDER: &str = "Unknown";
