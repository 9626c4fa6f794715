//! Reference data model.

use std::collections::{BTreeMap, HashMap};

use gc_core::constants::{
    DEFAULT_MEM_POWER_W_PER_GB, DEFAULT_PUE, FALLBACK_CARBON_INTENSITY_G_PER_KWH, UNKNOWN_PROVIDER,
};

use crate::resolver::resolve_carbon_intensity;

/// In-memory reference model assembled by the loader.
///
/// Providers, regions, and CPUs use `BTreeMap` so listings and the
/// comparator's tie-break come out in deterministic name order; the
/// intensity and PUE tables are pure lookups.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceDataset {
    pub providers: BTreeMap<String, Provider>,
    pub cpus: BTreeMap<String, CpuSpec>,
    pub default_pue_by_provider: HashMap<String, f64>,
    pub carbon_by_zone: HashMap<String, f64>,
    pub carbon_by_name: HashMap<String, f64>,
    pub fallback_intensity_g_per_kwh: f64,
    pub default_mem_power_w_per_gb: f64,
}

impl Default for ReferenceDataset {
    fn default() -> Self {
        Self {
            providers: BTreeMap::new(),
            cpus: BTreeMap::new(),
            default_pue_by_provider: HashMap::new(),
            carbon_by_zone: HashMap::new(),
            carbon_by_name: HashMap::new(),
            fallback_intensity_g_per_kwh: FALLBACK_CARBON_INTENSITY_G_PER_KWH,
            default_mem_power_w_per_gb: DEFAULT_MEM_POWER_W_PER_GB,
        }
    }
}

impl ReferenceDataset {
    pub fn provider(&self, code: &str) -> Option<&Provider> {
        self.providers.get(code)
    }

    pub fn region(&self, provider_code: &str, region_name: &str) -> Option<&Region> {
        self.providers.get(provider_code)?.regions.get(region_name)
    }

    pub fn cpu(&self, key: &str) -> Option<&CpuSpec> {
        self.cpus.get(key)
    }

    /// Default PUE for a provider: its own entry, the "Unknown" catch-all,
    /// or the global constant.
    pub fn default_pue_for(&self, provider_code: &str) -> f64 {
        self.default_pue_by_provider
            .get(provider_code)
            .or_else(|| self.default_pue_by_provider.get(UNKNOWN_PROVIDER))
            .copied()
            .unwrap_or(DEFAULT_PUE)
    }

    /// Tiered carbon-intensity lookup against the assembled tables.
    pub fn resolve_intensity(
        &self,
        location_code: Option<&str>,
        location_free: Option<&str>,
    ) -> (f64, bool) {
        resolve_carbon_intensity(
            &self.carbon_by_zone,
            &self.carbon_by_name,
            self.fallback_intensity_g_per_kwh,
            location_code,
            location_free,
        )
    }
}

/// A cloud provider and its datacenter regions.
#[derive(Debug, Clone, PartialEq)]
pub struct Provider {
    pub code: String,
    pub name: String,
    pub regions: BTreeMap<String, Region>,
}

/// A datacenter region, owned exclusively by its provider.
///
/// Region names are unique within a provider only, not globally.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub location_code: Option<String>,
    pub location_free: Option<String>,
    pub pue: f64,
    pub carbon_intensity_g_per_kwh: f64,
    pub ci_is_fallback: bool,
}

impl Region {
    /// Human-readable location: structured code, else free text, else a
    /// placeholder.
    pub fn location_label(&self) -> &str {
        self.location_code
            .as_deref()
            .or(self.location_free.as_deref())
            .unwrap_or("Unknown location")
    }
}

/// CPU reference entry. TDP and core count are always positive; rows
/// failing that are dropped at load time.
#[derive(Debug, Clone, PartialEq)]
pub struct CpuSpec {
    pub model: String,
    pub manufacturer: String,
    pub tdp_w: f64,
    pub cores: f64,
}

impl CpuSpec {
    pub fn watts_per_core(&self) -> f64 {
        self.tdp_w / self.cores
    }
}

/// Composite CPU key: "manufacturer model", or the model alone when the
/// manufacturer is absent.
pub fn cpu_key(manufacturer: Option<&str>, model: &str) -> String {
    match manufacturer {
        Some(m) if !m.is_empty() => format!("{m} {model}"),
        _ => model.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pue_tiers() {
        let mut ds = ReferenceDataset::default();
        assert_eq!(ds.default_pue_for("aws"), DEFAULT_PUE);

        ds.default_pue_by_provider
            .insert(UNKNOWN_PROVIDER.to_string(), 1.4);
        assert_eq!(ds.default_pue_for("aws"), 1.4);

        ds.default_pue_by_provider.insert("aws".to_string(), 1.2);
        assert_eq!(ds.default_pue_for("aws"), 1.2);
    }

    #[test]
    fn location_label_prefers_code() {
        let region = Region {
            location_code: Some("US-VA".to_string()),
            location_free: Some("Northern Virginia, USA".to_string()),
            pue: 1.2,
            carbon_intensity_g_per_kwh: 300.0,
            ci_is_fallback: false,
        };
        assert_eq!(region.location_label(), "US-VA");

        let nameless = Region {
            location_code: None,
            location_free: None,
            pue: 1.2,
            carbon_intensity_g_per_kwh: 300.0,
            ci_is_fallback: true,
        };
        assert_eq!(nameless.location_label(), "Unknown location");
    }

    #[test]
    fn cpu_key_composition() {
        assert_eq!(cpu_key(Some("Intel"), "Xeon E5-2660"), "Intel Xeon E5-2660");
        assert_eq!(cpu_key(None, "EPYC 7571"), "EPYC 7571");
        assert_eq!(cpu_key(Some(""), "EPYC 7571"), "EPYC 7571");
    }
}
