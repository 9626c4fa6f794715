//! Tiered carbon-intensity resolution.
//!
//! Resolution never fails. Absence of data degrades to the dataset's
//! fallback constant, and the caller gets a flag so fallback figures are
//! never presented as authoritative.

use std::collections::HashMap;

/// Zone-code segment before the first `-` separator ("US-VA" -> "US").
pub fn base_zone_code(code: &str) -> &str {
    code.split('-').next().unwrap_or(code)
}

/// Resolve a location to a carbon intensity in g CO2e/kWh.
///
/// Tiers, first match wins:
/// 1. exact trimmed `location_code` in the zone table;
/// 2. base prefix of `location_code` in the zone table;
/// 3. lowercased trimmed `location_free` in the free-text table;
/// 4. the fallback constant, flagged.
pub fn resolve_carbon_intensity(
    zones: &HashMap<String, f64>,
    names: &HashMap<String, f64>,
    fallback: f64,
    location_code: Option<&str>,
    location_free: Option<&str>,
) -> (f64, bool) {
    if let Some(code) = location_code {
        let trimmed = code.trim();
        if let Some(&ci) = zones.get(trimmed) {
            return (ci, false);
        }
        let base = base_zone_code(trimmed);
        if !base.is_empty()
            && let Some(&ci) = zones.get(base)
        {
            return (ci, false);
        }
    }

    if let Some(free) = location_free {
        let key = free.trim().to_lowercase();
        if !key.is_empty()
            && let Some(&ci) = names.get(&key)
        {
            return (ci, false);
        }
    }

    (fallback, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zones() -> HashMap<String, f64> {
        HashMap::from([("US-VA".to_string(), 350.0), ("US".to_string(), 380.0)])
    }

    #[test]
    fn exact_zone_code_wins() {
        let (ci, fallback) = resolve_carbon_intensity(
            &zones(),
            &HashMap::new(),
            400.0,
            Some("US-VA"),
            Some("Virginia"),
        );
        assert_eq!((ci, fallback), (350.0, false));
    }

    #[test]
    fn base_prefix_is_second_tier() {
        let (ci, fallback) = resolve_carbon_intensity(
            &zones(),
            &HashMap::new(),
            400.0,
            Some("US-OR"),
            Some("Oregon"),
        );
        assert_eq!((ci, fallback), (380.0, false));
    }

    #[test]
    fn free_text_is_third_tier() {
        let names = HashMap::from([("virginia".to_string(), 390.0)]);
        let (ci, fallback) =
            resolve_carbon_intensity(&HashMap::new(), &names, 400.0, Some("US-CA"), Some("Virginia"));
        assert_eq!((ci, fallback), (390.0, false));
    }

    #[test]
    fn unresolved_degrades_to_fallback() {
        let (ci, fallback) = resolve_carbon_intensity(
            &HashMap::new(),
            &HashMap::new(),
            400.0,
            Some("ZZ-ZZ"),
            Some("Nowhere"),
        );
        assert_eq!((ci, fallback), (400.0, true));
    }

    #[test]
    fn missing_inputs_fall_through() {
        let (ci, fallback) =
            resolve_carbon_intensity(&zones(), &HashMap::new(), 400.0, None, None);
        assert_eq!((ci, fallback), (400.0, true));

        let (ci, fallback) =
            resolve_carbon_intensity(&zones(), &HashMap::new(), 400.0, Some("  "), None);
        assert_eq!((ci, fallback), (400.0, true));
    }

    #[test]
    fn base_code_splits_on_first_separator() {
        assert_eq!(base_zone_code("US-VA"), "US");
        assert_eq!(base_zone_code("AU-NSW-1"), "AU");
        assert_eq!(base_zone_code("SG"), "SG");
        assert_eq!(base_zone_code(""), "");
    }
}
