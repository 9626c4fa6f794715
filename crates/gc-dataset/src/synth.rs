//! Synthesized fallback regions.
//!
//! Some source tables ship without rows for a provider that users still
//! expect to compare. A post-load hook, keyed by provider code, fills in a
//! known region list when that provider ended up with zero regions. PUE
//! comes from the provider's default-efficiency entry and carbon intensity
//! goes through normal resolution, so synthesized rows behave exactly like
//! loaded ones.

use tracing::info;

use crate::model::{ReferenceDataset, Region};

#[derive(Debug, Clone, Copy)]
pub struct SynthRegionDef {
    pub region_name: &'static str,
    pub location: &'static str,
    pub location_free: &'static str,
}

/// Region list synthesized for one provider when loading left it empty.
#[derive(Debug, Clone, Copy)]
pub struct SynthesizedRegions {
    pub provider_code: &'static str,
    pub regions: &'static [SynthRegionDef],
}

const AWS_REGIONS: [SynthRegionDef; 31] = [
    SynthRegionDef {
        region_name: "US East (N. Virginia)",
        location: "US-VA",
        location_free: "Northern Virginia, USA",
    },
    SynthRegionDef {
        region_name: "US East (Ohio)",
        location: "US-OH",
        location_free: "Ohio, USA",
    },
    SynthRegionDef {
        region_name: "US West (N. California)",
        location: "US-CA",
        location_free: "Northern California, USA",
    },
    SynthRegionDef {
        region_name: "US West (Oregon)",
        location: "US-OR",
        location_free: "Oregon, USA",
    },
    SynthRegionDef {
        region_name: "Canada (Central)",
        location: "CA-QC",
        location_free: "Montreal, Canada",
    },
    SynthRegionDef {
        region_name: "Canada West (Calgary)",
        location: "CA-AB",
        location_free: "Calgary, Canada",
    },
    SynthRegionDef {
        region_name: "South America (Sao Paulo)",
        location: "BR",
        location_free: "Sao Paulo, Brazil",
    },
    SynthRegionDef {
        region_name: "Europe (Ireland)",
        location: "IE",
        location_free: "Dublin, Ireland",
    },
    SynthRegionDef {
        region_name: "Europe (London)",
        location: "GB",
        location_free: "London, United Kingdom",
    },
    SynthRegionDef {
        region_name: "Europe (Paris)",
        location: "FR",
        location_free: "Paris, France",
    },
    SynthRegionDef {
        region_name: "Europe (Frankfurt)",
        location: "DE",
        location_free: "Frankfurt, Germany",
    },
    SynthRegionDef {
        region_name: "Europe (Zurich)",
        location: "CH",
        location_free: "Zurich, Switzerland",
    },
    SynthRegionDef {
        region_name: "Europe (Spain)",
        location: "ES",
        location_free: "Spain",
    },
    SynthRegionDef {
        region_name: "Europe (Milan)",
        location: "IT",
        location_free: "Milan, Italy",
    },
    SynthRegionDef {
        region_name: "Europe (Stockholm)",
        location: "SE",
        location_free: "Stockholm, Sweden",
    },
    SynthRegionDef {
        region_name: "Europe (Warsaw)",
        location: "PL",
        location_free: "Warsaw, Poland",
    },
    SynthRegionDef {
        region_name: "Asia Pacific (Mumbai)",
        location: "IN",
        location_free: "Mumbai, India",
    },
    SynthRegionDef {
        region_name: "Asia Pacific (Hyderabad)",
        location: "IN",
        location_free: "Hyderabad, India",
    },
    SynthRegionDef {
        region_name: "Asia Pacific (Singapore)",
        location: "SG",
        location_free: "Singapore",
    },
    SynthRegionDef {
        region_name: "Asia Pacific (Sydney)",
        location: "AU-NSW",
        location_free: "Sydney, Australia",
    },
    SynthRegionDef {
        region_name: "Asia Pacific (Melbourne)",
        location: "AU-VIC",
        location_free: "Melbourne, Australia",
    },
    SynthRegionDef {
        region_name: "Asia Pacific (Jakarta)",
        location: "ID",
        location_free: "Jakarta, Indonesia",
    },
    SynthRegionDef {
        region_name: "Asia Pacific (Tokyo)",
        location: "JP",
        location_free: "Tokyo, Japan",
    },
    SynthRegionDef {
        region_name: "Asia Pacific (Osaka)",
        location: "JP",
        location_free: "Osaka, Japan",
    },
    SynthRegionDef {
        region_name: "Asia Pacific (Seoul)",
        location: "KR",
        location_free: "Seoul, South Korea",
    },
    SynthRegionDef {
        region_name: "Asia Pacific (Hong Kong)",
        location: "CN-HK",
        location_free: "Hong Kong",
    },
    SynthRegionDef {
        region_name: "China (Beijing)",
        location: "CN",
        location_free: "Beijing, China",
    },
    SynthRegionDef {
        region_name: "China (Ningxia)",
        location: "CN",
        location_free: "Ningxia, China",
    },
    SynthRegionDef {
        region_name: "Middle East (UAE)",
        location: "AE",
        location_free: "Dubai, United Arab Emirates",
    },
    SynthRegionDef {
        region_name: "Middle East (Tel Aviv)",
        location: "IL",
        location_free: "Tel Aviv, Israel",
    },
    SynthRegionDef {
        region_name: "Africa (Cape Town)",
        location: "ZA",
        location_free: "Cape Town, South Africa",
    },
];

/// Hooks enabled by default: the AWS public-region list.
pub fn builtin_hooks() -> Vec<SynthesizedRegions> {
    vec![SynthesizedRegions {
        provider_code: "aws",
        regions: &AWS_REGIONS,
    }]
}

/// Apply hooks to a freshly loaded dataset. A hook only fires when its
/// provider is registered and has zero regions.
pub fn apply_hooks(dataset: &mut ReferenceDataset, hooks: &[SynthesizedRegions]) {
    for hook in hooks {
        let default_pue = dataset.default_pue_for(hook.provider_code);

        let mut synthesized = Vec::new();
        {
            let Some(provider) = dataset.providers.get(hook.provider_code) else {
                continue;
            };
            if !provider.regions.is_empty() {
                continue;
            }
            for def in hook.regions {
                if provider.regions.contains_key(def.region_name) {
                    continue;
                }
                let (ci, is_fallback) =
                    dataset.resolve_intensity(Some(def.location), Some(def.location_free));
                synthesized.push((
                    def.region_name.to_string(),
                    Region {
                        location_code: Some(def.location.to_string()),
                        location_free: Some(def.location_free.to_string()),
                        pue: default_pue,
                        carbon_intensity_g_per_kwh: ci,
                        ci_is_fallback: is_fallback,
                    },
                ));
            }
        }

        if synthesized.is_empty() {
            continue;
        }
        info!(
            provider = hook.provider_code,
            count = synthesized.len(),
            "synthesized fallback regions"
        );
        if let Some(provider) = dataset.providers.get_mut(hook.provider_code) {
            for (name, region) in synthesized {
                provider.regions.insert(name, region);
            }
        }
    }
}
