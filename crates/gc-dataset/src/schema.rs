//! Per-table column schemas.
//!
//! Source data format is not a stable contract: the reference datasets
//! exist in two layouts with different carbon-intensity headers. The
//! loader stays generic over a `TableSchemas` value so a layout change
//! never touches the loading logic itself.

/// Column names for the providers table.
#[derive(Debug, Clone)]
pub struct ProviderColumns {
    pub header_keyword: &'static str,
    pub code: &'static str,
    pub name: &'static str,
}

impl Default for ProviderColumns {
    fn default() -> Self {
        Self {
            header_keyword: "provider",
            code: "provider",
            name: "providerName",
        }
    }
}

/// Column names for the default-efficiency table.
#[derive(Debug, Clone)]
pub struct DefaultPueColumns {
    pub header_keyword: &'static str,
    pub provider: &'static str,
    pub pue: &'static str,
}

impl Default for DefaultPueColumns {
    fn default() -> Self {
        Self {
            header_keyword: "provider",
            provider: "provider",
            pue: "PUE",
        }
    }
}

/// Column names for the datacenter/region table.
#[derive(Debug, Clone)]
pub struct DatacenterColumns {
    pub header_keyword: &'static str,
    pub provider: &'static str,
    pub region_name: &'static str,
    pub location: &'static str,
    pub location_free: &'static str,
    pub pue: &'static str,
}

impl Default for DatacenterColumns {
    fn default() -> Self {
        Self {
            header_keyword: "provider",
            provider: "provider",
            region_name: "Name",
            location: "location",
            location_free: "location_freeForm",
            pue: "PUE",
        }
    }
}

/// Column names for the CPU table. The manufacturer column appears with
/// either capitalization in the wild, so candidates are tried in order.
#[derive(Debug, Clone)]
pub struct CpuColumns {
    pub header_keyword: &'static str,
    pub model: &'static str,
    pub manufacturer: &'static [&'static str],
    pub tdp: &'static str,
    pub cores: &'static str,
}

impl Default for CpuColumns {
    fn default() -> Self {
        Self {
            header_keyword: "model",
            model: "model",
            manufacturer: &["Manufacturer", "manufacturer"],
            tdp: "TDP",
            cores: "n_cores",
        }
    }
}

/// Column names for the optional hardware-defaults table, a generic
/// key/value listing.
#[derive(Debug, Clone)]
pub struct HardwareColumns {
    pub header_keyword: &'static str,
    pub key: &'static str,
    pub value: &'static str,
}

impl Default for HardwareColumns {
    fn default() -> Self {
        Self {
            header_keyword: "variable",
            key: "variable",
            value: "value",
        }
    }
}

/// Carbon-intensity table layout.
///
/// `intensity` candidates are in preference order: life-cycle emissions
/// first, direct emissions as the secondary metric for the same row.
/// `names` are free-text geography columns, most specific first.
#[derive(Debug, Clone)]
pub struct CarbonSchema {
    pub header_keyword: &'static str,
    pub zone: &'static str,
    pub intensity: &'static [&'static str],
    pub names: &'static [&'static str],
}

impl CarbonSchema {
    /// Layout of the aggregated dataset (`CI_aggregated.csv`).
    pub fn aggregated() -> Self {
        Self {
            header_keyword: "location",
            zone: "location",
            intensity: &["carbonIntensity"],
            names: &["regionName", "countryName", "continentName"],
        }
    }

    /// Layout of the Electricity Maps yearly export
    /// (`CI-electricitymap-yearly_2024.csv`).
    pub fn electricity_map() -> Self {
        Self {
            header_keyword: "Zone id",
            zone: "Zone id",
            intensity: &[
                "Carbon intensity gCO2eq/kWh (Life cycle)",
                "Carbon intensity gCO2eq/kWh (direct)",
            ],
            names: &["Zone name", "Country"],
        }
    }
}

impl Default for CarbonSchema {
    fn default() -> Self {
        Self::aggregated()
    }
}

/// Schemas for all six source tables.
#[derive(Debug, Clone, Default)]
pub struct TableSchemas {
    pub providers: ProviderColumns,
    pub default_pue: DefaultPueColumns,
    pub datacenters: DatacenterColumns,
    pub cpus: CpuColumns,
    pub hardware: HardwareColumns,
    pub carbon: CarbonSchema,
}

impl TableSchemas {
    pub fn with_carbon(carbon: CarbonSchema) -> Self {
        Self {
            carbon,
            ..Self::default()
        }
    }
}
