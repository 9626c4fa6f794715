use gc_dataset::{CarbonSchema, DatasetError, LoadOptions, RawTables, TableSchemas, load};

fn sample_tables() -> RawTables {
    RawTables {
        providers: "provider,providerName\ngcp,Google Cloud Platform\nazure,Microsoft Azure\n"
            .to_string(),
        datacenters: "\
provider,Name,location,location_freeForm,PUE
gcp,europe-west1,BE,\"St. Ghislain, Belgium\",1.08
gcp,us-east4,US-VA,,
azure,East US,US-VA,Virginia,1.18
azure,Mystery,,Atlantis,1.3
"
        .to_string(),
        default_pue: "provider,PUE\ngcp,1.1\nUnknown,1.4\nbad,not-a-number\n".to_string(),
        carbon: "\
location,carbonIntensity,regionName,countryName,continentName
US-VA,350,Virginia,United States,North America
BE,160,,Belgium,Europe
US-VA,999,Duplicate,,
"
        .to_string(),
        cpus: "\
model,Manufacturer,TDP,n_cores
Xeon E5-2660,Intel,95,8
Average,,100,8
EPYC 7571,AMD,180,32
Broken,Intel,,16
NegCores,Intel,95,-4
Xeon E5-2660,Intel,500,1
"
        .to_string(),
        hardware: Some("variable,value\nmemoryPower,0.42\nother,9\n".to_string()),
    }
}

#[test]
fn full_load_assembles_dataset() {
    let ds = load(&sample_tables(), &LoadOptions::default()).expect("load should succeed");

    assert_eq!(ds.providers.len(), 2);
    assert_eq!(ds.providers["gcp"].name, "Google Cloud Platform");
    assert_eq!(ds.providers["gcp"].regions.len(), 2);
    assert_eq!(ds.default_mem_power_w_per_gb, 0.42);
}

#[test]
fn datacenter_pue_fallback_chain() {
    let ds = load(&sample_tables(), &LoadOptions::default()).unwrap();

    // Row value wins when finite.
    let belgium = &ds.providers["gcp"].regions["europe-west1"];
    assert_eq!(belgium.pue, 1.08);

    // Missing row value: provider default.
    let virginia = &ds.providers["gcp"].regions["us-east4"];
    assert_eq!(virginia.pue, 1.1);
}

#[test]
fn unknown_provider_default_pue_applies() {
    let mut tables = sample_tables();
    tables.datacenters.push_str("hidden,r1,US-VA,,\n");
    tables.providers.push_str("hidden,Hidden Cloud\n");
    let ds = load(&tables, &LoadOptions::default()).unwrap();

    // "hidden" has no default-efficiency entry: the Unknown entry applies.
    assert_eq!(ds.providers["hidden"].regions["r1"].pue, 1.4);
}

#[test]
fn carbon_intensity_first_seen_wins() {
    let ds = load(&sample_tables(), &LoadOptions::default()).unwrap();

    assert_eq!(ds.carbon_by_zone["US-VA"], 350.0);
    // Base prefix registered from the first US-VA row too.
    assert_eq!(ds.carbon_by_zone["US"], 350.0);
    assert_eq!(ds.carbon_by_name["virginia"], 350.0);
    assert_eq!(ds.carbon_by_name["europe"], 160.0);
}

#[test]
fn datacenter_regions_resolve_intensity() {
    let ds = load(&sample_tables(), &LoadOptions::default()).unwrap();

    let east_us = &ds.providers["azure"].regions["East US"];
    assert_eq!(east_us.carbon_intensity_g_per_kwh, 350.0);
    assert!(!east_us.ci_is_fallback);

    // No code, unknown free text: fallback constant, flagged.
    let mystery = &ds.providers["azure"].regions["Mystery"];
    assert_eq!(
        mystery.carbon_intensity_g_per_kwh,
        ds.fallback_intensity_g_per_kwh
    );
    assert!(mystery.ci_is_fallback);
}

#[test]
fn cpu_rows_are_filtered_and_deduplicated() {
    let ds = load(&sample_tables(), &LoadOptions::default()).unwrap();

    assert_eq!(ds.cpus.len(), 2);
    let xeon = &ds.cpus["Intel Xeon E5-2660"];
    // Duplicate key later in the table must not overwrite.
    assert_eq!(xeon.tdp_w, 95.0);
    assert_eq!(xeon.cores, 8.0);
    assert!(!ds.cpus.contains_key("Average"));
    assert!(!ds.cpus.contains_key("Intel Broken"));
    assert!(!ds.cpus.contains_key("Intel NegCores"));
}

#[test]
fn provider_merge_preserves_regions() {
    // Datacenter table first registers the provider (upper-cased code as
    // name), providers table then supplies the display name; regions must
    // survive the merge. Exercised here by a providers table listing the
    // provider after its datacenters were processed in sample_tables().
    let mut tables = sample_tables();
    tables.providers = "provider,providerName\ngcp,Google Cloud Platform\n".to_string();
    let ds = load(&tables, &LoadOptions::default()).unwrap();

    // azure only appears in the datacenter table.
    assert_eq!(ds.providers["azure"].name, "AZURE");
    assert_eq!(ds.providers["azure"].regions.len(), 2);
}

#[test]
fn electricity_map_schema_prefers_life_cycle() {
    let mut tables = sample_tables();
    tables.carbon = "\
Zone id,Zone name,Country,Carbon intensity gCO2eq/kWh (direct),Carbon intensity gCO2eq/kWh (Life cycle)
US-VA,Virginia,United States,300,350
SE,Sweden,Sweden,12,
"
    .to_string();
    let options = LoadOptions {
        schemas: TableSchemas::with_carbon(CarbonSchema::electricity_map()),
        ..LoadOptions::default()
    };
    let ds = load(&tables, &options).unwrap();

    // Life-cycle preferred, direct used when life-cycle is absent.
    assert_eq!(ds.carbon_by_zone["US-VA"], 350.0);
    assert_eq!(ds.carbon_by_zone["SE"], 12.0);
    assert_eq!(ds.carbon_by_name["virginia"], 350.0);
}

#[test]
fn missing_header_aborts_load() {
    let mut tables = sample_tables();
    tables.providers = "a,b\nc,d\n".to_string();
    let err = load(&tables, &LoadOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        DatasetError::MissingHeader {
            table: "providers",
            ..
        }
    ));
}

#[test]
fn empty_carbon_table_aborts_load() {
    let mut tables = sample_tables();
    tables.carbon = "location,carbonIntensity\n".to_string();
    let err = load(&tables, &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, DatasetError::EmptyTable { table: "carbon" }));
}

#[test]
fn header_scan_skips_leading_metadata() {
    let mut tables = sample_tables();
    tables.providers = format!("# exported from GA-data\n\n{}", tables.providers);
    let ds = load(&tables, &LoadOptions::default()).unwrap();
    assert!(ds.providers.contains_key("gcp"));
}

#[test]
fn synthesized_regions_fill_empty_aws() {
    let mut tables = sample_tables();
    tables.providers.push_str("aws,Amazon Web Services\n");
    let ds = load(&tables, &LoadOptions::default()).unwrap();

    let aws = &ds.providers["aws"];
    assert!(!aws.regions.is_empty());
    let virginia = &aws.regions["US East (N. Virginia)"];
    assert_eq!(virginia.carbon_intensity_g_per_kwh, 350.0);
    assert!(!virginia.ci_is_fallback);
    // PUE from the Unknown default-efficiency entry.
    assert_eq!(virginia.pue, 1.4);
}

#[test]
fn synthesized_regions_can_be_disabled() {
    let mut tables = sample_tables();
    tables.providers.push_str("aws,Amazon Web Services\n");
    let options = LoadOptions {
        synthesized_regions: Vec::new(),
        ..LoadOptions::default()
    };
    let ds = load(&tables, &options).unwrap();
    assert!(ds.providers["aws"].regions.is_empty());
}

#[test]
fn load_is_deterministic() {
    let tables = sample_tables();
    let a = load(&tables, &LoadOptions::default()).unwrap();
    let b = load(&tables, &LoadOptions::default()).unwrap();
    assert_eq!(a, b);
}
