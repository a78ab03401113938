//! Startup and summary binary for the atlas core.
//!
//! Performs the full startup sequence (config, token, dataset) and prints
//! one recompute pass. Exists to exercise the startup error surface from the
//! command line; it serves no UI.

use std::collections::BTreeSet;

use dragonfly_atlas::config::{
    AtlasConfig, ConfigOverrides, DataOverrides, MapOverrides,
};
use dragonfly_atlas::{Atlas, FilterEvent};

fn parse_arg(flag: &str) -> Option<String> {
    let mut args = std::env::args();
    while let Some(arg) = args.next() {
        if arg == flag {
            return args.next();
        }
    }
    None
}

fn has_flag(flag: &str) -> bool {
    std::env::args().any(|arg| arg == flag)
}

fn print_help() {
    eprintln!(
        r#"atlas_report - load the occurrence dataset and print a dashboard summary

USAGE:
    atlas_report [OPTIONS]

OPTIONS:
    -c, --config <FILE>      Path to config file (TOML)
    -d, --data <FILE>        Override dataset path
        --token-file <FILE>  Override map token file [default: .mapbox_token]
        --country <NAME>     Apply a country filter before printing
        --json               Print the full view as JSON
    -h, --help               Print help

ENVIRONMENT:
    MAPBOX_TOKEN             Map-tile token (takes precedence over the file)
    ATLAS_DATA__PATH         Dataset path
    ATLAS_MAP__HEX_RESOLUTION  Default hexbin resolution

CONFIG FILE (atlas.toml):
    [data]
    path = "data/dragonfly_database.parquet"

    [map]
    hex_resolution = 100
"#
    );
}

fn main() -> anyhow::Result<()> {
    if has_flag("-h") || has_flag("--help") {
        print_help();
        return Ok(());
    }

    tracing_subscriber::fmt::init();

    // Build CLI overrides
    let mut overrides = ConfigOverrides::default();
    if let Some(data) = parse_arg("--data").or_else(|| parse_arg("-d")) {
        overrides.data = Some(DataOverrides {
            path: Some(data.into()),
        });
    }
    if let Some(token_file) = parse_arg("--token-file") {
        overrides.map = Some(MapOverrides {
            token_file: Some(token_file.into()),
            hex_resolution: None,
        });
    }

    let config_path = parse_arg("--config").or_else(|| parse_arg("-c"));
    let config = AtlasConfig::load(config_path.as_deref(), overrides)?;

    let atlas = Atlas::boot(config)?;
    let mut session = atlas.session();

    if let Some(country) = parse_arg("--country") {
        let selected: BTreeSet<String> = [country].into();
        session.apply(FilterEvent::Countries(selected))?;
    }

    let view = session.view();
    if has_flag("--json") {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("occurrences: {}", view.occurrences_label());
    println!("species:     {}", view.species_label());
    println!("map cells:   {}", view.map.len());
    println!("regions:     {}", session.region_options().len() - 1);
    println!();
    println!("top groups ({}):", session.state().grouping);
    for group in view.bar.iter().take(10) {
        println!("  {:>8}  {}", group.count, group.label);
    }

    Ok(())
}
