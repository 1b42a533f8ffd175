use anyhow::Result;

fn main() -> Result<()> {
    // Initialize core
    waypoint_core::init()?;

    let (config, _validation) = waypoint_core::Config::load_validated()?;

    tracing::info!("Waypoint application started");

    println!("Waypoint - Saved Locations");
    println!("Configuration loaded successfully!");
    println!("\nConfiguration:");
    println!("  Config directory: {}", config.config_dir.display());
    println!("  Store API: {}", config.store.api_url);
    println!("  Geocoding: {}", config.geocoding.search_url);

    Ok(())
}
