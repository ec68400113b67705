use anyhow::Result;
use log::info;

use vehicle_manager::{config, logger::setup_logger, VehicleManager};

fn main() -> Result<()> {
    let config = config::read_config()?;
    setup_logger(config.log_level.as_deref())?;

    let manager = VehicleManager::from_config(&config)?;
    info!("Listing vehicles from {}", manager.url());

    let vehicles = manager.get_vehicles()?;
    for vehicle in &vehicles {
        match vehicle.nearest(&vehicles) {
            Some(nearest) => println!(
                "{vehicle} nearest {nearest} ({:.0} m)",
                vehicle.distance_to(nearest)
            ),
            None => println!("{vehicle}"),
        }
    }

    Ok(())
}
