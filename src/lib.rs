pub mod calculations;
pub mod clients;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;

pub use calculations::calculate_distance;
pub use clients::vehicle_client::VehicleManager;
pub use error::VehicleError;
pub use models::vehicle::Vehicle;
