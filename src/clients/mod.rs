pub mod vehicle_client;
