/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Great-circle distance in meters between two points given in degrees.
pub fn calculate_distance(
    latitude_1: f64,
    longitude_1: f64,
    latitude_2: f64,
    longitude_2: f64,
) -> f64 {
    let lat_1 = latitude_1.to_radians();
    let lat_2 = latitude_2.to_radians();
    let delta_lat = lat_2 - lat_1;
    let delta_lon = longitude_2.to_radians() - longitude_1.to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat_1.cos() * lat_2.cos() * (delta_lon / 2.0).sin().powi(2);

    EARTH_RADIUS_METERS * (2.0 * a.sqrt().atan2((1.0 - a).sqrt()))
}
