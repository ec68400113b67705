use std::time::Duration;

use log::{debug, error, warn};
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::calculations::calculate_distance;
use crate::config::Config;
use crate::error::{Result, VehicleError};
use crate::models::vehicle::{Vehicle, VEHICLE_FIELDS};

fn field_matches(actual: Option<&Value>, expected: &Value) -> bool {
    let actual = actual.unwrap_or(&Value::Null);
    if let (Some(a), Some(e)) = (actual.as_i64(), expected.as_i64()) {
        return a == e;
    }
    match (actual.as_f64(), expected.as_f64()) {
        (Some(a), Some(e)) => a == e,
        _ => actual == expected,
    }
}

/// Blocking client for the vehicle inventory service.
///
/// Holds no data of its own: every call goes to `{url}/vehicles`.
#[derive(Debug, Clone)]
pub struct VehicleManager {
    url: String,
    client: Client,
}

impl VehicleManager {
    pub fn new(url: &str) -> VehicleManager {
        VehicleManager::with_client(url, Client::new())
    }

    pub fn with_client(url: &str, client: Client) -> VehicleManager {
        VehicleManager {
            url: url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Builds a manager for `config.api_url`, applying the request timeout if one is set.
    pub fn from_config(config: &Config) -> Result<VehicleManager> {
        let mut builder = Client::builder();
        if let Some(seconds) = config.request_timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        Ok(VehicleManager::with_client(&config.api_url, builder.build()?))
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn collection_url(&self) -> String {
        format!("{}/vehicles", self.url)
    }

    fn resource_url(&self, id: i64) -> String {
        format!("{}/vehicles/{}", self.url, id)
    }

    fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send()?;

        let status = response.status();
        if !status.is_success() {
            let url = response.url().to_string();
            let body = response.text().unwrap_or_default();
            error!("Vehicle service responded with {} for {}", status, url);
            return Err(VehicleError::Status { status, url, body });
        }

        Ok(response)
    }

    fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let bytes = response.bytes()?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn fetch_vehicles(&self) -> Result<Vec<Value>> {
        let url = self.collection_url();
        debug!("GET {}", url);

        let response = self.send(self.client.get(url))?;
        Self::read_json(response)
    }

    pub fn get_vehicles(&self) -> Result<Vec<Vehicle>> {
        self.fetch_vehicles()?
            .into_iter()
            .map(Vehicle::from_json)
            .collect()
    }

    /// Returns the vehicles whose fields equal every value in `params`, in server order.
    ///
    /// Matching is exact equality on the raw records. Numbers compare by value,
    /// so `{"latitude": 10}` matches `10.0`. An absent `id` compares equal to `null`.
    pub fn filter_vehicles(&self, params: &Map<String, Value>) -> Result<Vec<Vehicle>> {
        if let Some(field) = params
            .keys()
            .find(|key| !VEHICLE_FIELDS.contains(&key.as_str()))
        {
            return Err(VehicleError::UnknownField(field.clone()));
        }

        self.fetch_vehicles()?
            .into_iter()
            .filter(|raw| {
                params
                    .iter()
                    .all(|(key, value)| field_matches(raw.get(key), value))
            })
            .map(Vehicle::from_json)
            .collect()
    }

    pub fn get_vehicle(&self, id: i64) -> Result<Vehicle> {
        let url = self.resource_url(id);
        debug!("GET {}", url);

        let response = self.send(self.client.get(url))?;
        Self::read_json(response)
    }

    /// Creates `vehicle` and returns the stored record with its assigned id.
    pub fn add_vehicle(&self, vehicle: &Vehicle) -> Result<Vehicle> {
        if let Some(id) = vehicle.id() {
            warn!("Ignoring id {} of new vehicle {}", id, vehicle);
        }

        let url = self.collection_url();
        debug!("POST {} {}", url, vehicle);

        let response = self.send(self.client.post(url).json(&vehicle.to_payload()))?;
        Self::read_json(response)
    }

    pub fn update_vehicle(&self, vehicle: &Vehicle) -> Result<Vehicle> {
        let id = vehicle.id().ok_or(VehicleError::MissingId)?;

        let url = self.resource_url(id);
        debug!("PUT {} {}", url, vehicle);

        let response = self.send(self.client.put(url).json(&vehicle.to_payload()))?;
        Self::read_json(response)
    }

    pub fn delete_vehicle(&self, id: i64) -> Result<()> {
        let url = self.resource_url(id);
        debug!("DELETE {}", url);

        self.send(self.client.delete(url))?;
        Ok(())
    }

    /// Distance in meters between two stored vehicles.
    pub fn get_distance(&self, id_1: i64, id_2: i64) -> Result<f64> {
        let vehicle_1 = self.get_vehicle(id_1)?;
        let vehicle_2 = self.get_vehicle(id_2)?;

        Ok(calculate_distance(
            vehicle_1.latitude(),
            vehicle_1.longitude(),
            vehicle_2.latitude(),
            vehicle_2.longitude(),
        ))
    }

    /// Finds the vehicle closest to vehicle `id`, excluding that vehicle itself.
    ///
    /// Among equidistant candidates the first one in server order wins.
    pub fn get_nearest_vehicle(&self, id: i64) -> Result<Option<Vehicle>> {
        let target = self.get_vehicle(id)?;
        let vehicles = self.get_vehicles()?;

        let nearest = target.nearest(&vehicles).cloned();
        if let Some(vehicle) = &nearest {
            debug!(
                "Nearest to {} is {} at {:.0} m",
                id,
                vehicle,
                target.distance_to(vehicle)
            );
        }

        Ok(nearest)
    }
}
