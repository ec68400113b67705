use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::calculations::calculate_distance;
use crate::error::Result;

pub const VEHICLE_FIELDS: [&str; 8] = [
    "name",
    "model",
    "year",
    "color",
    "price",
    "latitude",
    "longitude",
    "id",
];

/// One inventory item as stored by the vehicle service.
///
/// Fields are read-only once constructed. Records built locally carry no id
/// until the service assigns one.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Vehicle {
    name: String,
    model: String,
    year: NaiveDate,
    color: String,
    price: i64,
    latitude: f64,
    longitude: f64,
    id: Option<i64>,
}

/// Request body for create and update calls. Never carries the id.
#[derive(Debug, Serialize)]
pub struct VehiclePayload<'a> {
    pub name: &'a str,
    pub model: &'a str,
    pub year: NaiveDate,
    pub color: &'a str,
    pub price: i64,
    pub latitude: f64,
    pub longitude: f64,
}

impl Vehicle {
    pub fn new(
        name: impl Into<String>,
        model: impl Into<String>,
        year: NaiveDate,
        color: impl Into<String>,
        price: i64,
        latitude: f64,
        longitude: f64,
    ) -> Vehicle {
        Vehicle {
            name: name.into(),
            model: model.into(),
            year,
            color: color.into(),
            price,
            latitude,
            longitude,
            id: None,
        }
    }

    /// Decodes a vehicle from a JSON object, rejecting missing, mistyped or
    /// unknown fields.
    pub fn from_json(value: Value) -> Result<Vehicle> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn with_id(self, id: i64) -> Vehicle {
        Vehicle { id: Some(id), ..self }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn year(&self) -> NaiveDate {
        self.year
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn price(&self) -> i64 {
        self.price
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn to_payload(&self) -> VehiclePayload<'_> {
        VehiclePayload {
            name: &self.name,
            model: &self.model,
            year: self.year,
            color: &self.color,
            price: self.price,
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    /// Key/value form of [`Vehicle::to_payload`].
    pub fn to_map(&self) -> Map<String, Value> {
        // A struct always serializes to an object.
        match serde_json::to_value(self.to_payload()) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    /// Haversine distance in meters to another vehicle.
    pub fn distance_to(&self, other: &Vehicle) -> f64 {
        calculate_distance(self.latitude, self.longitude, other.latitude, other.longitude)
    }

    /// Closest of `vehicles`, skipping those with this vehicle's id.
    ///
    /// Among equidistant candidates the first one wins.
    pub fn nearest<'a>(&self, vehicles: &'a [Vehicle]) -> Option<&'a Vehicle> {
        let mut min_distance = f64::INFINITY;
        let mut nearest = None;

        for vehicle in vehicles {
            if vehicle.id == self.id {
                continue;
            }

            let distance = self.distance_to(vehicle);
            if distance < min_distance {
                min_distance = distance;
                nearest = Some(vehicle);
            }
        }

        nearest
    }
}

impl TryFrom<Value> for Vehicle {
    type Error = crate::error::VehicleError;

    fn try_from(value: Value) -> Result<Vehicle> {
        Vehicle::from_json(value)
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Vehicle: {} {} {} {} {}>",
            self.name, self.model, self.year, self.color, self.price
        )
    }
}
