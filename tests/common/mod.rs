#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

const PAYLOAD_FIELDS: [&str; 7] = [
    "name",
    "model",
    "year",
    "color",
    "price",
    "latitude",
    "longitude",
];

struct Store {
    vehicles: Vec<Value>,
    next_id: i64,
}

type SharedStore = Arc<Mutex<Store>>;

pub fn vehicle_json(id: i64, name: &str, color: &str, latitude: f64, longitude: f64) -> Value {
    json!({
        "name": name,
        "model": "Model S",
        "year": "2020-01-01",
        "color": color,
        "price": 50000,
        "latitude": latitude,
        "longitude": longitude,
        "id": id,
    })
}

/// In-memory inventory service. Rejects write bodies that carry an `id`
/// or miss a vehicle field.
pub fn inventory_router(seed: Vec<Value>) -> Router {
    let next_id = seed
        .iter()
        .filter_map(|v| v["id"].as_i64())
        .max()
        .unwrap_or(0)
        + 1;
    let store = Arc::new(Mutex::new(Store {
        vehicles: seed,
        next_id,
    }));

    Router::new()
        .route("/vehicles", get(list_vehicles).post(create_vehicle))
        .route(
            "/vehicles/:id",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
        .with_state(store)
}

pub fn failing_router() -> Router {
    Router::new().fallback(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") })
}

pub fn malformed_router() -> Router {
    Router::new()
        .route(
            "/vehicles",
            get(|| async { Json(json!([{ "name": "Tesla", "price": "cheap" }])) }),
        )
        .route(
            "/vehicles/:id",
            get(|| async {
                let mut vehicle = vehicle_json(1, "Tesla", "red", 0.0, 0.0);
                vehicle["wheels"] = json!(4);
                Json(vehicle)
            }),
        )
}

/// Serves `router` on an ephemeral port from a background runtime and
/// returns its base URL.
pub fn spawn_server(router: Router) -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();
    listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            axum::serve(listener, router).await.unwrap();
        });
    });

    format!("http://{}", address)
}

fn is_valid_payload(body: &Value) -> bool {
    body.get("id").is_none() && PAYLOAD_FIELDS.iter().all(|field| body.get(field).is_some())
}

async fn list_vehicles(State(store): State<SharedStore>) -> Json<Value> {
    let store = store.lock().unwrap();
    Json(Value::Array(store.vehicles.clone()))
}

async fn get_vehicle(
    State(store): State<SharedStore>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, StatusCode> {
    let store = store.lock().unwrap();
    store
        .vehicles
        .iter()
        .find(|v| v["id"] == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn create_vehicle(
    State(store): State<SharedStore>,
    Json(mut body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), StatusCode> {
    if !is_valid_payload(&body) {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }

    let mut store = store.lock().unwrap();
    body["id"] = json!(store.next_id);
    store.next_id += 1;
    store.vehicles.push(body.clone());

    Ok((StatusCode::CREATED, Json(body)))
}

async fn update_vehicle(
    State(store): State<SharedStore>,
    Path(id): Path<i64>,
    Json(mut body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    if !is_valid_payload(&body) {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }

    let mut store = store.lock().unwrap();
    let existing = store
        .vehicles
        .iter_mut()
        .find(|v| v["id"] == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    body["id"] = json!(id);
    *existing = body.clone();

    Ok(Json(body))
}

async fn delete_vehicle(State(store): State<SharedStore>, Path(id): Path<i64>) -> StatusCode {
    let mut store = store.lock().unwrap();
    let position = store.vehicles.iter().position(|v| v["id"] == id);
    match position {
        Some(index) => {
            store.vehicles.remove(index);
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}
