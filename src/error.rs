use reqwest::StatusCode;
use thiserror::Error;

/// Failures surfaced by [`crate::clients::vehicle_client::VehicleManager`].
#[derive(Debug, Error)]
pub enum VehicleError {
    /// Building the client, sending the request or reading the response body failed.
    #[error("vehicle service transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The service answered with a non-2xx status.
    #[error("vehicle service responded with {status} for {url}: {body}")]
    Status {
        status: StatusCode,
        url: String,
        body: String,
    },
    /// The response body is not a vehicle (or a list of vehicles).
    #[error("failed to decode vehicle: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("vehicle has no id")]
    MissingId,
    #[error("'{0}' is not a vehicle field")]
    UnknownField(String),
}

pub type Result<T> = std::result::Result<T, VehicleError>;
