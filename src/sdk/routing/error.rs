use serde::Deserialize;
use thiserror::Error;

// Error body returned by ArcGIS REST endpoints, often with HTTP 200
#[derive(Deserialize, Debug)]
pub struct ArcGisErrorDetail {
    pub code: i32,
    pub message: String,
    #[serde(default)]
    pub details: Vec<String>,
}
#[derive(Deserialize, Debug)]
pub struct ArcGisErrorPayload {
    pub error: ArcGisErrorDetail,
}

/// Failures of the routing collaborator itself.
#[derive(Error, Debug)]
pub enum RoutingError {
    #[error("API Error (Code {code}): {message}")]
    ApiError { code: i32, message: String },

    // Non-success status whose body isn't the expected JSON error
    #[error("Unstructured API Error: {0}")]
    RawApiError(String),

    #[error("Underlying request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("No route found between the selected points")]
    NoRoute,
}

/// What a route calculation reports back to the session.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouteError {
    #[error("Need at least 2 points to calculate route")]
    InsufficientStops,

    #[error("{0}")]
    RouteUnavailable(String),
}

impl From<RoutingError> for RouteError {
    fn from(err: RoutingError) -> Self {
        RouteError::RouteUnavailable(err.to_string())
    }
}
