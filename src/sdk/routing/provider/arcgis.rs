use super::types::{
    SolveResponse, SpatialReference, StopAttributes, StopFeature, StopFeatureSet, StopGeometry,
};
use crate::sdk::config::RoutingConfig;
use crate::sdk::map::geometry::MapPoint;
use crate::sdk::routing::error::{ArcGisErrorPayload, RoutingError};
use crate::sdk::routing::service::{DirectionFeature, RouteCandidate, RoutingProvider};
use crate::sdk::util::rate_limit::Limiter;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};

const WGS84: u32 = 4326;

pub struct ArcGisRouteProvider {
    client: Client,
    api_key: String,
    solve_url: String,
    limiter: Limiter,
}

impl ArcGisRouteProvider {
    pub fn new(config: &RoutingConfig, limiter: Limiter) -> Result<Self, RoutingError> {
        Ok(Self {
            client: Client::builder().timeout(config.timeout).build()?,
            api_key: config.api_key.clone(),
            solve_url: format!("{}/solve", config.service_url.trim_end_matches('/')),
            limiter,
        })
    }
}

fn stops_param(stops: &[MapPoint]) -> Result<String, RoutingError> {
    let features = stops
        .iter()
        .enumerate()
        .map(|(i, stop)| StopFeature {
            geometry: StopGeometry {
                x: stop.longitude,
                y: stop.latitude,
                spatial_reference: SpatialReference { wkid: WGS84 },
            },
            attributes: StopAttributes {
                name: format!("Location {}", i + 1),
            },
        })
        .collect();
    Ok(serde_json::to_string(&StopFeatureSet { features })?)
}

/// Form fields of a `solve` request, in the order they are sent.
fn solve_form<'a>(api_key: &'a str, stops_json: &'a str) -> [(&'static str, &'a str); 7] {
    [
        ("f", "json"),
        ("token", api_key),
        ("stops", stops_json),
        ("returnDirections", "true"),
        ("returnRoutes", "true"),
        ("directionsLengthUnits", "esriNAUMiles"),
        ("outSR", "4326"),
    ]
}

/// Error for a non-success HTTP status: the structured ArcGIS error when the
/// body carries one, the raw body otherwise.
fn error_for_status(status: StatusCode, text: String) -> RoutingError {
    if let Ok(payload) = serde_json::from_str::<ArcGisErrorPayload>(&text) {
        return RoutingError::ApiError {
            code: payload.error.code,
            message: payload.error.message,
        };
    }
    log::error!(
        "API returned non-success status: {}. Unparseable Body: {}",
        status,
        text
    );
    RoutingError::RawApiError(text)
}

/// Turns a `solve` response body into route candidates, pairing each route
/// with the direction set at the same position.
pub fn parse_solve_response(text: &str) -> Result<Vec<RouteCandidate>, RoutingError> {
    if let Ok(payload) = serde_json::from_str::<ArcGisErrorPayload>(text) {
        return Err(RoutingError::ApiError {
            code: payload.error.code,
            message: payload.error.message,
        });
    }

    let response: SolveResponse = serde_json::from_str(text)?;
    let routes = response.routes.map(|r| r.features).unwrap_or_default();

    Ok(routes
        .into_iter()
        .zip(response.directions)
        .map(|(route, directions)| RouteCandidate {
            paths: route
                .geometry
                .map(|g| g.paths)
                .unwrap_or_default()
                .into_iter()
                .map(|part| {
                    part.into_iter()
                        .map(|[x, y]| MapPoint {
                            longitude: x,
                            latitude: y,
                        })
                        .collect()
                })
                .collect(),
            directions: directions
                .features
                .into_iter()
                .map(|f| DirectionFeature {
                    text: f.attributes.text,
                    length_miles: f.attributes.length,
                })
                .collect(),
        })
        .collect())
}

#[async_trait]
impl RoutingProvider for ArcGisRouteProvider {
    async fn solve(&self, stops: &[MapPoint]) -> Result<Vec<RouteCandidate>, RoutingError> {
        let stops_json = stops_param(stops)?;
        let form = solve_form(&self.api_key, &stops_json);

        self.limiter.until_ready().await;
        log::debug!(
            "[PROVIDER] Calling ArcGIS solve for {} stops: {:?}",
            stops.len(),
            stops
        );

        let response = match self.client.post(&self.solve_url).form(&form).send().await {
            Ok(resp) => resp,
            Err(e) => {
                log::error!(
                    "Failed to send POST request. URL: {}\nStops: {}\nError: {}",
                    self.solve_url,
                    stops_json,
                    e
                );
                return Err(e.into());
            }
        };

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(error_for_status(status, text));
        }

        parse_solve_response(&text).map_err(|e| {
            log::error!(
                "Failed to parse SolveResponse. URL: {}\nError: {}. Body: {}",
                self.solve_url,
                e,
                text
            );
            e
        })
    }
}
