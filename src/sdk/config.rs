use crate::sdk::map::canvas::{LineSymbol, MarkerStyle, MarkerSymbol, Outline};
use crate::sdk::map::geometry::MapPoint;
use std::{env, num::NonZeroU32, time::Duration};
use thiserror::Error;

pub const DEFAULT_ROUTE_SERVICE_URL: &str =
    "https://route-api.arcgis.com/arcgis/rest/services/World/Route/NAServer/Route_World";

const LAYER_BASE_URL: &str = "https://services3.arcgis.com/GVgbJbqm8hXASVYi/arcgis/rest/services";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: \"{value}\"")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct RoutingConfig {
    pub api_key: String,
    pub service_url: String,
    pub requests_per_minute: NonZeroU32,
    pub timeout: Duration,
    pub route_line: LineSymbol,
}

impl RoutingConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            service_url: DEFAULT_ROUTE_SERVICE_URL.to_string(),
            requests_per_minute: NonZeroU32::new(30).unwrap_or(NonZeroU32::MIN),
            timeout: Duration::from_secs(15),
            route_line: LineSymbol {
                color: [5, 150, 255],
                width: 3.0,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct LayerUrls {
    pub trailheads: String,
    pub trails: String,
    pub parks: String,
}

#[derive(Debug, Clone)]
pub struct MapConfig {
    pub basemap: String,
    pub zoom: u8,
    pub center: MapPoint,
    pub default_marker: MapPoint,
    pub default_marker_symbol: MarkerSymbol,
    pub origin_symbol: MarkerSymbol,
    pub destination_symbol: MarkerSymbol,
    pub layers: LayerUrls,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            basemap: "streets-navigation-vector".to_string(),
            zoom: 12,
            center: MapPoint {
                longitude: -118.43,
                latitude: 34.22,
            },
            default_marker: MapPoint {
                longitude: -118.38,
                latitude: 33.34,
            },
            default_marker_symbol: MarkerSymbol {
                style: MarkerStyle::Triangle,
                color: "red".to_string(),
                size: 15.0,
                outline: Some(Outline {
                    color: "white".to_string(),
                    width: 2.0,
                }),
            },
            origin_symbol: MarkerSymbol::circle("white", 8.0),
            destination_symbol: MarkerSymbol::circle("black", 8.0),
            layers: LayerUrls {
                trailheads: format!("{}/Trailheads/FeatureServer/0", LAYER_BASE_URL),
                trails: format!("{}/Trails/FeatureServer/0", LAYER_BASE_URL),
                parks: format!("{}/Parks_and_Open_Space/FeatureServer/0", LAYER_BASE_URL),
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub routing: RoutingConfig,
    pub map: MapConfig,
}

impl AppConfig {
    /// Reads `ARCGIS_API_KEY` plus the optional `ROUTE_*` overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let api_key = lookup("ARCGIS_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::Missing("ARCGIS_API_KEY"))?;
        let mut routing = RoutingConfig::new(api_key);

        if let Some(url) = lookup("ROUTE_SERVICE_URL") {
            routing.service_url = url.trim_end_matches('/').to_string();
        }
        if let Some(value) = lookup("ROUTE_REQUESTS_PER_MINUTE") {
            routing.requests_per_minute = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid {
                    name: "ROUTE_REQUESTS_PER_MINUTE",
                    value,
                })?;
        }
        if let Some(value) = lookup("ROUTE_TIMEOUT_SECS") {
            let secs = value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::Invalid {
                    name: "ROUTE_TIMEOUT_SECS",
                    value,
                })?;
            routing.timeout = Duration::from_secs(secs);
        }

        Ok(Self {
            routing,
            map: MapConfig::default(),
        })
    }
}
