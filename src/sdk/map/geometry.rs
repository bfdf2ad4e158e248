use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum GeometryError {
    #[error("Coordinate out of range: lon={longitude}, lat={latitude}")]
    InvalidCoordinate { longitude: f64, latitude: f64 },

    #[error("Expected \"LON,LAT\", got \"{0}\"")]
    Malformed(String),
}

/// A WGS84 location as reported by a map click.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl MapPoint {
    pub fn new(longitude: f64, latitude: f64) -> Result<Self, GeometryError> {
        let valid = longitude.is_finite()
            && latitude.is_finite()
            && (-180.0..=180.0).contains(&longitude)
            && (-90.0..=90.0).contains(&latitude);
        if !valid {
            return Err(GeometryError::InvalidCoordinate {
                longitude,
                latitude,
            });
        }
        Ok(Self {
            longitude,
            latitude,
        })
    }
}

impl fmt::Display for MapPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.longitude, self.latitude)
    }
}

impl FromStr for MapPoint {
    type Err = GeometryError;

    /// Parses `"LON,LAT"`, the order the map widget and the routing service use.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lon, lat) = s
            .split_once(',')
            .ok_or_else(|| GeometryError::Malformed(s.to_string()))?;
        let longitude = lon
            .trim()
            .parse::<f64>()
            .map_err(|_| GeometryError::Malformed(s.to_string()))?;
        let latitude = lat
            .trim()
            .parse::<f64>()
            .map_err(|_| GeometryError::Malformed(s.to_string()))?;
        MapPoint::new(longitude, latitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    Origin,
    Destination,
}

/// A user-placed route stop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub kind: MarkerKind,
    pub location: MapPoint,
}

impl Marker {
    pub fn origin(location: MapPoint) -> Self {
        Self {
            kind: MarkerKind::Origin,
            location,
        }
    }

    pub fn destination(location: MapPoint) -> Self {
        Self {
            kind: MarkerKind::Destination,
            location,
        }
    }
}
