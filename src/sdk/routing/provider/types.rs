use serde::{Deserialize, Serialize};

// --- Wire structures for the NAServer `solve` operation ---

#[derive(Serialize)]
pub struct SpatialReference {
    pub wkid: u32,
}

#[derive(Serialize)]
pub struct StopGeometry {
    pub x: f64,
    pub y: f64,
    #[serde(rename = "spatialReference")]
    pub spatial_reference: SpatialReference,
}

#[derive(Serialize)]
pub struct StopAttributes {
    #[serde(rename = "Name")]
    pub name: String,
}

#[derive(Serialize)]
pub struct StopFeature {
    pub geometry: StopGeometry,
    pub attributes: StopAttributes,
}

#[derive(Serialize)]
pub struct StopFeatureSet {
    pub features: Vec<StopFeature>,
}

#[derive(Deserialize, Debug)]
pub struct SolveResponse {
    #[serde(default)]
    pub routes: Option<RouteFeatureSet>,
    #[serde(default)]
    pub directions: Vec<DirectionSet>,
}

#[derive(Deserialize, Debug)]
pub struct RouteFeatureSet {
    #[serde(default)]
    pub features: Vec<RouteFeature>,
}

#[derive(Deserialize, Debug)]
pub struct RouteFeature {
    pub geometry: Option<PolylineGeometry>,
}

#[derive(Deserialize, Debug)]
pub struct PolylineGeometry {
    #[serde(default)]
    pub paths: Vec<Vec<[f64; 2]>>,
}

#[derive(Deserialize, Debug)]
pub struct DirectionSet {
    #[serde(rename = "routeId")]
    pub route_id: Option<i64>,
    #[serde(default)]
    pub features: Vec<DirectionFeature>,
}

#[derive(Deserialize, Debug)]
pub struct DirectionFeature {
    pub attributes: DirectionAttributes,
}

#[derive(Deserialize, Debug)]
pub struct DirectionAttributes {
    pub text: String,
    /// Segment length in the requested units (miles).
    pub length: f64,
}
