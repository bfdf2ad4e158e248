use super::error::RoutingError;
use crate::sdk::map::geometry::MapPoint;
use async_trait::async_trait;

/// One instruction segment of a route candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionFeature {
    pub text: String,
    pub length_miles: f64,
}

/// One complete path between the submitted stops.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteCandidate {
    /// Polyline parts in service order.
    pub paths: Vec<Vec<MapPoint>>,
    pub directions: Vec<DirectionFeature>,
}

#[async_trait]
pub trait RoutingProvider: Send + Sync {
    /// Solves a route through `stops` in order, with turn-by-turn directions.
    ///
    /// An empty vector means the service answered but found no route.
    async fn solve(&self, stops: &[MapPoint]) -> Result<Vec<RouteCandidate>, RoutingError>;
}
