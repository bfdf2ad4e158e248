pub mod error;
pub mod provider;
pub mod route;
pub mod service;

pub use error::{RouteError, RoutingError};
pub use provider::ArcGisRouteProvider;
pub use route::{DirectionStep, RouteRequester, SolvedRoute};
pub use service::{DirectionFeature, RouteCandidate, RoutingProvider};
