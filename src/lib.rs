pub mod sdk;

pub use sdk::config::{AppConfig, MapConfig, RoutingConfig};
pub use sdk::directions::DirectionsView;
pub use sdk::map::{init_map, GraphicStore, MapCanvas, MapPoint, MemoryCanvas};
pub use sdk::routing::{ArcGisRouteProvider, RouteError, RouteRequester};
pub use sdk::session::{RouteSession, SessionController, SessionEvent};
