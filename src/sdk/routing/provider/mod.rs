pub mod arcgis;
pub mod types;

pub use arcgis::ArcGisRouteProvider;
