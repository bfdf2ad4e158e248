pub mod canvas;
pub mod geometry;
pub mod graphics;

pub use canvas::{
    FeatureLayer, Graphic, GraphicId, LineSymbol, MapCanvas, MapError, MarkerSymbol, MemoryCanvas,
};
pub use geometry::{GeometryError, MapPoint, Marker, MarkerKind};
pub use graphics::GraphicStore;

use crate::sdk::config::MapConfig;

/// Prepares a freshly created view: waits for it, adds the trail overlays and
/// the decorative default marker.
pub fn init_map(canvas: &mut dyn MapCanvas, config: &MapConfig) -> Result<(), MapError> {
    canvas.wait_until_ready().map_err(|e| {
        log::error!("Error setting up map view: {}", e);
        e
    })?;

    let layer = |title: &str, url: &str| FeatureLayer {
        title: title.to_string(),
        url: url.to_string(),
    };
    canvas.add_layer(layer("Parks and Open Space", &config.layers.parks), Some(0));
    canvas.add_layer(layer("Trails", &config.layers.trails), Some(0));
    canvas.add_layer(layer("Trailheads", &config.layers.trailheads), None);

    canvas.add_graphic(Graphic::Marker {
        point: config.default_marker,
        symbol: config.default_marker_symbol.clone(),
    });

    log::info!(
        "Map ready: basemap={} zoom={} center={}",
        config.basemap,
        config.zoom,
        config.center
    );
    Ok(())
}
