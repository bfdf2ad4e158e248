use super::canvas::{Graphic, GraphicId, LineSymbol, MapCanvas, MarkerSymbol};
use super::geometry::{MapPoint, Marker, MarkerKind};

#[derive(Debug, Clone)]
enum SessionGraphic {
    Marker(Marker),
    RouteLine,
}

/// Graphics placed on the map during the current route session.
///
/// Only what goes through this store is ever cleared; anything added to the
/// canvas directly (the default marker) stays put.
pub struct GraphicStore {
    canvas: Box<dyn MapCanvas>,
    origin_symbol: MarkerSymbol,
    destination_symbol: MarkerSymbol,
    entries: Vec<(GraphicId, SessionGraphic)>,
}

impl GraphicStore {
    pub fn new(
        canvas: Box<dyn MapCanvas>,
        origin_symbol: MarkerSymbol,
        destination_symbol: MarkerSymbol,
    ) -> Self {
        Self {
            canvas,
            origin_symbol,
            destination_symbol,
            entries: Vec::new(),
        }
    }

    pub fn add(&mut self, marker: Marker) {
        let symbol = match marker.kind {
            MarkerKind::Origin => self.origin_symbol.clone(),
            MarkerKind::Destination => self.destination_symbol.clone(),
        };
        let id = self.canvas.add_graphic(Graphic::Marker {
            point: marker.location,
            symbol,
        });
        log::debug!("Placed {:?} marker at {}", marker.kind, marker.location);
        self.entries.push((id, SessionGraphic::Marker(marker)));
    }

    pub fn add_route_line(&mut self, paths: Vec<Vec<MapPoint>>, symbol: LineSymbol) {
        let id = self.canvas.add_graphic(Graphic::Polyline { paths, symbol });
        self.entries.push((id, SessionGraphic::RouteLine));
    }

    pub fn clear(&mut self) {
        for (id, _) in self.entries.drain(..) {
            if !self.canvas.remove_graphic(id) {
                log::warn!("Session graphic {:?} was already gone from the map", id);
            }
        }
    }

    /// Number of route markers; the route line is not counted.
    pub fn count(&self) -> usize {
        self.markers().count()
    }

    pub fn markers(&self) -> impl Iterator<Item = &Marker> + '_ {
        self.entries.iter().filter_map(|(_, entry)| match entry {
            SessionGraphic::Marker(marker) => Some(marker),
            SessionGraphic::RouteLine => None,
        })
    }

    pub fn has_route_line(&self) -> bool {
        self.entries
            .iter()
            .any(|(_, entry)| matches!(entry, SessionGraphic::RouteLine))
    }

    pub fn canvas(&self) -> &dyn MapCanvas {
        self.canvas.as_ref()
    }
}
