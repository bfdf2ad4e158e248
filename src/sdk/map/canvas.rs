use super::geometry::MapPoint;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MapError {
    #[error("Map view failed to initialize: {0}")]
    ViewInitializationFailure(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GraphicId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerStyle {
    Circle,
    Triangle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    pub color: String,
    pub width: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerSymbol {
    pub style: MarkerStyle,
    pub color: String,
    /// Size in pixels.
    pub size: f32,
    pub outline: Option<Outline>,
}

impl MarkerSymbol {
    pub fn circle(color: &str, size: f32) -> Self {
        Self {
            style: MarkerStyle::Circle,
            color: color.to_string(),
            size,
            outline: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSymbol {
    pub color: [u8; 3],
    pub width: f32,
}

/// Anything drawn on the map view's graphics layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Graphic {
    Marker {
        point: MapPoint,
        symbol: MarkerSymbol,
    },
    /// One vertex list per part; parts are not joined.
    Polyline {
        paths: Vec<Vec<MapPoint>>,
        symbol: LineSymbol,
    },
}

/// A read-only overlay served by a feature service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureLayer {
    pub title: String,
    pub url: String,
}

/// The mapping widget as seen by the route session.
///
/// Implementations own the visible graphics collection. Callers must wait on
/// [`MapCanvas::wait_until_ready`] before adding layers or graphics.
pub trait MapCanvas: Send {
    /// Blocks until the view is usable, or reports why it never will be.
    fn wait_until_ready(&mut self) -> Result<(), MapError>;

    /// Inserts a layer at `index` in the layer stack, or on top when `None`.
    fn add_layer(&mut self, layer: FeatureLayer, index: Option<usize>);

    fn add_graphic(&mut self, graphic: Graphic) -> GraphicId;

    /// Returns `false` if the id was not on the map.
    fn remove_graphic(&mut self, id: GraphicId) -> bool;

    /// Graphics currently drawn, in drawing order.
    fn graphics(&self) -> Vec<(GraphicId, Graphic)>;
}

/// Headless canvas that keeps the graphics and layers in memory.
#[derive(Debug, Default)]
pub struct MemoryCanvas {
    ready_error: Option<String>,
    next_id: u64,
    graphics: Vec<(GraphicId, Graphic)>,
    layers: Vec<FeatureLayer>,
}

impl MemoryCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// A canvas whose view never becomes ready.
    pub fn failing(reason: &str) -> Self {
        Self {
            ready_error: Some(reason.to_string()),
            ..Self::default()
        }
    }

    /// Layers from bottom to top.
    pub fn layers(&self) -> &[FeatureLayer] {
        &self.layers
    }
}

impl MapCanvas for MemoryCanvas {
    fn wait_until_ready(&mut self) -> Result<(), MapError> {
        match &self.ready_error {
            Some(reason) => Err(MapError::ViewInitializationFailure(reason.clone())),
            None => Ok(()),
        }
    }

    fn add_layer(&mut self, layer: FeatureLayer, index: Option<usize>) {
        match index {
            Some(i) => self.layers.insert(i.min(self.layers.len()), layer),
            None => self.layers.push(layer),
        }
    }

    fn add_graphic(&mut self, graphic: Graphic) -> GraphicId {
        self.next_id += 1;
        let id = GraphicId(self.next_id);
        self.graphics.push((id, graphic));
        id
    }

    fn remove_graphic(&mut self, id: GraphicId) -> bool {
        let before = self.graphics.len();
        self.graphics.retain(|(existing, _)| *existing != id);
        self.graphics.len() != before
    }

    fn graphics(&self) -> Vec<(GraphicId, Graphic)> {
        self.graphics.clone()
    }
}
