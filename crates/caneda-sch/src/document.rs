use crate::component::Component;
use crate::connectivity::NodeMap;
use crate::equipotential::{consolidate, Equipotential};
use crate::geometry::{Rect, Transform};
use crate::painting::Painting;
use crate::wire::Wire;
use serde::{Deserialize, Serialize};

/// Viewport and presentation state persisted alongside the item
/// collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub scene_rect: Rect,
    pub view_transform: Transform,
    pub horizontal_scroll: i32,
    pub vertical_scroll: i32,
    pub grid_visible: bool,
    pub grid_width: u32,
    pub grid_height: u32,
    /// Name of the dataset file produced by the last simulation run.
    pub dataset: String,
    /// Name of the display page presenting that dataset.
    pub data_display: String,
    pub opens_data_display: bool,
    pub frame_visible: bool,
    pub frame_texts: Vec<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            scene_rect: Rect::new(0.0, 0.0, 1024.0, 768.0),
            view_transform: Transform::default(),
            horizontal_scroll: 0,
            vertical_scroll: 0,
            grid_visible: true,
            grid_width: 10,
            grid_height: 10,
            dataset: String::new(),
            data_display: String::new(),
            opens_data_display: false,
            frame_visible: false,
            frame_texts: Vec::new(),
        }
    }
}

/// The complete schematic document: view state plus the three item
/// collections, and the raw text of the embedded symbol sub-document
/// (empty when the schematic carries none).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub view: ViewState,
    pub components: Vec<Component>,
    pub wires: Vec<Wire>,
    pub paintings: Vec<Painting>,
    pub symbol: String,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a component and returns its index.
    pub fn add_component(&mut self, component: Component) -> usize {
        self.components.push(component);
        self.components.len() - 1
    }

    /// Appends a wire and returns its index.
    pub fn add_wire(&mut self, wire: Wire) -> usize {
        self.wires.push(wire);
        self.wires.len() - 1
    }

    /// Appends a painting and returns its index.
    pub fn add_painting(&mut self, painting: Painting) -> usize {
        self.paintings.push(painting);
        self.paintings.len() - 1
    }

    /// Endpoint connectivity derived from the current item collections.
    pub fn node_map(&self) -> NodeMap {
        NodeMap::from_document(self)
    }

    /// The current equipotential partition of the document's wires.
    pub fn equipotentials(&self) -> Vec<Equipotential> {
        consolidate(&self.wires, &self.node_map())
    }
}
