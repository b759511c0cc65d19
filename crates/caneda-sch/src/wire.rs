use crate::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Selects one of a wire's two endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WireEnd {
    Port1,
    Port2,
}

impl WireEnd {
    pub const BOTH: [WireEnd; 2] = [WireEnd::Port1, WireEnd::Port2];
}

/// A straight wire segment between two endpoints.
///
/// Endpoints are plain scene coordinates; whether an endpoint is connected
/// to anything is a property of the document's node map, not of the wire. A
/// wire with a dangling endpoint is perfectly valid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wire {
    pub port1: Point,
    pub port2: Point,
}

impl Wire {
    pub fn new(port1: Point, port2: Point) -> Self {
        Self { port1, port2 }
    }

    pub fn endpoint(&self, end: WireEnd) -> Point {
        match end {
            WireEnd::Port1 => self.port1,
            WireEnd::Port2 => self.port2,
        }
    }

    /// Normalized bounding rectangle grown by `margin` on every side, so a
    /// zero-thickness segment still has a pickable area.
    pub fn bounding_rect(&self, margin: f64) -> Rect {
        Rect::from_points(self.port1, self.port2).adjusted(margin)
    }
}
