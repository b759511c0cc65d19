//! Endpoint connectivity as an explicit graph.
//!
//! The editing shell of the original application kept live port objects
//! with bidirectional connection lists. Here connectivity is a value: a map
//! from an exact endpoint coordinate to every port sitting at it. The map
//! is derived from a document on demand, or grown one item at a time while
//! a document is being reconstructed from its persisted form.

use crate::component::Component;
use crate::document::Document;
use crate::geometry::Point;
use crate::wire::{Wire, WireEnd};
use std::collections::HashMap;

/// Hashable identity of a scene coordinate.
///
/// Ports connect on exact position equality, so the key is the raw bit
/// pattern of both coordinates. Negative zero is folded into positive zero
/// to keep bit identity consistent with `f64` equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointKey {
    x: u64,
    y: u64,
}

impl PointKey {
    pub fn of(p: Point) -> Self {
        fn bits(v: f64) -> u64 {
            if v == 0.0 { 0.0f64.to_bits() } else { v.to_bits() }
        }
        Self {
            x: bits(p.x),
            y: bits(p.y),
        }
    }
}

/// What a port at some node belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortOwner {
    /// One end of the wire at `wire` (index into the document's wire list).
    Wire { wire: usize, end: WireEnd },
    /// Port `port` of the component at `component`.
    Component { component: usize, port: usize },
}

impl PortOwner {
    /// The wire index when the owner is a wire. Net traversal follows only
    /// these; component ports terminate a branch.
    pub fn as_wire(&self) -> Option<usize> {
        match self {
            PortOwner::Wire { wire, .. } => Some(*wire),
            PortOwner::Component { .. } => None,
        }
    }
}

/// Map from endpoint coordinate to the ports connected there.
#[derive(Debug, Default)]
pub struct NodeMap {
    nodes: HashMap<PointKey, Vec<PortOwner>>,
}

impl NodeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the full connectivity of a document.
    pub fn from_document(document: &Document) -> Self {
        let mut map = Self::new();
        for (index, wire) in document.wires.iter().enumerate() {
            map.attach_wire(index, wire);
        }
        for (index, component) in document.components.iter().enumerate() {
            map.attach_component(index, component);
        }
        map
    }

    /// Connects both ends of a wire to whatever already sits at their
    /// coordinates. This is the load-time connect step: coincident
    /// endpoints end up sharing one node.
    pub fn attach_wire(&mut self, wire: usize, w: &Wire) {
        for end in WireEnd::BOTH {
            self.nodes
                .entry(PointKey::of(w.endpoint(end)))
                .or_default()
                .push(PortOwner::Wire { wire, end });
        }
    }

    /// Connects every port of a component at its scene position.
    pub fn attach_component(&mut self, component: usize, c: &Component) {
        for (port, pos) in c.port_scene_positions().enumerate() {
            self.nodes
                .entry(PointKey::of(pos))
                .or_default()
                .push(PortOwner::Component { component, port });
        }
    }

    /// All ports at the given coordinate; empty when nothing connects there.
    pub fn ports_at(&self, p: Point) -> &[PortOwner] {
        self.nodes
            .get(&PointKey::of(p))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coincident_wire_ends_share_a_node() {
        let a = Wire::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        let b = Wire::new(Point::new(10.0, 0.0), Point::new(10.0, 20.0));

        let mut map = NodeMap::new();
        map.attach_wire(0, &a);
        map.attach_wire(1, &b);

        assert_eq!(map.node_count(), 3);
        let shared = map.ports_at(Point::new(10.0, 0.0));
        assert_eq!(shared.len(), 2);
        assert_eq!(shared[0].as_wire(), Some(0));
        assert_eq!(shared[1].as_wire(), Some(1));
    }

    #[test]
    fn negative_zero_matches_positive_zero() {
        let a = Wire::new(Point::new(-0.0, 0.0), Point::new(5.0, 0.0));
        let mut map = NodeMap::new();
        map.attach_wire(0, &a);
        assert_eq!(map.ports_at(Point::new(0.0, 0.0)).len(), 1);
    }

    #[test]
    fn dangling_endpoint_is_its_own_node() {
        let a = Wire::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        let mut map = NodeMap::new();
        map.attach_wire(0, &a);
        assert_eq!(map.ports_at(Point::new(10.0, 0.0)).len(), 1);
        assert!(map.ports_at(Point::new(99.0, 99.0)).is_empty());
    }
}
