//! Schematic document model for Caneda-style circuit capture.
//!
//! This crate holds the toolkit-independent core of a schematic editor's
//! document: components with ordered property maps, wire segments, free
//! annotation paintings, and viewport state, plus the derived structures
//! the persistence layer needs: endpoint connectivity
//! ([`connectivity::NodeMap`]) and the equipotential partition of the wire
//! set ([`equipotential::consolidate`]).
//!
//! Rendering, interactive editing, and undo are deliberately absent; the
//! model is plain serialisable data that a graphics shell can project
//! however it likes.

pub mod component;
pub mod connectivity;
pub mod document;
pub mod equipotential;
pub mod geometry;
pub mod painting;
pub mod property;
pub mod registry;
pub mod wire;

pub use component::{Component, ComponentData, PortData};
pub use connectivity::{NodeMap, PointKey, PortOwner};
pub use document::{Document, ViewState};
pub use equipotential::{consolidate, Equipotential};
pub use geometry::{Point, Rect, Size, Transform};
pub use painting::Painting;
pub use property::{Property, PropertyMap};
pub use registry::ComponentRegistry;
pub use wire::{Wire, WireEnd};
