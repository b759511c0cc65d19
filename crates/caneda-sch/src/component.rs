use crate::geometry::{Point, Transform};
use crate::property::{Property, PropertyMap};
use serde::{Deserialize, Serialize};

/// A connection point on a component, positioned relative to the component
/// origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortData {
    pub name: String,
    pub pos: Point,
}

impl PortData {
    pub fn new(name: impl Into<String>, pos: Point) -> Self {
        Self {
            name: name.into(),
            pos,
        }
    }
}

/// Library prototype of a component: everything that is shared between all
/// instances of one (name, library) pair.
///
/// Prototypes live in a [`ComponentRegistry`](crate::ComponentRegistry) and
/// are turned into document instances with [`ComponentData::instantiate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentData {
    pub name: String,
    pub library: String,
    pub label_prefix: String,
    pub description: String,
    pub ports: Vec<PortData>,
    pub properties: PropertyMap,
}

impl ComponentData {
    /// Clones the prototype into a fresh document instance at the origin.
    ///
    /// The instance receives a default `label` property (`label_prefix` +
    /// "1") unless the prototype already defines one.
    pub fn instantiate(&self) -> Component {
        let mut properties = self.properties.clone();
        if !properties.contains("label") {
            properties.insert(
                "label",
                Property::new(format!("{}1", self.label_prefix), "Label", true),
            );
        }

        Component {
            name: self.name.clone(),
            library: self.library.clone(),
            label_prefix: self.label_prefix.clone(),
            position: Point::default(),
            transform: Transform::default(),
            properties,
            ports: self.ports.clone(),
        }
    }
}

/// A placed component instance inside a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
    pub library: String,
    pub label_prefix: String,
    pub position: Point,
    pub transform: Transform,
    pub properties: PropertyMap,
    pub ports: Vec<PortData>,
}

impl Component {
    pub fn label(&self) -> Option<&str> {
        self.properties.value("label")
    }

    /// Sets the label, rejecting values that do not carry the component's
    /// label prefix.
    pub fn set_label(&mut self, label: &str) -> bool {
        if !label.starts_with(&self.label_prefix) {
            return false;
        }
        self.properties.set_value("label", label)
    }

    /// Port positions mapped through the instance transform into scene
    /// coordinates.
    pub fn port_scene_positions(&self) -> impl Iterator<Item = Point> + '_ {
        self.ports
            .iter()
            .map(|port| self.position + self.transform.map(port.pos))
    }
}
