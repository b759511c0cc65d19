use crate::component::{ComponentData, PortData};
use crate::geometry::Point;
use crate::property::{Property, PropertyMap};
use std::collections::HashMap;

/// Component prototype factory, keyed on (type name, library name).
///
/// The library manager of the embedding application registers every
/// prototype it knows at startup; the serializer only ever looks up and
/// instantiates. An unknown key is not an error here, the caller decides
/// whether a miss is recoverable.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    components: HashMap<(String, String), ComponentData>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a prototype, replacing any previous one under the same
    /// (name, library) key.
    pub fn register(&mut self, data: ComponentData) {
        let key = (data.name.clone(), data.library.clone());
        if self.components.insert(key, data).is_some() {
            log::debug!("component prototype re-registered, replacing previous data");
        }
    }

    pub fn lookup(&self, name: &str, library: &str) -> Option<&ComponentData> {
        self.components
            .get(&(name.to_string(), library.to_string()))
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// A registry preloaded with the built-in passive and source
    /// prototypes. Enough to open the documents the test suite and most
    /// embedders produce; real deployments register their full libraries
    /// on top.
    pub fn standard_library() -> Self {
        let mut registry = Self::new();

        registry.register(ComponentData {
            name: "Resistor".into(),
            library: "Passive".into(),
            label_prefix: "R".into(),
            description: "resistor".into(),
            ports: vec![
                PortData::new("a", Point::new(-30.0, 0.0)),
                PortData::new("b", Point::new(30.0, 0.0)),
            ],
            properties: {
                let mut map = PropertyMap::new();
                map.insert("R", Property::new("50 Ohm", "ohmic resistance", true));
                map.insert(
                    "Temp",
                    Property::new("26.85", "temperature in degree Celsius", false),
                );
                map
            },
        });

        registry.register(ComponentData {
            name: "Capacitor".into(),
            library: "Passive".into(),
            label_prefix: "C".into(),
            description: "capacitor".into(),
            ports: vec![
                PortData::new("a", Point::new(-30.0, 0.0)),
                PortData::new("b", Point::new(30.0, 0.0)),
            ],
            properties: {
                let mut map = PropertyMap::new();
                map.insert("C", Property::new("1 pF", "capacitance", true));
                map
            },
        });

        registry.register(ComponentData {
            name: "Ground".into(),
            library: "Passive".into(),
            label_prefix: "GND".into(),
            description: "ground (reference potential)".into(),
            ports: vec![PortData::new("gnd", Point::new(0.0, 0.0))],
            properties: PropertyMap::new(),
        });

        registry.register(ComponentData {
            name: "Vac".into(),
            library: "Sources".into(),
            label_prefix: "V".into(),
            description: "ideal ac voltage source".into(),
            ports: vec![
                PortData::new("+", Point::new(0.0, -30.0)),
                PortData::new("-", Point::new(0.0, 30.0)),
            ],
            properties: {
                let mut map = PropertyMap::new();
                map.insert("U", Property::new("1 V", "peak voltage in Volts", true));
                map.insert("f", Property::new("1 GHz", "frequency in Hertz", false));
                map
            },
        });

        registry
    }
}
