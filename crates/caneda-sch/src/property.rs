use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single component property.
///
/// `description` is the human readable label shown next to the value in an
/// editing shell; `visible` controls whether the property is rendered on the
/// schematic at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub value: String,
    pub description: String,
    pub visible: bool,
}

impl Property {
    pub fn new(
        value: impl Into<String>,
        description: impl Into<String>,
        visible: bool,
    ) -> Self {
        Self {
            value: value.into(),
            description: description.into(),
            visible,
        }
    }
}

/// Key-ordered mapping of property name to [`Property`].
///
/// Iteration order is sorted by name, which is also the serialization order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyMap {
    entries: BTreeMap<String, Property>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, property: Property) {
        self.entries.insert(name.into(), property);
    }

    pub fn get(&self, name: &str) -> Option<&Property> {
        self.entries.get(name)
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(|p| p.value.as_str())
    }

    /// Updates the value of an existing property. Returns false when the
    /// property does not exist; no new entry is created in that case.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.entries.get_mut(name) {
            Some(property) => {
                property.value = value.into();
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Property)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
