//! The serialized attribute side of a widget.

use std::collections::BTreeMap;

/// Attribute name to string value. Absence is meaningful, so a removed
/// attribute is not the same as an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeMap {
    values: BTreeMap<String, String>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Write or remove (`None`) an attribute. Returns `false` if the stored
    /// value already matched, which is what breaks reflection loops.
    pub fn set(&mut self, name: &str, value: Option<&str>) -> bool {
        match value {
            Some(v) => {
                if self.get(name) == Some(v) {
                    return false;
                }
                self.values.insert(name.to_owned(), v.to_owned());
                true
            }
            None => self.values.remove(name).is_some(),
        }
    }

    /// Attributes in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
