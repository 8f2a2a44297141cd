use serde::{Deserialize, Serialize};

/// The alias for serde_json::Value, every bundle entry is one of these.
pub type MimeValue = serde_json::Value;

/// A JSON object, the raw form a bundle is seeded from.
pub type MimeObject = serde_json::Map<String, MimeValue>;

/// A mutable mapping from string keys to JSON values.
///
/// A bundle holds one namespace of an output: either its `data` (keyed by
/// mime type) or its `metadata` (keyed by host-defined strings).
///
/// Missing keys are represented as `None`, never as an error. Key order is not
/// part of the contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bundle {
    values: MimeObject,
}

impl Bundle {
    /// Creates a bundle that takes ownership of the given values.
    pub fn new(values: MimeObject) -> Self {
        Self { values }
    }

    /// Returns the value for `key`, or `None` if the key is absent.
    pub fn get(&self, key: &str) -> Option<&MimeValue> {
        self.values.get(key)
    }

    /// Checks whether the bundle has `key`.
    ///
    /// This is a membership check, so keys holding `0`, `false`, `""` or
    /// `null` are still reported as present.
    pub fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Sets a key-value pair in the bundle.
    ///
    /// # Returns
    /// The old value for the key, or `None` if it did not exist.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<MimeValue>) -> Option<MimeValue> {
        self.values.insert(key.into(), value.into())
    }

    /// Returns a snapshot of the keys currently in the bundle.
    pub fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }

    /// Removes `key` from the bundle.
    ///
    /// # Returns
    /// The removed value, or `None` if the key was absent (the bundle is then
    /// left unchanged).
    pub fn delete(&mut self, key: &str) -> Option<MimeValue> {
        self.values.remove(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &MimeValue)> {
        self.values.iter()
    }

    /// Consumes the bundle, returning its values.
    pub fn into_inner(self) -> MimeObject {
        self.values
    }

    /// Returns the bundle as a JSON object value.
    pub fn to_json(&self) -> MimeValue {
        MimeValue::Object(self.values.clone())
    }
}

impl From<MimeObject> for Bundle {
    fn from(values: MimeObject) -> Self {
        Self::new(values)
    }
}

impl FromIterator<(String, MimeValue)> for Bundle {
    fn from_iter<I: IntoIterator<Item = (String, MimeValue)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
