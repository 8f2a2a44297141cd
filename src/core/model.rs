use serde::Deserialize;

use crate::core::bundle::{Bundle, MimeObject, MimeValue};
use crate::core::error::ModelError;

/// The options used to create a [`MimeModel`].
///
/// Also deserializable from a raw `{ "data": .., "metadata": .., "trusted": .. }`
/// envelope, where every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MimeModelOptions {
    /// The initial mime data.
    pub data: MimeObject,
    /// The initial metadata.
    pub metadata: MimeObject,
    /// Whether the output is trusted. The default is false.
    pub trusted: bool,
}

impl MimeModelOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(mut self, data: MimeObject) -> Self {
        self.data = data;
        self
    }

    pub fn with_metadata(mut self, metadata: MimeObject) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn trusted(mut self, trusted: bool) -> Self {
        self.trusted = trusted;
        self
    }
}

/// One renderable output unit.
///
/// A mime model aggregates a `data` bundle holding alternative representations
/// of the same content (keyed by mime type), a `metadata` bundle, and a trust
/// flag. The flag is fixed at construction: there is no way to change it
/// afterwards, and renderers must consult it before rendering anything that can
/// have side effects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MimeModel {
    data: Bundle,
    metadata: Bundle,
    trusted: bool,
}

impl MimeModel {
    /// Creates a new mime model, consuming the options.
    pub fn new(options: MimeModelOptions) -> Self {
        Self {
            data: Bundle::new(options.data),
            metadata: Bundle::new(options.metadata),
            trusted: options.trusted,
        }
    }

    /// Builds a model from a raw JSON envelope.
    ///
    /// Only the envelope shape is checked. The values inside `data` and
    /// `metadata` are passed through unchanged.
    pub fn from_json(payload: MimeValue) -> Result<Self, ModelError> {
        let options: MimeModelOptions = serde_json::from_value(payload)?;
        Ok(Self::new(options))
    }

    pub fn from_json_str(payload: &str) -> Result<Self, ModelError> {
        let options: MimeModelOptions = serde_json::from_str(payload)?;
        Ok(Self::new(options))
    }

    /// The data associated with the model.
    pub fn data(&self) -> &Bundle {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut Bundle {
        &mut self.data
    }

    /// The metadata associated with the model.
    pub fn metadata(&self) -> &Bundle {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut Bundle {
        &mut self.metadata
    }

    /// Whether the model is trusted.
    pub fn trusted(&self) -> bool {
        self.trusted
    }
}
