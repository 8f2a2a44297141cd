use std::sync::Arc;

use serde::Serialize;

use crate::core::error::{RegistryError, RenderError};
use crate::core::model::MimeModel;
use crate::render::{MimeRenderer, RenderRequest, RenderedWidget};

/// The expected shape of the raw data for a mime type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Json,
    String,
}

/// File-association metadata for a renderer that can also open files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetFactoryOptions {
    pub name: String,
    /// File extensions the factory can open.
    pub file_extensions: Vec<String>,
    /// File extensions the factory is the default for.
    pub default_for: Vec<String>,
    pub read_only: bool,
}

/// Declares one mime type a renderer handles.
#[derive(Clone)]
pub struct ExtensionDescriptor {
    pub mime_type: String,
    pub renderer: Arc<dyn MimeRenderer>,
    /// Priority among renderers for the same mime type, lower wins.
    pub renderer_index: usize,
    pub data_type: DataType,
    pub widget_factory: Option<WidgetFactoryOptions>,
}

impl std::fmt::Debug for ExtensionDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtensionDescriptor")
            .field("mime_type", &self.mime_type)
            .field("renderer_index", &self.renderer_index)
            .field("data_type", &self.data_type)
            .field("widget_factory", &self.widget_factory)
            .finish_non_exhaustive()
    }
}

/// How untrusted models are matched against renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrustPolicy {
    /// Any registered renderer may handle any model.
    Any,
    /// Untrusted models may only go to renderers that sanitize their output.
    #[default]
    Ensure,
}

/// Host-owned, ordered list of extension descriptors.
///
/// The order of first registration of each mime type is the preference order
/// used by [`preferred_mime_type`](Self::preferred_mime_type).
#[derive(Debug, Default)]
pub struct RendererRegistry {
    entries: Vec<ExtensionDescriptor>,
}

impl RendererRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one descriptor after checking its renderer accepts the mime type.
    pub fn register(&mut self, descriptor: ExtensionDescriptor) -> Result<(), RegistryError> {
        if descriptor.mime_type.trim().is_empty() {
            return Err(RegistryError::EmptyMimeType);
        }
        if !descriptor
            .renderer
            .mime_types()
            .contains(&descriptor.mime_type.as_str())
        {
            return Err(RegistryError::UnsupportedMimeType {
                mime_type: descriptor.mime_type,
            });
        }

        if self.entries.iter().any(|e| {
            e.mime_type == descriptor.mime_type && e.renderer_index == descriptor.renderer_index
        }) {
            log::warn!(
                "Renderer index {} for {} is already taken, earlier registration wins ties.",
                descriptor.renderer_index,
                descriptor.mime_type
            );
        }

        self.entries.push(descriptor);
        Ok(())
    }

    pub fn register_all(
        &mut self,
        descriptors: impl IntoIterator<Item = ExtensionDescriptor>,
    ) -> Result<(), RegistryError> {
        descriptors.into_iter().try_for_each(|d| self.register(d))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered mime types in preference order, without duplicates.
    pub fn mime_types(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !seen.contains(&entry.mime_type.as_str()) {
                seen.push(entry.mime_type.as_str());
            }
        }
        seen
    }

    /// The highest-priority descriptor for a mime type.
    pub fn renderer_for(&self, mime_type: &str) -> Option<&ExtensionDescriptor> {
        self.entries
            .iter()
            .filter(|e| e.mime_type == mime_type)
            // min_by_key keeps the first of equal keys
            .min_by_key(|e| e.renderer_index)
    }

    /// Picks the first registered mime type present in the model's data.
    pub fn preferred_mime_type(
        &self,
        model: &Arc<MimeModel>,
        policy: TrustPolicy,
    ) -> Option<&str> {
        self.mime_types().into_iter().find(|mime_type| {
            if !model.data().has(mime_type) {
                return false;
            }
            if model.trusted() || policy == TrustPolicy::Any {
                return true;
            }
            self.renderer_for(mime_type).is_some_and(|descriptor| {
                let request = RenderRequest::new(*mime_type, Arc::clone(model));
                descriptor.renderer.would_sanitize(&request)
            })
        })
    }

    /// Creates a widget for the model's preferred mime type.
    ///
    /// Returns `Ok(None)` when no registered renderer applies.
    pub fn create_widget(
        &self,
        model: Arc<MimeModel>,
        policy: TrustPolicy,
    ) -> Result<Option<Box<dyn RenderedWidget>>, RenderError> {
        let Some(mime_type) = self.preferred_mime_type(&model, policy) else {
            log::debug!("No registered renderer applies to model");
            return Ok(None);
        };
        let Some(descriptor) = self.renderer_for(mime_type) else {
            return Ok(None);
        };

        let request = RenderRequest::new(mime_type, model);
        descriptor.renderer.render(&request).map(Some)
    }

    /// The descriptor whose widget factory is the default for a file extension.
    pub fn default_factory_for(&self, file_extension: &str) -> Option<&ExtensionDescriptor> {
        self.entries.iter().find(|e| {
            e.widget_factory
                .as_ref()
                .is_some_and(|f| f.default_for.iter().any(|ext| ext == file_extension))
        })
    }
}
