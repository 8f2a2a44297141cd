//! The renderer contract.
//!
//! A host asks a [`MimeRenderer`] whether it [can render](MimeRenderer::can_render)
//! a request, then asks it to [render](MimeRenderer::render) one, receiving a
//! fresh [`RenderedWidget`] per call. The widget does its work once the host
//! attaches it, and reports completion through its readiness future.

pub mod registry;

use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::RenderError;
use crate::core::model::MimeModel;
use crate::core::signal::Ready;

/// The options used to render one entry of a mime model.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    /// The mime type of the data entry to render.
    pub mime_type: String,
    /// The model to render from. Renderers only ever read it.
    pub model: Arc<MimeModel>,
}

impl RenderRequest {
    pub fn new(mime_type: impl Into<String>, model: Arc<MimeModel>) -> Self {
        Self {
            mime_type: mime_type.into(),
            model,
        }
    }
}

/// A renderer for one or more mime types.
pub trait MimeRenderer: Send + Sync {
    /// The mime types this renderer accepts.
    fn mime_types(&self) -> &[&'static str];

    /// Whether the renderer can render the given request.
    ///
    /// The default is an exact string match against [`mime_types`](Self::mime_types).
    fn can_render(&self, request: &RenderRequest) -> bool {
        self.mime_types().contains(&request.mime_type.as_str())
    }

    /// Creates a new widget for the request.
    ///
    /// Fails with [`RenderError::UnsupportedMimeType`] for a request that
    /// [`can_render`](Self::can_render) would have rejected.
    fn render(&self, request: &RenderRequest) -> Result<Box<dyn RenderedWidget>, RenderError>;

    /// Whether the renderer's output has already been passed through a sanitizer.
    fn would_sanitize(&self, request: &RenderRequest) -> bool;
}

/// A widget produced by a [`MimeRenderer`].
pub trait RenderedWidget: Send {
    fn id(&self) -> Uuid;

    fn mime_type(&self) -> &str;

    /// A future that resolves once the widget has finished rendering.
    ///
    /// Can be taken at any time, every call observes the same signal.
    fn ready(&self) -> Ready;

    /// Called by the host once the widget is part of its presentation tree.
    fn on_after_attach(&mut self) -> Result<(), RenderError>;

    /// Releases the widget's resources. Safe to call more than once.
    fn dispose(&mut self);

    fn is_disposed(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::signal::ReadySignal;

    struct PlainRenderer;

    impl MimeRenderer for PlainRenderer {
        fn mime_types(&self) -> &[&'static str] {
            &["app/a+json", "app/b+json"]
        }

        fn render(&self, request: &RenderRequest) -> Result<Box<dyn RenderedWidget>, RenderError> {
            Err(RenderError::UnsupportedMimeType(request.mime_type.clone()))
        }

        fn would_sanitize(&self, _request: &RenderRequest) -> bool {
            true
        }
    }

    #[test]
    fn test_can_render_is_exact_match() {
        let renderer = PlainRenderer;
        let model = Arc::new(MimeModel::default());

        assert!(renderer.can_render(&RenderRequest::new("app/a+json", model.clone())));
        assert!(renderer.can_render(&RenderRequest::new("app/b+json", model.clone())));
        assert!(!renderer.can_render(&RenderRequest::new("app/c+json", model.clone())));
        assert!(!renderer.can_render(&RenderRequest::new("app/a", model.clone())));
        assert!(!renderer.can_render(&RenderRequest::new("app/a+json; v=2", model)));
    }

    #[tokio::test]
    async fn test_ready_type_is_shared_signal() {
        let signal = ReadySignal::new();
        let ready: Ready = signal.ready();
        signal.resolve(Err(RenderError::Disposed));
        assert_eq!(ready.await, Err(RenderError::Disposed));
    }
}
