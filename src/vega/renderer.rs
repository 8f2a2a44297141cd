use std::sync::Arc;

use crate::core::error::RenderError;
use crate::core::telemetry::Telemetry;
use crate::render::registry::{DataType, ExtensionDescriptor, WidgetFactoryOptions};
use crate::render::{MimeRenderer, RenderRequest, RenderedWidget};
use crate::vega::engine::{ChartEngine, NullEngine, VEGA_MIME_TYPE, VEGALITE_MIME_TYPE};
use crate::vega::widget::ChartWidget;

const MIME_TYPES: &[&str] = &[VEGA_MIME_TYPE, VEGALITE_MIME_TYPE];

/// A mime renderer for Vega/Vega-Lite data.
///
/// Creates one [`ChartWidget`] per render call, all sharing the same engine.
#[derive(Clone)]
pub struct VegaRenderer {
    engine: Arc<dyn ChartEngine>,
    telemetry: Option<Arc<dyn Telemetry>>,
}

impl VegaRenderer {
    pub fn new(engine: Arc<dyn ChartEngine>) -> Self {
        Self {
            engine,
            telemetry: None,
        }
    }

    /// Records one trace per finished render.
    pub fn with_telemetry(mut self, telemetry: Arc<dyn Telemetry>) -> Self {
        self.telemetry = Some(telemetry);
        self
    }

    /// Like [`MimeRenderer::render`], returning the concrete widget.
    pub fn render_chart(&self, request: &RenderRequest) -> Result<ChartWidget, RenderError> {
        if !self.can_render(request) {
            return Err(RenderError::UnsupportedMimeType(request.mime_type.clone()));
        }
        ChartWidget::new(request, Arc::clone(&self.engine), self.telemetry.clone())
    }
}

impl Default for VegaRenderer {
    fn default() -> Self {
        Self::new(Arc::new(NullEngine))
    }
}

impl MimeRenderer for VegaRenderer {
    fn mime_types(&self) -> &[&'static str] {
        MIME_TYPES
    }

    fn render(&self, request: &RenderRequest) -> Result<Box<dyn RenderedWidget>, RenderError> {
        let widget = self.render_chart(request)?;
        Ok(Box::new(widget))
    }

    /// Chart output is never sanitized, the model's trust flag is the only gate.
    fn would_sanitize(&self, _request: &RenderRequest) -> bool {
        false
    }
}

/// The Vega and Vega-Lite extension descriptors, both backed by `renderer`.
pub fn extensions(renderer: Arc<VegaRenderer>) -> Vec<ExtensionDescriptor> {
    let renderer: Arc<dyn MimeRenderer> = renderer;
    vec![
        ExtensionDescriptor {
            mime_type: VEGA_MIME_TYPE.to_string(),
            renderer: Arc::clone(&renderer),
            renderer_index: 0,
            data_type: DataType::Json,
            widget_factory: Some(factory("Vega", &[".vg", ".vg.json", "json"], &[".vg", ".vg.json"])),
        },
        ExtensionDescriptor {
            mime_type: VEGALITE_MIME_TYPE.to_string(),
            renderer,
            renderer_index: 0,
            data_type: DataType::Json,
            widget_factory: Some(factory(
                "Vega-Lite",
                &[".vl", ".vl.json", "json"],
                &[".vl", ".vl.json"],
            )),
        },
    ]
}

fn factory(name: &str, file_extensions: &[&str], default_for: &[&str]) -> WidgetFactoryOptions {
    WidgetFactoryOptions {
        name: name.to_string(),
        file_extensions: file_extensions.iter().map(ToString::to_string).collect(),
        default_for: default_for.iter().map(ToString::to_string).collect(),
        read_only: true,
    }
}
